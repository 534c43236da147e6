// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::cmp::Ordering;

use crate::Symbol;

// This algorithm casts u32s to usizes for the purpose of indexing. Because of these casts, any
// target where the size of a usize is less than the size of a u32 will produce unexpected (albeit
// not undefined) behavior. To prevent this, cause a compiler error on such targets.
#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("Target pointer width must be at least 32 bits");

/// The representation of an empty value
const EMPTY: u32 = 1 << (u32::BITS - 1);

/// Computes the suffix array of `text` using the SA-IS algorithm.
///
/// The algorithm is implemented as described in the article Two Efficient Algorithms for Linear
/// Time Suffix Array Construction by Ge Nong, Sen Zhang and Wai Hong Chan. Every symbol of `text`
/// must have an index below `alphabet_size`.
///
/// The result has one more entry than `text`: the empty suffix is sorted first, so element 0 is
/// always `text.len()`. The end of the text is tracked by position rather than by a terminating
/// symbol, so no symbol value is reserved.
///
/// Sequences shorter than `threshold` (at any recursion level) are sorted by direct comparison.
pub(crate) fn sais<T: Symbol>(text: &[T], alphabet_size: usize, threshold: usize) -> Vec<u32> {
    let len = text.len();
    match len {
        0 => return vec![0],
        1 => return vec![1, 0],
        _ if len < threshold.max(2) => {
            log::trace!("sorting {len} suffixes by direct comparison");
            return sort_directly(text);
        }
        _ => {}
    }

    let types = classify(text);
    let sizes = bucket_sizes(text, alphabet_size);

    // Stage 1: Sort the LMS-substrings
    let mut suffix_array = vec![EMPTY; len + 1];
    guess_lms_sort(text, &types, &sizes, &mut suffix_array);
    induce_l(text, &types, &sizes, &mut suffix_array);
    induce_s(text, &types, &sizes, &mut suffix_array);

    // Stage 2: Name the sorted substrings and solve the reduced problem
    let summary = summarize(text, &types, &suffix_array);
    log::debug!(
        "level of {len} symbols over an alphabet of {alphabet_size}: {} LMS suffixes, {} names",
        summary.names.len(),
        summary.alphabet_size,
    );

    let summary_array = if summary.alphabet_size == summary.names.len() {
        // Every name is unique, so the names are their own ranks
        let mut summary_array = vec![0; summary.names.len() + 1];
        summary_array[0] = summary.names.len() as u32;
        for (i, &name) in summary.names.iter().enumerate() {
            summary_array[name as usize + 1] = i as u32;
        }
        summary_array
    } else {
        sais(&summary.names, summary.alphabet_size, threshold)
    };

    // Stage 3: Induce the full order from the order of the LMS suffixes
    suffix_array.fill(EMPTY);
    place_lms_suffixes(text, &sizes, &summary_array, &summary.offsets, &mut suffix_array);
    induce_l(text, &types, &sizes, &mut suffix_array);
    induce_s(text, &types, &sizes, &mut suffix_array);

    suffix_array
}

/// Sorts all suffixes of `text`, including the empty one, by comparing them directly.
pub(crate) fn sort_directly<T: Ord>(text: &[T]) -> Vec<u32> {
    let mut suffix_array: Vec<u32> = (0..=text.len() as u32).collect();
    suffix_array.sort_unstable_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));
    suffix_array
}

/// Returns whether each position of `text` is S-type (`true`) or L-type (`false`).
///
/// The result has an entry for the empty suffix at `text.len()`, which is S-type.
fn classify<T: Ord>(text: &[T]) -> Vec<bool> {
    let len = text.len();
    let mut types = vec![false; len + 1];
    types[len] = true;

    // The last symbol is always greater than the empty suffix, so it stays L-type
    for i in (0..len.saturating_sub(1)).rev() {
        types[i] = match text[i].cmp(&text[i + 1]) {
            Ordering::Less => true,
            Ordering::Equal => types[i + 1],
            Ordering::Greater => false,
        };
    }

    types
}

#[inline]
fn is_lms(types: &[bool], i: usize) -> bool {
    i > 0 && types[i] && !types[i - 1]
}

fn bucket_sizes<T: Symbol>(text: &[T], alphabet_size: usize) -> Vec<u32> {
    let mut sizes = vec![0; alphabet_size];
    for symbol in text {
        sizes[symbol.index()] += 1;
    }
    sizes
}

/// Returns the first slot of each bucket. Slot 0 belongs to the empty suffix.
fn bucket_heads(sizes: &[u32]) -> Vec<usize> {
    let mut offset = 1;
    sizes
        .iter()
        .map(|&size| {
            let head = offset;
            offset += size as usize;
            head
        })
        .collect()
}

/// Returns the last slot of each bucket.
fn bucket_tails(sizes: &[u32]) -> Vec<usize> {
    let mut offset = 1;
    sizes
        .iter()
        .map(|&size| {
            offset += size as usize;
            offset - 1
        })
        .collect()
}

fn guess_lms_sort<T: Symbol>(text: &[T], types: &[bool], sizes: &[u32], suffix_array: &mut [u32]) {
    let mut tails = bucket_tails(sizes);

    for i in 1..text.len() {
        if !is_lms(types, i) {
            continue;
        }

        let bucket = text[i].index();
        suffix_array[tails[bucket]] = i as u32;
        tails[bucket] -= 1;
    }

    suffix_array[0] = text.len() as u32;
}

fn induce_l<T: Symbol>(text: &[T], types: &[bool], sizes: &[u32], suffix_array: &mut [u32]) {
    let mut heads = bucket_heads(sizes);

    for i in 0..suffix_array.len() {
        let suffix = suffix_array[i];
        if suffix == EMPTY || suffix == 0 {
            continue;
        }

        let j = suffix as usize - 1;
        if types[j] {
            continue;
        }

        let bucket = text[j].index();
        suffix_array[heads[bucket]] = j as u32;
        heads[bucket] += 1;
    }
}

fn induce_s<T: Symbol>(text: &[T], types: &[bool], sizes: &[u32], suffix_array: &mut [u32]) {
    let mut tails = bucket_tails(sizes);

    for i in (0..suffix_array.len()).rev() {
        let suffix = suffix_array[i];
        if suffix == EMPTY || suffix == 0 {
            continue;
        }

        let j = suffix as usize - 1;
        if !types[j] {
            continue;
        }

        let bucket = text[j].index();
        suffix_array[tails[bucket]] = j as u32;
        tails[bucket] -= 1;
    }
}

/// Returns `true` if the LMS-substrings starting at `a` and `b` are identical.
///
/// A substring starting at the end of the text equals no other substring.
fn lms_substrings_equal<T: Ord>(text: &[T], types: &[bool], a: usize, b: usize) -> bool {
    let len = text.len();
    if a == len || b == len {
        return false;
    }

    let mut i = 0;
    loop {
        let (pa, pb) = (a + i, b + i);
        let a_is_lms = is_lms(types, pa);
        let b_is_lms = is_lms(types, pb);

        if i > 0 && a_is_lms && b_is_lms {
            // Both substrings end here; the closing symbols must match too
            return pa < len && pb < len && text[pa] == text[pb];
        }
        if a_is_lms != b_is_lms || text[pa] != text[pb] {
            return false;
        }

        i += 1;
    }
}

/// The reduced problem: one name per LMS suffix, in text order.
struct Summary {
    names: Vec<u32>,
    offsets: Vec<usize>,
    alphabet_size: usize,
}

fn summarize<T: Symbol>(text: &[T], types: &[bool], suffix_array: &[u32]) -> Summary {
    let len = text.len();
    let mut lms_names = vec![EMPTY; len + 1];

    let mut current = 0;
    let mut last = suffix_array[0] as usize;
    lms_names[last] = current;

    for &suffix in &suffix_array[1..] {
        let suffix = suffix as usize;
        if !is_lms(types, suffix) {
            continue;
        }

        if !lms_substrings_equal(text, types, last, suffix) {
            current += 1;
        }

        last = suffix;
        lms_names[suffix] = current;
    }

    let (offsets, names) = lms_names
        .into_iter()
        .enumerate()
        .filter(|&(_, name)| name != EMPTY)
        .unzip();

    Summary {
        names,
        offsets,
        alphabet_size: current as usize + 1,
    }
}

fn place_lms_suffixes<T: Symbol>(
    text: &[T],
    sizes: &[u32],
    summary_array: &[u32],
    offsets: &[usize],
    suffix_array: &mut [u32],
) {
    let mut tails = bucket_tails(sizes);

    // Entries 0 and 1 of the summary order are its empty suffix and the end of the text
    for &name_position in summary_array[2..].iter().rev() {
        let position = offsets[name_position as usize];
        let bucket = text[position].index();
        suffix_array[tails[bucket]] = position as u32;
        tails[bucket] -= 1;
    }

    suffix_array[0] = text.len() as u32;
}
