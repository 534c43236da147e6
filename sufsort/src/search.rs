// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::cmp::Ordering;

use crate::lcp::LcpLr;

/// Compares the suffix starting at `suffix` with `pattern`, looking no further than the length of
/// the pattern.
///
/// The suffix compares equal when it starts with `pattern`. A suffix that ends early is a proper
/// prefix of the pattern and compares less.
#[inline]
pub(crate) fn compare<T: Ord>(text: &[T], suffix: u32, pattern: &[T]) -> Ordering {
    text[suffix as usize..]
        .iter()
        .take(pattern.len())
        .cmp(pattern.iter())
}

/// Like [`compare()`], but skips the first `skip` symbols, which are known to match. Also returns
/// the number of matching symbols.
fn compare_from<T: Ord>(text: &[T], suffix: u32, pattern: &[T], skip: usize) -> (Ordering, usize) {
    let suffix = &text[suffix as usize..];

    let mut k = skip;
    while k < pattern.len() {
        let Some(symbol) = suffix.get(k) else {
            return (Ordering::Less, k);
        };
        match symbol.cmp(&pattern[k]) {
            Ordering::Equal => k += 1,
            ordering => return (ordering, k),
        }
    }

    (Ordering::Equal, k)
}

/// Returns the position of some suffix starting with `pattern`.
pub(crate) fn find_any<T: Ord>(text: &[T], suffix_array: &[u32], pattern: &[T]) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return None;
    }

    suffix_array[1..]
        .binary_search_by(|&suffix| compare(text, suffix, pattern))
        .ok()
        .map(|i| i + 1)
}

/// Returns the position of some suffix starting with `pattern`, descending the search tree with
/// the help of `lcp_lr`.
///
/// The number of matched symbols on each side of the search interval is tracked, so no symbol of
/// the pattern is compared more than once per step of the descent that needs a comparison at all.
/// This operation is *O*(*m* + log(*n*)).
pub(crate) fn find_any_accelerated<T: Ord>(
    text: &[T],
    suffix_array: &[u32],
    lcp_lr: &LcpLr,
    pattern: &[T],
) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return None;
    }

    let mut low = 1;
    let mut high = text.len();

    let (ordering, mut l) = compare_from(text, suffix_array[low], pattern, 0);
    match ordering {
        Ordering::Equal => return Some(low),
        Ordering::Greater => return None,
        Ordering::Less => {}
    }
    let (ordering, mut r) = compare_from(text, suffix_array[high], pattern, 0);
    match ordering {
        Ordering::Equal => return Some(high),
        Ordering::Less => return None,
        Ordering::Greater => {}
    }

    // Invariant: suffix[low] < pattern < suffix[high], matching l and r symbols respectively
    while high - low > 1 {
        let mid = low + (high - low) / 2;

        let (bound, matched) = if l >= r {
            (lcp_lr.left(mid) as usize, l)
        } else {
            (lcp_lr.right(mid) as usize, r)
        };

        let ordering = match bound.cmp(&matched) {
            // suffix[mid] shares more with the bound on the side it came from than the pattern
            // does, so it lies on that side of the pattern
            Ordering::Greater if l >= r => Ordering::Less,
            Ordering::Greater => Ordering::Greater,
            // suffix[mid] departs from that side first, so it lies on the other side, matching
            // exactly `bound` symbols
            Ordering::Less if l >= r => {
                high = mid;
                r = bound;
                continue;
            }
            Ordering::Less => {
                low = mid;
                l = bound;
                continue;
            }
            Ordering::Equal => {
                let (ordering, k) = compare_from(text, suffix_array[mid], pattern, matched);
                match ordering {
                    Ordering::Equal => return Some(mid),
                    Ordering::Less => l = k,
                    Ordering::Greater => r = k,
                }
                ordering
            }
        };

        match ordering {
            Ordering::Less => low = mid,
            Ordering::Greater => high = mid,
            Ordering::Equal => unreachable!("matches return early"),
        }
    }

    None
}

/// Returns the leftmost position of a suffix starting with `pattern`.
pub(crate) fn find_first<T: Ord>(text: &[T], suffix_array: &[u32], pattern: &[T]) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return None;
    }

    let first = 1 + suffix_array[1..]
        .partition_point(|&suffix| compare(text, suffix, pattern) == Ordering::Less);

    suffix_array
        .get(first)
        .filter(|&&suffix| compare(text, suffix, pattern) == Ordering::Equal)
        .map(|_| first)
}

/// Returns the rightmost position of a suffix starting with `pattern`.
pub(crate) fn find_last<T: Ord>(text: &[T], suffix_array: &[u32], pattern: &[T]) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return None;
    }

    let end = 1 + suffix_array[1..]
        .partition_point(|&suffix| compare(text, suffix, pattern) != Ordering::Greater);
    let last = end - 1;

    (last > 0 && compare(text, suffix_array[last], pattern) == Ordering::Equal).then_some(last)
}

/// Returns the leftmost and rightmost positions of suffixes starting with `pattern`, given the
/// position `hit` of one of them.
///
/// Every match lies in a contiguous run around `hit`, so each side is searched only up to it.
pub(crate) fn find_bounds_around<T: Ord>(
    text: &[T],
    suffix_array: &[u32],
    pattern: &[T],
    hit: usize,
) -> (usize, usize) {
    let first = 1 + suffix_array[1..hit]
        .partition_point(|&suffix| compare(text, suffix, pattern) == Ordering::Less);
    let end = hit
        + suffix_array[hit..]
            .partition_point(|&suffix| compare(text, suffix, pattern) == Ordering::Equal);

    (first, end - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        lcp::{inverse, kasai},
        sais::sort_directly,
    };

    struct Fixture {
        text: Vec<u8>,
        suffix_array: Vec<u32>,
        lcp_lr: LcpLr,
    }

    impl Fixture {
        fn new(text: &[u8]) -> Self {
            let suffix_array = sort_directly(text);
            let lcp = kasai(text, &suffix_array, &inverse(&suffix_array));
            Self {
                text: text.to_vec(),
                suffix_array,
                lcp_lr: LcpLr::build(&lcp).unwrap(),
            }
        }

        fn occurrences(&self, pattern: &[u8]) -> Vec<usize> {
            (1..self.suffix_array.len())
                .filter(|&i| self.text[self.suffix_array[i] as usize..].starts_with(pattern))
                .collect()
        }

        fn check(&self, pattern: &[u8]) {
            let expected = self.occurrences(pattern);
            let found = [
                find_any(&self.text, &self.suffix_array, pattern),
                find_any_accelerated(&self.text, &self.suffix_array, &self.lcp_lr, pattern),
            ];

            for position in found {
                match position {
                    Some(position) => {
                        assert!(expected.contains(&position), "{pattern:?}");
                        assert_eq!(
                            find_bounds_around(&self.text, &self.suffix_array, pattern, position),
                            (expected[0], expected[expected.len() - 1]),
                            "{pattern:?}",
                        );
                    }
                    None => assert!(expected.is_empty(), "missed {pattern:?}"),
                }
            }

            assert_eq!(
                find_first(&self.text, &self.suffix_array, pattern),
                expected.first().copied(),
            );
            assert_eq!(
                find_last(&self.text, &self.suffix_array, pattern),
                expected.last().copied(),
            );
        }
    }

    #[test]
    fn compare_short_suffix_is_less() {
        assert_eq!(compare(b"xab", 1, b"abc"), Ordering::Less);
        assert_eq!(compare(b"xabc", 1, b"abc"), Ordering::Equal);
        assert_eq!(compare(b"xabd", 1, b"abc"), Ordering::Greater);
        assert_eq!(compare_from(b"abcd", 0, b"abce", 2), (Ordering::Less, 3));
    }

    #[test]
    fn banana() {
        let fixture = Fixture::new(b"banana");

        assert_eq!(fixture.occurrences(b"ana"), [2, 3]);
        for pattern in [&b"a"[..], b"an", b"ana", b"anana", b"banana", b"n", b"na", b"nan"] {
            fixture.check(pattern);
        }
    }

    #[test]
    fn every_substring_is_found() {
        let text = b"she sells sea shells by the sea shore";
        let fixture = Fixture::new(text);

        for start in 0..text.len() {
            for end in start + 1..=text.len() {
                fixture.check(&text[start..end]);
            }
        }
    }

    #[test]
    fn missing_patterns() {
        let fixture = Fixture::new(b"Now is the time for all good men to come to the aid of the party");

        for pattern in [&b"times"[..], b"!", b"\0", b"zzz", b"Now is the time for all good women"] {
            fixture.check(pattern);
        }
    }

    #[test]
    fn empty_and_long_patterns_never_match() {
        let fixture = Fixture::new(b"abc");

        assert_eq!(find_any(&fixture.text, &fixture.suffix_array, b""), None);
        assert_eq!(find_first(&fixture.text, &fixture.suffix_array, b"abcd"), None);
        assert_eq!(
            find_any_accelerated(&fixture.text, &fixture.suffix_array, &fixture.lcp_lr, b"abcd"),
            None,
        );
    }

    #[test]
    fn repetitive_text() {
        let text = b"aaaaaaaaaaaaaaaaaaaaaaaaabaaaaaaaaaaaaaaaaaaaaaaaaaaa";
        let fixture = Fixture::new(text);

        for len in 1..=30 {
            fixture.check(&text[..len]);
            fixture.check(&text[text.len() - len..]);
        }
    }
}
