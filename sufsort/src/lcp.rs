// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! Longest-common-prefix tables.

use std::cmp;

/// Computes the inverse of a suffix array, mapping each sequence position to its rank.
pub(crate) fn inverse(suffix_array: &[u32]) -> Vec<u32> {
    let mut rank = vec![0; suffix_array.len()];
    for (i, &suffix) in suffix_array.iter().enumerate() {
        rank[suffix as usize] = i as u32;
    }
    rank
}

/// Computes the LCP array of `text` in linear time with Kasai's algorithm.
///
/// `lcp[i]` is the length of the common prefix of the suffixes at `suffix_array[i - 1]` and
/// `suffix_array[i]`. `lcp[0]` has no predecessor and is -1.
pub(crate) fn kasai<T: Eq>(text: &[T], suffix_array: &[u32], rank: &[u32]) -> Vec<i32> {
    let len = text.len();
    let mut lcp = vec![0; len + 1];
    lcp[0] = -1;

    let mut k = 0;
    for i in 0..len {
        let r = rank[i] as usize;
        if r == len {
            k = 0;
            continue;
        }

        let j = suffix_array[r + 1] as usize;
        while i + k < len && j + k < len && text[i + k] == text[j + k] {
            k += 1;
        }

        lcp[r + 1] = k as i32;
        k = k.saturating_sub(1);
    }

    lcp
}

/// Length of the common prefix of `a` and `b`
pub(crate) fn common_prefix<T: Eq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// The LCP-LR tables used to accelerate binary search over a suffix array.
///
/// The tables follow the implicit binary search tree over the suffix array positions `[1, L]`.
/// For a search interval `[low, high]` with midpoint `mid`, `left(mid)` is the common prefix
/// length of the suffixes at `low` and `mid`, and `right(mid)` that of the suffixes at `mid` and
/// `high`. Both are minimums over the plain LCP array, precomputed so that each step of the
/// search costs *O*(1) instead of a scan.
#[derive(Clone, Debug)]
pub struct LcpLr {
    left: Box<[i32]>,
    right: Box<[i32]>,
}

impl LcpLr {
    /// Builds the tables from an LCP array of length `L + 1`.
    ///
    /// Returns `None` when `L < 2`, as there is then no interval to descend into.
    pub(crate) fn build(lcp: &[i32]) -> Option<Self> {
        let len = lcp.len().checked_sub(1)?;
        if len < 2 {
            return None;
        }

        let unset = len as i32 + 1;
        let mut tables = Self {
            left: vec![unset; len + 1].into_boxed_slice(),
            right: vec![unset; len + 1].into_boxed_slice(),
        };
        tables.fill(lcp, 1, len, true);

        Some(tables)
    }

    fn fill(&mut self, lcp: &[i32], low: usize, high: usize, right: bool) {
        let width = high.checked_sub(low).unwrap_or_else(|| {
            panic!("malformed LCP-LR interval [{low}, {high}]: the LCP array changed during build")
        });

        let value = match width {
            0 => panic!("empty LCP-LR interval at {low}"),
            1 => lcp[high],
            _ => {
                let mid = low + width / 2;
                self.fill(lcp, low, mid, false);
                self.fill(lcp, mid, high, true);
                cmp::min(self.left[mid], self.right[mid])
            }
        };

        if right {
            self.right[low] = value;
        } else {
            self.left[high] = value;
        }
    }

    /// The number of suffixes covered by the search tree
    pub(crate) fn len(&self) -> usize {
        self.left.len() - 1
    }

    /// The common prefix length of the suffixes at the lower bound and the midpoint of the search
    /// interval split at `mid`
    #[inline]
    #[must_use]
    pub fn left(&self, mid: usize) -> i32 {
        self.left[mid]
    }

    /// The common prefix length of the suffixes at the midpoint and the upper bound of the search
    /// interval split at `mid`
    #[inline]
    #[must_use]
    pub fn right(&self, mid: usize) -> i32 {
        self.right[mid]
    }

    /// Returns the minimum of `lcp[from + 1..=to]`, the common prefix length of the suffixes at
    /// positions `from` and `to`.
    ///
    /// Requires `1 <= from < to <= L`.
    pub(crate) fn range_min(&self, from: usize, to: usize) -> i32 {
        debug_assert!(1 <= from && from < to && to <= self.len(), "invalid range");
        self.range_min_in(1, self.len(), true, from, to)
    }

    // The node [low, high] summarizes lcp[low + 1..=high]
    fn range_min_in(&self, low: usize, high: usize, right: bool, from: usize, to: usize) -> i32 {
        if high <= from || low >= to {
            return i32::MAX;
        }
        if from <= low && high <= to {
            return if right { self.right[low] } else { self.left[high] };
        }

        let mid = low + (high - low) / 2;
        cmp::min(
            self.range_min_in(low, mid, false, from, to),
            self.range_min_in(mid, high, true, from, to),
        )
    }
}
