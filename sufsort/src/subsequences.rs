// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{iter::FusedIterator, sync::Arc};

/// Counts the distinct non-empty subsequences of a sequence of length `len`.
///
/// Each suffix contributes the prefixes it does not share with the suffix before it.
pub(crate) fn count_unique(suffix_array: &[u32], lcp: &[i32]) -> u64 {
    let len = suffix_array.len() - 1;
    suffix_array[1..]
        .iter()
        .zip(&lcp[1..])
        .map(|(&suffix, &shared)| (len - suffix as usize - shared as usize) as u64)
        .sum()
}

/// An iterator over the distinct non-empty subsequences of a sequence.
///
/// Each subsequence is yielded exactly once as a `(start, len)` pair, in lexicographic order.
/// This struct is created by [`SuffixArray::subsequences()`](crate::SuffixArray::subsequences).
#[derive(Clone, Debug)]
pub struct Subsequences<'a> {
    array: &'a [u32],
    lcp: Arc<[i32]>,
    // Current suffix array position, and the next length to yield for it
    position: usize,
    next_len: usize,
    remaining: u64,
}

impl<'a> Subsequences<'a> {
    pub(crate) fn new(array: &'a [u32], lcp: Arc<[i32]>) -> Self {
        let remaining = count_unique(array, &lcp);
        let mut subsequences = Self {
            array,
            lcp,
            position: 0,
            next_len: 0,
            remaining,
        };
        subsequences.advance_position();
        subsequences
    }

    fn suffix_len(&self, position: usize) -> usize {
        self.array.len() - 1 - self.array[position] as usize
    }

    fn advance_position(&mut self) {
        self.position += 1;
        if let Some(&shared) = self.lcp.get(self.position) {
            self.next_len = shared as usize + 1;
        }
    }
}

impl Iterator for Subsequences<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.position < self.array.len() {
            if self.next_len <= self.suffix_len(self.position) {
                let item = (self.array[self.position] as usize, self.next_len);
                self.next_len += 1;
                self.remaining -= 1;
                return Some(item);
            }

            self.advance_position();
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}

impl ExactSizeIterator for Subsequences<'_> {}

impl FusedIterator for Subsequences<'_> {}
