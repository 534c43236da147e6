// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{iter::Copied, slice};

use crate::Error;

/// The occurrences of a pattern, as a contiguous range of a suffix array.
///
/// Suffixes in the range all start with the pattern and appear in suffix array order. Use
/// [`sequence_order()`](SuffixRange::sequence_order) to list the occurrences by sequence
/// position instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SuffixRange<'a> {
    array: &'a [u32],
    start: usize,
    end: usize,
    pattern_len: usize,
}

impl<'a> SuffixRange<'a> {
    pub(crate) fn new(array: &'a [u32], start: usize, end: usize, pattern_len: usize) -> Self {
        debug_assert!(start <= end && end <= array.len(), "range out of bounds");
        Self {
            array,
            start,
            end,
            pattern_len,
        }
    }

    pub(crate) fn empty(array: &'a [u32]) -> Self {
        Self::new(array, 0, 0, 0)
    }

    /// The number of occurrences
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the pattern does not occur.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The length of the pattern that was searched for, or 0 for an empty range
    #[must_use]
    pub fn subsequence_len(&self) -> usize {
        self.pattern_len
    }

    /// The first suffix array position of the range
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last suffix array position of the range
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the sequence position of the `i`th occurrence in suffix array order.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<usize> {
        self.as_slice().get(i).map(|&position| position as usize)
    }

    /// The sequence positions of the occurrences in suffix array order, borrowed from the suffix
    /// array
    #[must_use]
    pub fn as_slice(&self) -> &'a [u32] {
        &self.array[self.start..self.end]
    }

    /// Iterates over the sequence positions of the occurrences in suffix array order.
    pub fn iter(&self) -> Copied<slice::Iter<'a, u32>> {
        self.as_slice().iter().copied()
    }

    /// Copies the sequence positions of the occurrences in suffix array order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u32> {
        self.as_slice().to_vec()
    }

    /// Returns the sequence positions of the occurrences in increasing order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let sa = SuffixArray::from_utf8("banana");
    ///
    /// assert_eq!(sa.find_range(b"ana").sequence_order(), [1, 3]);
    /// ```
    #[must_use]
    pub fn sequence_order(&self) -> Vec<u32> {
        let mut positions = self.to_vec();
        positions.sort_unstable();
        positions
    }

    /// Copies the sequence positions of the occurrences into `out`, starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooShort`] if `out` cannot hold every occurrence from `offset` on.
    /// Nothing is written in that case.
    pub fn copy_to(&self, out: &mut [u32], offset: usize) -> Result<(), Error> {
        let needed = offset.saturating_add(self.len());
        if needed > out.len() {
            return Err(Error::BufferTooShort {
                needed,
                available: out.len(),
            });
        }

        out[offset..needed].copy_from_slice(self.as_slice());

        Ok(())
    }
}

impl<'a> IntoIterator for SuffixRange<'a> {
    type Item = u32;
    type IntoIter = Copied<slice::Iter<'a, u32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter().copied()
    }
}
