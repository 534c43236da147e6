// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{
    error,
    fmt::{self, Display, Formatter},
};

/// An error produced while building or querying a suffix array.
///
/// Construction errors leave nothing behind: a rejected sequence never yields a usable
/// [`SuffixArray`](crate::SuffixArray).
///
/// # Examples
///
/// ```
/// use sufsort::{Error, SuffixArray};
///
/// let result = SuffixArray::new(&[0u8, 1, 7, 2][..], 4);
///
/// assert!(matches!(result, Err(Error::OutOfAlphabet { position: 2 })));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The alphabet size is zero or too large for the symbol type
    AlphabetSize {
        /// The requested alphabet size
        size: usize,
        /// The largest alphabet the symbol type supports
        limit: usize,
    },
    /// The symbol at `position` is not a member of the alphabet
    OutOfAlphabet {
        /// The offending position in the input
        position: usize,
    },
    /// The sequence is longer than [`MAX_LEN`](crate::MAX_LEN)
    TooLong(usize),
    /// Two arrays that must have related lengths do not
    IncompatibleLengths {
        /// The length that was expected
        expected: usize,
        /// The length that was found
        found: usize,
    },
    /// A Burrows-Wheeler transform is not a valid transform of any sequence
    MalformedBwt,
    /// An output buffer cannot hold the requested values
    BufferTooShort {
        /// The number of slots required
        needed: usize,
        /// The number of slots available
        available: usize,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Error::AlphabetSize { size, limit } => {
                write!(f, "alphabet size {size} out of range: expected 1..={limit}")
            }
            Error::OutOfAlphabet { position } => {
                write!(f, "symbol at position {position} is not in the alphabet")
            }
            Error::TooLong(len) => write!(
                f,
                "sequence of length {len} exceeds the maximum of {}",
                crate::MAX_LEN,
            ),
            Error::IncompatibleLengths { expected, found } => {
                write!(f, "incompatible lengths: expected {expected}, found {found}")
            }
            Error::MalformedBwt => write!(f, "malformed Burrows-Wheeler transform"),
            Error::BufferTooShort { needed, available } => write!(
                f,
                "buffer too short: {needed} slots needed, {available} available",
            ),
        }
    }
}

impl error::Error for Error {}
