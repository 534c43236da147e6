// Copyright 2023-2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! Suffix arrays over sequences of symbols from a bounded alphabet.
//!
//! A [`SuffixArray`] is built in linear time with the SA-IS algorithm and answers substring
//! queries by binary search. On demand, it also builds the inverse suffix array, the LCP array
//! (Kasai's algorithm) and the LCP-LR tables that bring searches down to *O*(*m* + log(*n*)).
//! The Burrows-Wheeler transform of the sequence falls out of the suffix array directly, and
//! [`inverse_bwt()`] reverses it.
//!
//! Sequences can be made of any [`Symbol`] type: bytes, the other primitive integers, or `char`s.
//! Sequences over other types can be mapped onto `u32` ranks with an [`Alphabet`].
//!
//! # Examples
//!
//! Finding every occurrence of a pattern:
//!
//! ```
//! use sufsort::SuffixArray;
//!
//! let sa = SuffixArray::from_utf8("she sells sea shells by the sea shore");
//! let range = sa.find_range(b"sea");
//!
//! assert_eq!(range.sequence_order(), [10, 28]);
//! ```
//!
//! Counting distinct substrings:
//!
//! ```
//! use sufsort::SuffixArray;
//!
//! let sa = SuffixArray::new(&[1u8, 2, 1, 2][..], 3).unwrap();
//!
//! // 1, 2, 12, 21, 121, 212 and 1212
//! assert_eq!(sa.count_unique_subsequences(), 7);
//! ```

mod alphabet;
mod bwt;
mod error;
mod lcp;
mod range;
mod sais;
mod search;
mod subsequences;
mod suffix_array;

pub use alphabet::{Alphabet, Symbol};
pub use bwt::{Bwt, inverse_bwt};
pub use error::Error;
pub use lcp::LcpLr;
pub use range::SuffixRange;
pub use subsequences::Subsequences;
pub use suffix_array::{Config, SuffixArray};

/// The longest sequence a [`SuffixArray`] can index
///
/// LCP values are stored as `i32`, with -1 reserved for the first entry.
pub const MAX_LEN: usize = i32::MAX as usize - 1;
