// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! Compact storage for precomputed suffix arrays.
//!
//! Building a suffix array takes linear time, but for large sequences that time adds up. This
//! crate writes a built [`SuffixArray`](sufsort::SuffixArray) to any [`Write`](std::io::Write) as
//! a compressed stream and loads it back next to its sequence. The sequence itself is not stored:
//! a digest of it is, so a suffix array is never loaded for the wrong sequence.
//!
//! # Examples
//!
//! Storing the suffix array of a file:
//!
//! ```no_run
//! use std::fs::{self, File};
//! use sufsort::SuffixArray;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let genome = fs::read("chr21.txt")?;
//! let sa = SuffixArray::new(&genome[..], 256)?;
//! let mut out = File::create("chr21.sa")?;
//!
//! sufstore::write(&sa, &mut out)?;
//!
//! # Ok(())
//! # }
//! ```
//!
//! Loading it again:
//!
//! ```no_run
//! use std::fs::{self, File};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let genome = fs::read("chr21.txt")?;
//! let stored = File::open("chr21.sa")?;
//!
//! let sa = sufstore::read(&genome[..], stored)?;
//! println!("{:?}", sa.find_instance(b"GATTACA"));
//!
//! # Ok(())
//! # }
//! ```

mod header;
mod read;
mod write;

pub use read::{LoadError, read};
pub use write::{WriteConfig, write, write_with_config};
