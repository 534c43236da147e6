// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use integer_encoding::VarIntWriter;
use sufsort::{SuffixArray, Symbol};
use zstd::Encoder;

use crate::header::{self, MAGIC, VERSION};

/// Writes a suffix array with default options
///
/// Only the suffix array and a digest of its sequence are written, not the sequence itself. The
/// sequence must be supplied again to [`read()`](crate::read()) to load the suffix array.
///
/// This function is a shorthand for [`write_with_config()`] called with the default options. If
/// you want to tune compression, see that function instead.
///
/// # Errors
///
/// Returns an error if an I/O error occurs while writing.
///
/// # Examples
///
/// ```
/// # fn main() -> std::io::Result<()> {
/// use sufsort::SuffixArray;
///
/// let sa = SuffixArray::from_utf8("Hello, world!");
/// let mut out = Vec::new();
///
/// sufstore::write(&sa, &mut out)?;
///
/// # Ok(())
/// # }
/// ```
pub fn write<T, W>(suffix_array: &SuffixArray<'_, T>, out: &mut W) -> io::Result<()>
where
    T: Symbol,
    W: Write + ?Sized,
{
    write_with_config(suffix_array, out, &WriteConfig::default())
}

/// Writes a suffix array
///
/// Only the suffix array and a digest of its sequence are written, not the sequence itself. The
/// sequence must be supplied again to [`read()`](crate::read()) to load the suffix array.
///
/// # Errors
///
/// Returns an error if an I/O error occurs while writing.
///
/// # Examples
///
/// ```
/// # fn main() -> std::io::Result<()> {
/// use sufsort::SuffixArray;
/// use sufstore::WriteConfig;
///
/// let sa = SuffixArray::from_utf8("Hello, world!");
/// let mut out = Vec::new();
///
/// sufstore::write_with_config(&sa, &mut out, WriteConfig::new().compression_threads(0))?;
///
/// # Ok(())
/// # }
/// ```
pub fn write_with_config<T, W>(
    suffix_array: &SuffixArray<'_, T>,
    out: &mut W,
    options: &WriteConfig,
) -> io::Result<()>
where
    T: Symbol,
    W: Write + ?Sized,
{
    // Write the header
    out.write_u32::<LittleEndian>(MAGIC)?;
    out.write_u32::<LittleEndian>(VERSION)?;

    // Create a compressor for the body
    let mut encoder = Encoder::new(out, options.compression_level)?;
    encoder.multithread(options.compression_threads)?;

    encoder.write_varint(suffix_array.len())?;
    encoder.write_all(header::digest(suffix_array.sequence())?.as_bytes())?;
    for &suffix in suffix_array.array() {
        encoder.write_varint(suffix)?;
    }

    encoder.finish()?;
    log::debug!("wrote suffix array of {} suffixes", suffix_array.array().len());

    Ok(())
}

/// Configuration for writing a suffix array.
///
/// The body of a stored suffix array is a run of varints, one per suffix. Neighboring entries are
/// unrelated positions, so the only redundancy left for the compressor is in the varint bytes
/// themselves: continuation bits and the high bytes that positions in the same region of the
/// sequence share.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct WriteConfig {
    compression_threads: u32,
    compression_level: i32,
}

impl WriteConfig {
    /// Creates a new configuration for write operations
    ///
    /// This configuration can be reused across write operations.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            compression_threads: Self::DEFAULT_COMPRESSION_THREADS,
            compression_level: Self::DEFAULT_COMPRESSION_LEVEL,
        }
    }

    /// Sets the number of compression worker threads.
    ///
    /// With 0, compression runs on the calling thread, interleaved with encoding the varints.
    pub fn compression_threads(&mut self, threads: u32) -> &mut Self {
        self.compression_threads = threads;
        self
    }

    /// Sets the compression level.
    ///
    /// The compression level can be set to any value between -7 and 22 inclusive. Any value
    /// outside of this range will be clamped to fit inside the range.
    pub fn compression_level(&mut self, level: i32) -> &mut Self {
        self.compression_level = level;
        self
    }

    /// The default number of compression worker threads
    ///
    /// One worker lets the calling thread keep encoding varints while the previous block is
    /// compressed. The varint stream is produced far faster than zstd consumes it at high levels,
    /// so further workers only add memory.
    pub const DEFAULT_COMPRESSION_THREADS: u32 = 1;

    /// The default compression level
    ///
    /// A suffix array is usually written once and loaded many times, and zstd decompresses at the
    /// same speed regardless of level. Level 19 finds the long-range matches between varint high
    /// bytes that low levels miss, at a cost paid only when the index is built.
    pub const DEFAULT_COMPRESSION_LEVEL: i32 = 19;
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self::new()
    }
}
