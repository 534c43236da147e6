// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{
    borrow::Cow,
    error::Error,
    fmt::{self, Display, Formatter},
    io::{self, Read},
};

use blake3::Hash;
use byteorder::{LittleEndian, ReadBytesExt};
use integer_encoding::VarIntReader;
use sufsort::{SuffixArray, Symbol};
use zstd::Decoder;

use crate::header::{self, MAGIC, VERSION};

/// An error indicating that loading a suffix array failed.
///
/// # Examples
///
/// ```
/// use sufstore::LoadError;
///
/// // Garbage data
/// let stored: &[u8] = &[0, 0, 0, 0];
/// let result = sufstore::read(&b"abc"[..], stored);
///
/// assert!(matches!(result, Err(LoadError::BadMagic(_))));
/// ```
#[derive(Debug)]
pub enum LoadError {
    /// An I/O error occurred
    Io(io::Error),
    /// The magic is invalid
    BadMagic(u32),
    /// The format version is unsupported
    UnsupportedVersion(u32),
    /// The stored suffix array belongs to a different sequence
    SequenceMismatch,
    /// The stored suffix array is not a permutation of the sequence positions
    Corrupt,
    /// The suffix array was rejected
    SuffixArray(sufsort::Error),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "I/O error: {e}"),
            LoadError::BadMagic(magic) => {
                write!(f, "bad magic: expected {MAGIC:x}, found {magic:x}")
            }
            LoadError::UnsupportedVersion(version) => {
                write!(
                    f,
                    "unsupported version: found {version}, supported versions are [{VERSION}]",
                )
            }
            LoadError::SequenceMismatch => {
                write!(f, "stored suffix array was built for a different sequence")
            }
            LoadError::Corrupt => write!(f, "stored suffix array is corrupt"),
            LoadError::SuffixArray(e) => write!(f, "invalid suffix array: {e}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Io(e) => e.source(),
            LoadError::SuffixArray(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(value: io::Error) -> Self {
        LoadError::Io(value)
    }
}

impl From<sufsort::Error> for LoadError {
    fn from(value: sufsort::Error) -> Self {
        LoadError::SuffixArray(value)
    }
}

/// Loads a suffix array of `sequence` written by [`write()`](crate::write()).
///
/// The stored length and sequence digest must match `sequence`. The symbols of `sequence` are not
/// validated against an alphabet.
///
/// # Errors
///
/// Returns an error if an I/O error occurs while reading, if the header is invalid, if the suffix
/// array was written for a different sequence, or if the stored suffix array is not a permutation
/// of the positions of `sequence`.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use sufsort::SuffixArray;
///
/// let text = b"mississippi";
/// let mut stored = Vec::new();
/// sufstore::write(&SuffixArray::new(&text[..], 256)?, &mut stored)?;
///
/// let sa = sufstore::read(&text[..], stored.as_slice())?;
/// assert_eq!(sa.find_range(b"ssi").len(), 2);
/// # Ok(())
/// # }
/// ```
pub fn read<'a, T, R>(
    sequence: impl Into<Cow<'a, [T]>>,
    mut stored: R,
) -> Result<SuffixArray<'a, T>, LoadError>
where
    T: Symbol,
    R: Read,
{
    let magic = stored.read_u32::<LittleEndian>()?;
    if magic != MAGIC {
        return Err(LoadError::BadMagic(magic));
    }

    let version = stored.read_u32::<LittleEndian>()?;
    if version != VERSION {
        return Err(LoadError::UnsupportedVersion(version));
    }

    let mut decoder = Decoder::new(stored)?;
    let sequence = sequence.into();

    let len: usize = decoder.read_varint()?;
    if len != sequence.len() {
        return Err(LoadError::SequenceMismatch);
    }

    let mut digest = [0; blake3::OUT_LEN];
    decoder.read_exact(&mut digest)?;
    if Hash::from(digest) != header::digest(&sequence)? {
        return Err(LoadError::SequenceMismatch);
    }

    let mut seen = vec![false; len + 1];
    let mut array = Vec::with_capacity(len + 1);
    for _ in 0..=len {
        let suffix: u32 = decoder.read_varint()?;
        match seen.get_mut(suffix as usize) {
            Some(slot @ false) => *slot = true,
            _ => return Err(LoadError::Corrupt),
        }
        array.push(suffix);
    }
    log::debug!("read suffix array of {} suffixes", array.len());

    Ok(SuffixArray::from_parts(sequence, array)?)
}
