// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{
    collections::HashMap,
    fmt::Debug,
    hash::Hash,
};

use crate::Error;

/// A symbol type that can appear in a sequence indexed by a
/// [`SuffixArray`](crate::SuffixArray).
///
/// Every symbol maps to a dense rank through [`index()`](Symbol::index). A sequence is valid for
/// an alphabet of size `n` when every symbol's rank is in `[0, n)`. The ordering of the type must
/// agree with the ordering of the ranks for the ranks that are valid.
///
/// No value of any symbol type is reserved: the end of a sequence is tracked explicitly rather
/// than with an in-band sentinel, so the full range of each type is usable.
pub trait Symbol: Copy + Ord + Debug {
    /// The largest alphabet size supported by this type
    const ALPHABET_LIMIT: usize;

    /// Returns the rank of this symbol.
    ///
    /// Values that cannot be a rank (negative values of signed types) map to `usize::MAX`, which
    /// is outside every alphabet.
    fn index(self) -> usize;
}

macro_rules! impl_integer_symbol {
    ($($ty:ty => $limit:expr),* $(,)?) => {
        $(
            impl Symbol for $ty {
                const ALPHABET_LIMIT: usize = $limit;

                #[inline]
                fn index(self) -> usize {
                    usize::try_from(self).unwrap_or(usize::MAX)
                }
            }
        )*
    };
}

impl_integer_symbol! {
    u8 => 1 << u8::BITS,
    i8 => 1 << (i8::BITS - 1),
    u16 => 1 << u16::BITS,
    i16 => 1 << (i16::BITS - 1),
    u32 => u32::MAX as usize,
    i32 => i32::MAX as usize,
}

impl Symbol for char {
    const ALPHABET_LIMIT: usize = char::MAX as usize + 1;

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Checks that `size` is a usable alphabet size for symbols of type `T`.
pub(crate) fn check_alphabet_size<T: Symbol>(size: usize) -> Result<(), Error> {
    if size == 0 || size > T::ALPHABET_LIMIT {
        Err(Error::AlphabetSize {
            size,
            limit: T::ALPHABET_LIMIT,
        })
    } else {
        Ok(())
    }
}

/// Checks that every symbol of `sequence` has a rank below `size`.
pub(crate) fn check_symbols<T: Symbol>(sequence: &[T], size: usize) -> Result<(), Error> {
    match sequence.iter().position(|s| s.index() >= size) {
        Some(position) => Err(Error::OutOfAlphabet { position }),
        None => Ok(()),
    }
}

/// An explicit, ordered set of symbols.
///
/// Symbols are ranked in insertion order: the first symbol inserted has rank 0, the next rank 1,
/// and so on. Inserting a symbol that is already present does not change its rank. Sequences over
/// arbitrary hashable types can be mapped onto these ranks with [`encode()`](Alphabet::encode)
/// and then indexed as `u32` sequences.
///
/// # Examples
///
/// ```
/// use sufsort::Alphabet;
///
/// let alphabet: Alphabet<&str> = ["a", "b", "n"].into_iter().collect();
/// let encoded = alphabet.encode(&["b", "a", "n", "a", "n", "a"]).unwrap();
///
/// assert_eq!(encoded, [1, 0, 2, 0, 2, 0]);
/// ```
#[derive(Clone, Debug)]
pub struct Alphabet<S> {
    symbols: Vec<S>,
    ranks: HashMap<S, u32>,
}

impl<S> Alphabet<S>
where
    S: Eq + Hash + Clone,
{
    /// Creates an empty alphabet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
            ranks: HashMap::new(),
        }
    }

    /// Adds `symbol` to the end of the alphabet if it is not already present and returns its rank.
    ///
    /// # Panics
    ///
    /// Panics if the alphabet already holds `u32::MAX` symbols.
    pub fn insert(&mut self, symbol: S) -> u32 {
        if let Some(&rank) = self.ranks.get(&symbol) {
            return rank;
        }

        let rank = u32::try_from(self.symbols.len())
            .ok()
            .filter(|&r| r < u32::MAX)
            .expect("alphabet cannot hold more than u32::MAX symbols");
        self.symbols.push(symbol.clone());
        self.ranks.insert(symbol, rank);

        rank
    }

    /// Adds every symbol of `sequence` not yet present, in order of first occurrence.
    pub fn extend_from(&mut self, sequence: &[S]) {
        for symbol in sequence {
            if !self.ranks.contains_key(symbol) {
                self.insert(symbol.clone());
            }
        }
    }

    /// Returns the rank of `symbol`, if it is a member.
    pub fn rank(&self, symbol: &S) -> Option<u32> {
        self.ranks.get(symbol).copied()
    }

    /// Returns the symbol with the given rank.
    pub fn symbol(&self, rank: u32) -> Option<&S> {
        self.symbols.get(rank as usize)
    }

    /// The number of symbols in the alphabet
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if the alphabet has no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Maps `sequence` onto the ranks of this alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfAlphabet`] naming the first position whose symbol is not a member.
    pub fn encode(&self, sequence: &[S]) -> Result<Vec<u32>, Error> {
        sequence
            .iter()
            .enumerate()
            .map(|(position, symbol)| self.rank(symbol).ok_or(Error::OutOfAlphabet { position }))
            .collect()
    }

    /// Maps a sequence of ranks back onto the symbols of this alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfAlphabet`] naming the first position whose rank is out of range.
    pub fn decode(&self, ranks: &[u32]) -> Result<Vec<S>, Error> {
        ranks
            .iter()
            .enumerate()
            .map(|(position, &rank)| {
                self.symbol(rank)
                    .cloned()
                    .ok_or(Error::OutOfAlphabet { position })
            })
            .collect()
    }
}

impl<S> Default for Alphabet<S>
where
    S: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> FromIterator<S> for Alphabet<S>
where
    S: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut alphabet = Self::new();
        alphabet.extend(iter);
        alphabet
    }
}

impl<S> Extend<S> for Alphabet<S>
where
    S: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for symbol in iter {
            self.insert(symbol);
        }
    }
}

/// Maps the characters of `text` onto code-point ranks.
///
/// Characters whose code point is below `base` keep it as their rank. With `extend`, every other
/// character is given the next free rank at its first occurrence; without it, such a character is
/// rejected. Returns the ranks and the resulting alphabet size.
pub(crate) fn encode_code_points(
    text: &str,
    base: usize,
    extend: bool,
) -> Result<(Vec<u32>, usize), Error> {
    check_alphabet_size::<char>(base)?;

    let mut extra: HashMap<char, u32> = HashMap::new();
    let mut next = base;
    let mut ranks = Vec::with_capacity(text.len());
    for (position, ch) in text.chars().enumerate() {
        let code = ch as usize;
        let rank = if code < base {
            code
        } else if extend {
            *extra.entry(ch).or_insert_with(|| {
                let rank = next as u32;
                next += 1;
                rank
            }) as usize
        } else {
            return Err(Error::OutOfAlphabet { position });
        };
        ranks.push(rank as u32);
    }

    Ok((ranks, next))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_negative_is_never_a_member() {
        assert_eq!((-1i8).index(), usize::MAX);
        assert!(check_symbols(&[0i16, 3, -2], 4).is_err());
    }

    #[test]
    fn alphabet_size_limits() {
        assert!(check_alphabet_size::<u8>(256).is_ok());
        assert_eq!(
            check_alphabet_size::<u8>(257),
            Err(Error::AlphabetSize {
                size: 257,
                limit: 256
            }),
        );
        assert!(check_alphabet_size::<u16>(0).is_err());
        assert!(check_alphabet_size::<i8>(128).is_ok());
        assert!(check_alphabet_size::<i8>(129).is_err());
    }

    #[test]
    fn ranks_follow_insertion_order() {
        let mut alphabet = Alphabet::new();
        assert_eq!(alphabet.insert('z'), 0);
        assert_eq!(alphabet.insert('a'), 1);
        assert_eq!(alphabet.insert('z'), 0);

        assert_eq!(alphabet.len(), 2);
        assert_eq!(alphabet.symbol(1), Some(&'a'));
        assert_eq!(alphabet.encode(&['a', 'z', 'a']), Ok(vec![1, 0, 1]));
    }

    #[test]
    fn encode_reports_first_bad_position() {
        let alphabet: Alphabet<u64> = [10, 20].into_iter().collect();

        assert_eq!(
            alphabet.encode(&[10, 20, 30, 40]),
            Err(Error::OutOfAlphabet { position: 2 }),
        );
    }

    #[test]
    fn decode_inverts_encode() {
        let alphabet: Alphabet<String> = ["x", "y"].iter().map(|s| s.to_string()).collect();
        let words: Vec<String> = ["y", "x", "x"].iter().map(|s| s.to_string()).collect();
        let ranks = alphabet.encode(&words).unwrap();

        assert_eq!(alphabet.decode(&ranks).unwrap(), words);
    }

    #[test]
    fn extend_from_uses_first_occurrence() {
        let mut alphabet = Alphabet::new();
        alphabet.extend_from(b"banana");

        assert_eq!(alphabet.rank(&b'b'), Some(0));
        assert_eq!(alphabet.rank(&b'a'), Some(1));
        assert_eq!(alphabet.rank(&b'n'), Some(2));
    }

    #[test]
    fn code_points_extended_in_order_of_occurrence() {
        let (ranks, size) = encode_code_points("a☃b☺☃", 128, true).unwrap();

        assert_eq!(ranks, [97, 128, 98, 129, 128]);
        assert_eq!(size, 130);
    }

    #[test]
    fn code_points_rejected_without_extension() {
        assert_eq!(
            encode_code_points("ab☃", 128, false),
            Err(Error::OutOfAlphabet { position: 2 }),
        );
    }
}
