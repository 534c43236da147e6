// Copyright 2023-2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{
    borrow::Cow,
    cmp, fmt,
    hash::Hash,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    Alphabet, Error, MAX_LEN, Symbol,
    alphabet::{check_alphabet_size, check_symbols, encode_code_points},
    bwt,
    lcp::{self, LcpLr},
    range::SuffixRange,
    sais, search,
    subsequences::{self, Subsequences},
};

/// The alphabet used by [`SuffixArray::from_utf8()`]. No byte of valid UTF-8 is 0xF8 or above.
const UTF8_ALPHABET_SIZE: usize = 0xF8;

/// A suffix array over a sequence of symbols from a bounded alphabet.
///
/// The array has one entry per suffix of the sequence, including the empty suffix, which always
/// sorts first. The sequence is either borrowed or owned.
///
/// Three auxiliary tables can be built on demand and cached: the inverse suffix array, the LCP
/// array and the LCP-LR tables. Each has a getter that returns the cached table or builds a
/// temporary one, a `use_*` method that builds and caches it, a `has_*` method and a
/// `clear_cached_*` method. Queries use whatever is cached at the time they are made. The cache
/// is guarded by a lock, so a `SuffixArray` can be shared between threads.
pub struct SuffixArray<'a, T: Symbol> {
    sequence: Cow<'a, [T]>,
    array: Box<[u32]>,
    alphabet_size: Option<usize>,
    tables: Mutex<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    inverse: Option<Arc<[u32]>>,
    lcp: Option<Arc<[i32]>>,
    lcp_lr: Option<Arc<LcpLr>>,
}

impl<'a, T: Symbol> SuffixArray<'a, T> {
    /// Creates a new `SuffixArray` for `sequence` with default options.
    ///
    /// Every symbol of `sequence` must have an index below `alphabet_size`.
    ///
    /// This operation is *O*(*n* + *k*), where *k* is `alphabet_size`.
    ///
    /// # Errors
    ///
    /// * [`Error::AlphabetSize`] if `alphabet_size` is 0 or above `T::ALPHABET_LIMIT`
    /// * [`Error::OutOfAlphabet`] if a symbol is outside the alphabet
    /// * [`Error::TooLong`] if `sequence` is longer than [`MAX_LEN`]
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let sa = SuffixArray::new(&b"banana"[..], 256).unwrap();
    ///
    /// assert_eq!(sa.array(), [6, 5, 3, 1, 0, 4, 2]);
    /// ```
    pub fn new(sequence: impl Into<Cow<'a, [T]>>, alphabet_size: usize) -> Result<Self, Error> {
        Self::with_config(sequence, alphabet_size, &Config::default())
    }

    /// Creates a new `SuffixArray` for `sequence`.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`new()`](SuffixArray::new).
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::{Config, SuffixArray};
    ///
    /// let sa = SuffixArray::with_config(
    ///     &[3u16, 1, 4, 1, 5][..],
    ///     6,
    ///     Config::new().precompute_lcp_lr(true),
    /// )
    /// .unwrap();
    ///
    /// assert!(sa.has_lcp_lr());
    /// ```
    pub fn with_config(
        sequence: impl Into<Cow<'a, [T]>>,
        alphabet_size: usize,
        config: &Config,
    ) -> Result<Self, Error> {
        let sequence = sequence.into();

        check_alphabet_size::<T>(alphabet_size)?;
        if sequence.len() > MAX_LEN {
            return Err(Error::TooLong(sequence.len()));
        }
        check_symbols(&sequence, alphabet_size)?;

        log::debug!(
            "building suffix array of {} symbols over an alphabet of {alphabet_size}",
            sequence.len(),
        );
        let array = sais::sais(&sequence, alphabet_size, config.small_input_threshold);

        let suffix_array = Self {
            sequence,
            array: array.into_boxed_slice(),
            alphabet_size: Some(alphabet_size),
            tables: Mutex::default(),
        };
        suffix_array.precompute(config);

        Ok(suffix_array)
    }

    /// Creates a `SuffixArray` from a sequence and its previously computed suffix array.
    ///
    /// Only the lengths are checked: `array` must have exactly one more element than `sequence`.
    /// The symbols are not validated and the array is trusted to be the suffix array of
    /// `sequence`. Queries on a `SuffixArray` built from an invalid array may return wrong results
    /// or panic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleLengths`] if the lengths do not match, or [`Error::TooLong`] if
    /// `sequence` is longer than [`MAX_LEN`].
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let built = SuffixArray::new(&b"abcab"[..], 256).unwrap();
    /// let loaded = SuffixArray::from_parts(&b"abcab"[..], built.array().to_vec()).unwrap();
    ///
    /// assert_eq!(loaded.find_instance(b"ca"), Some(2));
    /// ```
    pub fn from_parts(
        sequence: impl Into<Cow<'a, [T]>>,
        array: impl Into<Box<[u32]>>,
    ) -> Result<Self, Error> {
        let sequence = sequence.into();
        let array = array.into();

        if sequence.len() > MAX_LEN {
            return Err(Error::TooLong(sequence.len()));
        }
        if array.len() != sequence.len() + 1 {
            return Err(Error::IncompatibleLengths {
                expected: sequence.len() + 1,
                found: array.len(),
            });
        }

        Ok(Self {
            sequence,
            array,
            alphabet_size: None,
            tables: Mutex::default(),
        })
    }

    fn precompute(&self, config: &Config) {
        if config.precompute_inverse {
            self.use_inverse();
        }
        if config.precompute_lcp {
            self.use_lcp();
        }
        if config.precompute_lcp_lr {
            self.use_lcp_lr();
        }
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the suffix array.
    ///
    /// Element `i` is the sequence position of the `i`th smallest suffix. Element 0 is always the
    /// sequence length, the position of the empty suffix.
    #[must_use]
    pub fn array(&self) -> &[u32] {
        &self.array
    }

    /// Returns the indexed sequence.
    #[must_use]
    pub fn sequence(&self) -> &[T] {
        &self.sequence
    }

    /// The length of the indexed sequence
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns `true` if the indexed sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// The alphabet size the sequence was validated against, or `None` if the suffix array was
    /// supplied by the caller
    #[must_use]
    pub fn alphabet_size(&self) -> Option<usize> {
        self.alphabet_size
    }

    /// Returns the inverse suffix array, building a temporary one if none is cached.
    ///
    /// Element `i` is the rank of the suffix starting at sequence position `i`.
    #[must_use]
    pub fn inverse(&self) -> Arc<[u32]> {
        if let Some(inverse) = self.tables().inverse.clone() {
            return inverse;
        }

        lcp::inverse(&self.array).into()
    }

    /// Builds the inverse suffix array if it is not cached, and caches it.
    pub fn use_inverse(&self) {
        let mut tables = self.tables();
        if tables.inverse.is_none() {
            log::debug!("caching inverse suffix array of {} suffixes", self.array.len());
            tables.inverse = Some(lcp::inverse(&self.array).into());
        }
    }

    /// Returns `true` if the inverse suffix array is cached.
    #[must_use]
    pub fn has_inverse(&self) -> bool {
        self.tables().inverse.is_some()
    }

    /// Drops the cached inverse suffix array, if any.
    pub fn clear_cached_inverse(&self) {
        if self.tables().inverse.take().is_some() {
            log::debug!("cleared cached inverse suffix array");
        }
    }

    fn build_lcp(&self, inverse: Option<&[u32]>) -> Arc<[i32]> {
        let lcp = match inverse {
            Some(inverse) => lcp::kasai(&self.sequence, &self.array, inverse),
            None => lcp::kasai(&self.sequence, &self.array, &lcp::inverse(&self.array)),
        };
        lcp.into()
    }

    /// Returns the LCP array, building a temporary one if none is cached.
    ///
    /// Element `i` is the length of the longest common prefix of the suffixes at suffix array
    /// positions `i - 1` and `i`. Element 0 has no predecessor and is -1. Building the array uses
    /// the cached inverse suffix array if there is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let sa = SuffixArray::new(&b"banana"[..], 256).unwrap();
    ///
    /// assert_eq!(*sa.lcp(), [-1, 0, 1, 3, 0, 0, 2]);
    /// ```
    #[must_use]
    pub fn lcp(&self) -> Arc<[i32]> {
        let inverse = {
            let tables = self.tables();
            if let Some(lcp) = &tables.lcp {
                return Arc::clone(lcp);
            }
            tables.inverse.clone()
        };

        self.build_lcp(inverse.as_deref())
    }

    /// Builds the LCP array if it is not cached, and caches it.
    pub fn use_lcp(&self) {
        let mut tables = self.tables();
        if tables.lcp.is_none() {
            log::debug!("caching LCP array of {} suffixes", self.array.len());
            tables.lcp = Some(self.build_lcp(tables.inverse.as_deref()));
        }
    }

    /// Returns `true` if the LCP array is cached.
    #[must_use]
    pub fn has_lcp(&self) -> bool {
        self.tables().lcp.is_some()
    }

    /// Drops the cached LCP array, if any.
    pub fn clear_cached_lcp(&self) {
        if self.tables().lcp.take().is_some() {
            log::debug!("cleared cached LCP array");
        }
    }

    fn build_lcp_lr(&self, tables: &Tables) -> Option<Arc<LcpLr>> {
        let lcp = match &tables.lcp {
            Some(lcp) => Arc::clone(lcp),
            None => self.build_lcp(tables.inverse.as_deref()),
        };
        LcpLr::build(&lcp).map(Arc::new)
    }

    /// Returns the LCP-LR tables, building temporary ones if none are cached.
    ///
    /// Returns `None` for sequences shorter than 2, which need no search acceleration. Building
    /// the tables uses the cached LCP array if there is one.
    #[must_use]
    pub fn lcp_lr(&self) -> Option<Arc<LcpLr>> {
        let tables = self.tables();
        if let Some(lcp_lr) = &tables.lcp_lr {
            return Some(Arc::clone(lcp_lr));
        }

        self.build_lcp_lr(&tables)
    }

    /// Builds the LCP-LR tables if they are not cached, and caches them.
    ///
    /// Once cached, [`find_subsequence()`](SuffixArray::find_subsequence) and
    /// [`lcp_length()`](SuffixArray::lcp_length) use them. Sequences shorter than 2 have no
    /// tables, so nothing is cached for them.
    pub fn use_lcp_lr(&self) {
        let mut tables = self.tables();
        if tables.lcp_lr.is_none() {
            log::debug!("caching LCP-LR tables of {} suffixes", self.array.len());
            tables.lcp_lr = self.build_lcp_lr(&tables);
        }
    }

    /// Returns `true` if the LCP-LR tables are cached.
    #[must_use]
    pub fn has_lcp_lr(&self) -> bool {
        self.tables().lcp_lr.is_some()
    }

    /// Drops the cached LCP-LR tables, if any.
    pub fn clear_cached_lcp_lr(&self) {
        if self.tables().lcp_lr.take().is_some() {
            log::debug!("cleared cached LCP-LR tables");
        }
    }

    /// Returns the length of the longest common prefix of the suffixes at suffix array positions
    /// `i1` and `i2`.
    ///
    /// The result does not depend on the argument order. When `i1 == i2`, it is the length of the
    /// suffix itself. The cached LCP-LR tables are used if present, then the cached LCP array,
    /// and otherwise the suffixes are compared directly.
    ///
    /// # Panics
    ///
    /// Panics if either position is greater than [`len()`](SuffixArray::len).
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let sa = SuffixArray::new(&b"banana"[..], 256).unwrap();
    ///
    /// // "ana" and "anana"
    /// assert_eq!(sa.lcp_length(2, 3), 3);
    /// // "a" and "nana"
    /// assert_eq!(sa.lcp_length(6, 1), 0);
    /// ```
    #[must_use]
    pub fn lcp_length(&self, i1: usize, i2: usize) -> usize {
        let len = self.sequence.len();
        assert!(
            i1 <= len && i2 <= len,
            "suffix array position out of bounds: ({i1}, {i2}) with length {len}",
        );

        if i1 == i2 {
            return len - self.array[i1] as usize;
        }

        let (from, to) = (cmp::min(i1, i2), cmp::max(i1, i2));
        // The empty suffix shares nothing
        if from == 0 {
            return 0;
        }

        let (lcp, lcp_lr) = {
            let tables = self.tables();
            (tables.lcp.clone(), tables.lcp_lr.clone())
        };

        if let Some(lcp_lr) = lcp_lr {
            return lcp_lr.range_min(from, to) as usize;
        }
        match lcp {
            Some(lcp) => self.scan_lcp(&lcp, from, to),
            None => self.compare_suffixes(from, to),
        }
    }

    fn compare_suffixes(&self, i1: usize, i2: usize) -> usize {
        lcp::common_prefix(
            &self.sequence[self.array[i1] as usize..],
            &self.sequence[self.array[i2] as usize..],
        )
    }

    // Takes the minimum over lcp[from + 1..=to], switching to a direct comparison once the
    // remaining gap is longer than the minimum found so far
    fn scan_lcp(&self, lcp: &[i32], from: usize, to: usize) -> usize {
        let mut limit = match usize::try_from(lcp[to]) {
            Ok(0) | Err(_) => return 0,
            Ok(limit) => limit,
        };

        let mut j = to - 1;
        while j > from {
            if j - from > limit {
                return cmp::min(limit, self.compare_suffixes(from, j));
            }

            limit = cmp::min(limit, lcp[j].max(0) as usize);
            if limit == 0 {
                return 0;
            }
            j -= 1;
        }

        limit
    }

    /// Returns the suffix array position of some suffix starting with `pattern`.
    ///
    /// Uses the cached LCP-LR tables if present, which makes this operation
    /// *O*(*m* + log(*n*)), where `m` is `pattern.len()`. Otherwise, this operation is
    /// *O*(*m* \* log(*n*)). An empty pattern never matches.
    ///
    /// To search for part of a pattern, pass a subslice of it.
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let sa = SuffixArray::new(&b"Hello, world!"[..], 256).unwrap();
    ///
    /// assert!(sa.find_subsequence(b"world").is_some());
    /// assert!(sa.find_subsequence(b"word").is_none());
    /// ```
    #[must_use]
    pub fn find_subsequence(&self, pattern: &[T]) -> Option<usize> {
        let lcp_lr = self.tables().lcp_lr.clone();

        match lcp_lr {
            Some(lcp_lr) => {
                search::find_any_accelerated(&self.sequence, &self.array, &lcp_lr, pattern)
            }
            None => search::find_any(&self.sequence, &self.array, pattern),
        }
    }

    /// Returns the leftmost suffix array position of a suffix starting with `pattern`.
    #[must_use]
    pub fn find_first(&self, pattern: &[T]) -> Option<usize> {
        search::find_first(&self.sequence, &self.array, pattern)
    }

    /// Returns the rightmost suffix array position of a suffix starting with `pattern`.
    #[must_use]
    pub fn find_last(&self, pattern: &[T]) -> Option<usize> {
        search::find_last(&self.sequence, &self.array, pattern)
    }

    /// Returns the sequence position of some occurrence of `pattern`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let sa = SuffixArray::new(&b"Hello, world!"[..], 256).unwrap();
    ///
    /// assert_eq!(sa.find_instance(b"world"), Some(7));
    /// ```
    #[must_use]
    pub fn find_instance(&self, pattern: &[T]) -> Option<usize> {
        self.find_subsequence(pattern)
            .map(|position| self.array[position] as usize)
    }

    /// Returns the sequence position of the occurrence of `pattern` whose suffix is smallest.
    #[must_use]
    pub fn find_first_instance(&self, pattern: &[T]) -> Option<usize> {
        self.find_first(pattern)
            .map(|position| self.array[position] as usize)
    }

    /// Returns the sequence position of the occurrence of `pattern` whose suffix is largest.
    #[must_use]
    pub fn find_last_instance(&self, pattern: &[T]) -> Option<usize> {
        self.find_last(pattern)
            .map(|position| self.array[position] as usize)
    }

    /// Returns the range of the suffix array holding every occurrence of `pattern`.
    ///
    /// The range is empty if `pattern` is empty or does not occur. With a cached LCP-LR table, one
    /// occurrence is located with it first and the ends of the range are searched on either side
    /// of that occurrence only.
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let sa = SuffixArray::new(&b"banana"[..], 256).unwrap();
    /// let range = sa.find_range(b"ana");
    ///
    /// assert_eq!(range.len(), 2);
    /// assert_eq!(range.sequence_order(), [1, 3]);
    /// ```
    #[must_use]
    pub fn find_range(&self, pattern: &[T]) -> SuffixRange<'_> {
        let lcp_lr = self.tables().lcp_lr.clone();
        let bounds = match lcp_lr {
            Some(lcp_lr) => {
                search::find_any_accelerated(&self.sequence, &self.array, &lcp_lr, pattern).map(
                    |hit| search::find_bounds_around(&self.sequence, &self.array, pattern, hit),
                )
            }
            None => self.find_first(pattern).zip(self.find_last(pattern)),
        };

        match bounds {
            Some((first, last)) => SuffixRange::new(&self.array, first, last + 1, pattern.len()),
            None => SuffixRange::empty(&self.array),
        }
    }

    /// Returns the Burrows-Wheeler transform of the sequence without its end-of-text marker,
    /// together with the row where the marker was removed.
    ///
    /// The result can be passed to [`inverse_bwt()`](crate::inverse_bwt) as a
    /// [`Bwt::Indexed`](crate::Bwt::Indexed).
    #[must_use]
    pub fn bwt(&self) -> (Vec<T>, usize) {
        let data = bwt::rows(&self.sequence, &self.array).flatten().collect();
        (data, bwt::marker_row(&self.array))
    }

    /// Writes the Burrows-Wheeler transform of the sequence without its end-of-text marker into
    /// `output`, returning the row where the marker was removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleLengths`] if `output` is not exactly as long as the sequence.
    pub fn bwt_into(&self, output: &mut [T]) -> Result<usize, Error> {
        bwt::transform_indexed(&self.sequence, &self.array, output)
    }

    /// Returns the Burrows-Wheeler transform of the sequence with `None` as its end-of-text
    /// marker, together with the row of the marker.
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let sa = SuffixArray::new(&b"abc"[..], 256).unwrap();
    /// let (rows, index) = sa.bwt_terminated();
    ///
    /// assert_eq!(rows, [Some(b'c'), None, Some(b'a'), Some(b'b')]);
    /// assert_eq!(index, 1);
    /// ```
    #[must_use]
    pub fn bwt_terminated(&self) -> (Vec<Option<T>>, usize) {
        let rows = bwt::rows(&self.sequence, &self.array).collect();
        (rows, bwt::marker_row(&self.array))
    }

    /// Writes the Burrows-Wheeler transform of the sequence with `None` as its end-of-text marker
    /// into `output`, returning the row of the marker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleLengths`] if `output` is not exactly one longer than the
    /// sequence.
    pub fn bwt_terminated_into(&self, output: &mut [Option<T>]) -> Result<usize, Error> {
        bwt::transform_terminated(&self.sequence, &self.array, output)
    }

    /// Returns the number of distinct non-empty subsequences of the sequence.
    ///
    /// Uses the cached LCP array, or builds a temporary one.
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let sa = SuffixArray::new(&b"aaa"[..], 256).unwrap();
    ///
    /// // "a", "aa" and "aaa"
    /// assert_eq!(sa.count_unique_subsequences(), 3);
    /// ```
    #[must_use]
    pub fn count_unique_subsequences(&self) -> u64 {
        subsequences::count_unique(&self.array, &self.lcp())
    }

    /// Returns an iterator over the distinct non-empty subsequences of the sequence as
    /// `(start, len)` pairs, in lexicographic order.
    ///
    /// Uses the cached LCP array, or builds a temporary one that lives as long as the iterator.
    pub fn subsequences(&self) -> Subsequences<'_> {
        Subsequences::new(&self.array, self.lcp())
    }
}

impl SuffixArray<'static, u32> {
    /// Creates a new `SuffixArray` for a sequence over an explicit alphabet.
    ///
    /// Each symbol is replaced by its rank in `alphabet`, so suffixes are ordered by the order
    /// in which symbols were added to the alphabet. Patterns must be encoded with
    /// [`Alphabet::encode()`] before searching.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfAlphabet`] if a symbol is not in `alphabet`, as well as the errors
    /// of [`new()`](SuffixArray::new).
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::{Alphabet, SuffixArray};
    ///
    /// let alphabet: Alphabet<&str> = ["to", "be", "or", "not"].into_iter().collect();
    /// let words = ["to", "be", "or", "not", "to", "be"];
    /// let sa = SuffixArray::with_alphabet(&words, &alphabet).unwrap();
    ///
    /// let pattern = alphabet.encode(&["to", "be"]).unwrap();
    /// assert_eq!(sa.find_range(&pattern).sequence_order(), [0, 4]);
    /// ```
    pub fn with_alphabet<S>(sequence: &[S], alphabet: &Alphabet<S>) -> Result<Self, Error>
    where
        S: Eq + Hash + Clone,
    {
        let encoded = alphabet.encode(sequence)?;
        Self::new(encoded, alphabet.len())
    }

    /// Creates a new `SuffixArray` for the characters of `text`, ranked by code point.
    ///
    /// Characters with a code point below `alphabet_size` are ranked by their code point. With
    /// `extend`, any other character is appended to the alphabet at its first occurrence;
    /// without it, such a character is rejected. The sequence of the result holds the ranks, so
    /// patterns made of characters below `alphabet_size` can be encoded as their code points.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfAlphabet`] for a character outside the alphabet (only without
    /// `extend`), as well as the errors of [`new()`](SuffixArray::new).
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let sa = SuffixArray::from_chars("naïve ☃ naïve", 128, true).unwrap();
    ///
    /// // ï and ☃ are appended to the alphabet of 128 code points
    /// assert_eq!(sa.alphabet_size(), Some(130));
    /// assert_eq!(sa.find_range(&[b'a' as u32, 128]).len(), 2);
    /// assert!(sa.find_range(&[b'n' as u32, 128]).is_empty());
    /// ```
    pub fn from_chars(text: &str, alphabet_size: usize, extend: bool) -> Result<Self, Error> {
        let (ranks, alphabet_size) = encode_code_points(text, alphabet_size, extend)?;
        Self::new(ranks, alphabet_size)
    }
}

impl<'a> SuffixArray<'a, u8> {
    /// Creates a new `SuffixArray` for the UTF-8 bytes of `text`.
    ///
    /// Patterns are searched for as bytes, so any `&str` pattern can be passed as
    /// [`str::as_bytes()`].
    ///
    /// # Panics
    ///
    /// Panics if `text` is longer than [`MAX_LEN`] bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::SuffixArray;
    ///
    /// let sa = SuffixArray::from_utf8("Grüße, Jürgen");
    ///
    /// assert_eq!(sa.find_range("ü".as_bytes()).sequence_order(), [2, 10]);
    /// ```
    #[must_use]
    pub fn from_utf8(text: &'a str) -> Self {
        assert!(text.len() <= MAX_LEN, "text of {} bytes is too long", text.len());

        let sequence = text.as_bytes();
        let array = sais::sais(sequence, UTF8_ALPHABET_SIZE, Config::DEFAULT_SMALL_INPUT_THRESHOLD);

        Self {
            sequence: Cow::Borrowed(sequence),
            array: array.into_boxed_slice(),
            alphabet_size: Some(UTF8_ALPHABET_SIZE),
            tables: Mutex::default(),
        }
    }
}

impl<T: Symbol> fmt::Debug for SuffixArray<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.tables();
        f.debug_struct("SuffixArray")
            .field("len", &self.sequence.len())
            .field("alphabet_size", &self.alphabet_size)
            .field("has_inverse", &tables.inverse.is_some())
            .field("has_lcp", &tables.lcp.is_some())
            .field("has_lcp_lr", &tables.lcp_lr.is_some())
            .finish_non_exhaustive()
    }
}

/// Configuration for building a suffix array.
///
/// This struct can be used to tune construction and to build auxiliary tables up front. The
/// defaults build only the suffix array itself.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    small_input_threshold: usize,
    precompute_inverse: bool,
    precompute_lcp: bool,
    precompute_lcp_lr: bool,
}

impl Config {
    /// Creates a new configuration with the default options
    ///
    /// This configuration can be reused across constructions.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            small_input_threshold: Self::DEFAULT_SMALL_INPUT_THRESHOLD,
            precompute_inverse: Self::DEFAULT_PRECOMPUTE,
            precompute_lcp: Self::DEFAULT_PRECOMPUTE,
            precompute_lcp_lr: Self::DEFAULT_PRECOMPUTE,
        }
    }

    /// Sets the length below which a sequence is sorted by comparing suffixes directly.
    ///
    /// The threshold applies at every level of the recursive construction. Short sequences sort
    /// faster by comparison than by induced sorting, whose setup dominates at small sizes. Values
    /// below 2 behave like 2.
    pub fn small_input_threshold(&mut self, threshold: usize) -> &mut Self {
        self.small_input_threshold = threshold;
        self
    }

    /// Sets whether to build and cache the inverse suffix array at construction.
    pub fn precompute_inverse(&mut self, precompute: bool) -> &mut Self {
        self.precompute_inverse = precompute;
        self
    }

    /// Sets whether to build and cache the LCP array at construction.
    pub fn precompute_lcp(&mut self, precompute: bool) -> &mut Self {
        self.precompute_lcp = precompute;
        self
    }

    /// Sets whether to build and cache the LCP-LR tables at construction.
    ///
    /// With the tables cached, searches run in *O*(*m* + log(*n*)).
    pub fn precompute_lcp_lr(&mut self, precompute: bool) -> &mut Self {
        self.precompute_lcp_lr = precompute;
        self
    }

    /// The default length below which sequences are sorted directly
    pub const DEFAULT_SMALL_INPUT_THRESHOLD: usize = 22;

    /// Whether auxiliary tables are built at construction by default
    pub const DEFAULT_PRECOMPUTE: bool = false;
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &[u8] = b"The quick brown fox jumped over the lazy dog because the fox was quick";

    #[test]
    fn banana() {
        let sa = SuffixArray::new(&b"banana"[..], 256).unwrap();

        assert_eq!(sa.array(), [6, 5, 3, 1, 0, 4, 2]);
        assert_eq!(sa.len(), 6);
        assert_eq!(sa.find_range(b"ana").sequence_order(), [1, 3]);
    }

    #[test]
    fn degenerate() {
        let empty = SuffixArray::new(&b""[..], 1).unwrap();
        assert_eq!(empty.array(), [0]);
        assert!(empty.is_empty());
        assert_eq!(empty.count_unique_subsequences(), 0);
        assert_eq!(empty.find_subsequence(b"a"), None);
        assert_eq!(empty.lcp_lr().map(|_| ()), None);

        let single = SuffixArray::new(&[0u8][..], 1).unwrap();
        assert_eq!(single.array(), [1, 0]);
        assert_eq!(single.find_instance(&[0]), Some(0));
        single.use_lcp_lr();
        assert!(!single.has_lcp_lr());
    }

    #[test]
    fn rejects_invalid_input() {
        assert_eq!(
            SuffixArray::new(&b"abc"[..], 0).err(),
            Some(Error::AlphabetSize { size: 0, limit: 256 }),
        );
        assert_eq!(
            SuffixArray::new(&b"abc"[..], 99).err(),
            Some(Error::OutOfAlphabet { position: 2 }),
        );
        assert_eq!(
            SuffixArray::new(&b"abc"[..], 97).err(),
            Some(Error::OutOfAlphabet { position: 0 }),
        );
        assert_eq!(
            SuffixArray::new(&[0i8, 2, -1][..], 3).err(),
            Some(Error::OutOfAlphabet { position: 2 }),
        );
        assert_eq!(
            SuffixArray::from_parts(&b"abc"[..], vec![0u32, 1, 2]).err(),
            Some(Error::IncompatibleLengths {
                expected: 4,
                found: 3
            }),
        );
    }

    #[test]
    fn find_variants() {
        let sa = SuffixArray::new(FOX, 256).unwrap();

        let first = sa.find_first(b"quick").unwrap();
        let last = sa.find_last(b"quick").unwrap();
        assert_eq!(last - first, 1);
        assert!(sa.find_subsequence(b"quick").is_some_and(|i| i == first || i == last));

        let mut instances = [sa.find_first_instance(b"quick"), sa.find_last_instance(b"quick")];
        instances.sort_unstable();
        assert_eq!(instances, [Some(4), Some(65)]);

        assert_eq!(sa.find_instance(b"lazy"), Some(36));
        assert!(sa.find_range(b"fox").iter().all(|p| p == 16 || p == 57));
        assert!(sa.find_range(b"cat").is_empty());
        assert!(sa.find_range(b"").is_empty());
    }

    #[test]
    fn bounded_pattern() {
        let sa = SuffixArray::new(FOX, 256).unwrap();
        let pattern = b"a brown bear";

        assert_eq!(sa.find_instance(&pattern[2..7]), Some(10));
        assert!(sa.find_range(&pattern[4..4]).is_empty());
    }

    #[test]
    fn accelerated_search_agrees() {
        let sa = SuffixArray::new(FOX, 256).unwrap();
        let plain: Vec<_> = (0..FOX.len())
            .map(|start| sa.find_instance(&FOX[start..(start + 5).min(FOX.len())]))
            .collect();

        sa.use_lcp_lr();
        assert!(sa.has_lcp_lr());
        assert!(!sa.has_lcp(), "LCP-LR tables are built from a temporary LCP array");

        for (start, found) in plain.into_iter().enumerate() {
            let pattern = &FOX[start..(start + 5).min(FOX.len())];
            let position = sa.find_instance(pattern).unwrap();
            assert!(found.is_some());
            assert_eq!(&FOX[position..position + pattern.len()], pattern);
        }
    }

    #[test]
    fn lcp_length_strategies_agree() {
        let sa = SuffixArray::new(FOX, 256).unwrap();
        let positions = 0..=FOX.len();

        let direct: Vec<usize> = positions
            .clone()
            .flat_map(|i| positions.clone().map(move |j| (i, j)))
            .map(|(i, j)| sa.lcp_length(i, j))
            .collect();

        sa.use_lcp();
        let scanned: Vec<usize> = positions
            .clone()
            .flat_map(|i| positions.clone().map(move |j| (i, j)))
            .map(|(i, j)| sa.lcp_length(i, j))
            .collect();
        assert_eq!(direct, scanned);

        sa.use_lcp_lr();
        let accelerated: Vec<usize> = positions
            .clone()
            .flat_map(|i| positions.clone().map(move |j| (i, j)))
            .map(|(i, j)| sa.lcp_length(i, j))
            .collect();
        assert_eq!(direct, accelerated);
    }

    #[test]
    fn lcp_length_symmetric() {
        let sa = SuffixArray::new(&b"mississippi"[..], 256).unwrap();

        for i in 0..=11 {
            assert_eq!(sa.lcp_length(i, i), 11 - sa.array()[i] as usize);
            for j in 0..=11 {
                assert_eq!(sa.lcp_length(i, j), sa.lcp_length(j, i));
            }
        }
    }

    #[test]
    #[should_panic]
    fn lcp_length_out_of_bounds() {
        let sa = SuffixArray::new(&b"abc"[..], 256).unwrap();
        let _ = sa.lcp_length(0, 4);
    }

    #[test]
    fn range_with_lcp_lr() {
        let text = &b"abracadabra abracadabra cadabra"[..];
        let plain = SuffixArray::new(text, 256).unwrap();
        let accelerated =
            SuffixArray::with_config(text, 256, Config::new().precompute_lcp_lr(true)).unwrap();
        assert!(accelerated.has_lcp_lr());

        for start in 0..text.len() {
            for end in start + 1..=text.len() {
                let pattern = &text[start..end];
                let expected = plain.find_range(pattern);
                let found = accelerated.find_range(pattern);

                assert_eq!(found.as_slice(), expected.as_slice(), "{pattern:?}");
                assert_eq!(found.start(), expected.start(), "{pattern:?}");
            }
        }
        assert!(accelerated.find_range(b"abrax").is_empty());
        assert!(accelerated.find_range(b"").is_empty());
    }

    #[test]
    fn table_triads() {
        let sa = SuffixArray::new(&b"abracadabra"[..], 256).unwrap();
        assert!(!sa.has_inverse() && !sa.has_lcp() && !sa.has_lcp_lr());

        let temporary = sa.inverse();
        assert!(!sa.has_inverse());

        sa.use_inverse();
        assert!(sa.has_inverse());
        assert_eq!(sa.inverse(), temporary);
        for (i, &suffix) in sa.array().iter().enumerate() {
            assert_eq!(sa.inverse()[suffix as usize] as usize, i);
        }

        sa.use_lcp();
        let lcp = sa.lcp();
        assert!(Arc::ptr_eq(&lcp, &sa.lcp()));

        sa.clear_cached_inverse();
        sa.clear_cached_lcp();
        assert!(!sa.has_inverse() && !sa.has_lcp());
        assert_eq!(sa.lcp(), lcp);

        sa.use_lcp_lr();
        sa.clear_cached_lcp_lr();
        assert!(!sa.has_lcp_lr());
    }

    #[test]
    fn config_precomputes_tables() {
        let sa = SuffixArray::with_config(
            FOX,
            256,
            Config::new()
                .small_input_threshold(0)
                .precompute_inverse(true)
                .precompute_lcp(true),
        )
        .unwrap();

        assert!(sa.has_inverse());
        assert!(sa.has_lcp());
        assert!(!sa.has_lcp_lr());
        assert_eq!(sa.array(), SuffixArray::new(FOX, 256).unwrap().array());
    }

    #[test]
    fn bwt_conventions() {
        let sa = SuffixArray::new(&b"banana"[..], 256).unwrap();

        let (data, index) = sa.bwt();
        assert_eq!(data, b"annbaa");
        assert_eq!(index, 4);

        let mut output = [0; 6];
        assert_eq!(sa.bwt_into(&mut output), Ok(4));

        let (rows, marker) = sa.bwt_terminated();
        assert_eq!(marker, 4);
        assert_eq!(rows.iter().flatten().copied().collect::<Vec<_>>(), data);

        let mut short = [None; 6];
        assert!(sa.bwt_terminated_into(&mut short).is_err());
    }

    #[test]
    fn count_repeated() {
        let sa = SuffixArray::new(&b"aaa"[..], 256).unwrap();

        assert_eq!(sa.count_unique_subsequences(), 3);
        assert_eq!(sa.subsequences().collect::<Vec<_>>(), [(2, 1), (1, 2), (0, 3)]);
    }

    #[test]
    fn wide_symbols() {
        let text: Vec<u16> = vec![60_000, 2, 60_000, 2, 9];
        let sa = SuffixArray::new(&text[..], 65_536).unwrap();

        assert_eq!(sa.find_range(&[60_000, 2]).sequence_order(), [0, 2]);

        let chars: Vec<char> = "snow☃snow".chars().collect();
        let sa = SuffixArray::new(chars, char::ALPHABET_LIMIT).unwrap();
        assert_eq!(sa.find_instance(&['☃']), Some(4));
    }

    #[test]
    fn explicit_alphabet_order() {
        // z sorts before a in this alphabet
        let alphabet: Alphabet<char> = ['z', 'a'].into_iter().collect();
        let sa = SuffixArray::with_alphabet(&['a', 'z', 'a'], &alphabet).unwrap();

        assert_eq!(sa.array(), [3, 1, 2, 0]);
    }

    #[test]
    fn chars_without_extension() {
        assert_eq!(
            SuffixArray::from_chars("ab☃", 128, false).err(),
            Some(Error::OutOfAlphabet { position: 2 }),
        );

        let sa = SuffixArray::from_chars("abcabc", 128, false).unwrap();
        assert_eq!(sa.find_range(&[b'b' as u32, b'c' as u32]).len(), 2);
    }

    #[test]
    fn shared_between_threads() {
        let sa = SuffixArray::from_utf8("the rain in spain stays mainly in the plain");

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    sa.use_lcp_lr();
                    assert_eq!(sa.find_range(b"ain").len(), 4);
                });
            }
        });

        assert!(sa.has_lcp_lr());
    }
}
