// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use crate::{
    Error, Symbol,
    alphabet::{check_alphabet_size, check_symbols},
};

/// A Burrows-Wheeler transform in one of its two conventions.
///
/// Row `i` of the transform is the symbol preceding the `i`th smallest suffix. The suffix at
/// position 0 has no predecessor, so its row holds the end-of-text marker instead of a symbol.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Bwt<'a, T> {
    /// The transform without its end-of-text marker, one symbol per sequence position. `index` is
    /// the row at which the marker was removed.
    Indexed {
        /// The transformed symbols
        data: &'a [T],
        /// The row of the removed end-of-text marker
        index: usize,
    },
    /// The transform with its end-of-text marker, represented as `None`. Its length is one more
    /// than the sequence length.
    Terminated(&'a [Option<T>]),
}

/// Yields the rows of the transform of `text`, with `None` for the end-of-text marker.
pub(crate) fn rows<'b, T: Copy>(
    text: &'b [T],
    suffix_array: &'b [u32],
) -> impl ExactSizeIterator<Item = Option<T>> + 'b {
    suffix_array
        .iter()
        .map(|&suffix| suffix.checked_sub(1).map(|previous| text[previous as usize]))
}

/// Returns the row of the end-of-text marker, the rank of the whole sequence.
pub(crate) fn marker_row(suffix_array: &[u32]) -> usize {
    suffix_array
        .iter()
        .position(|&suffix| suffix == 0)
        .unwrap_or(0)
}

/// Writes the terminated transform of `text` into `output`, returning the row of the end-of-text
/// marker.
pub(crate) fn transform_terminated<T: Copy>(
    text: &[T],
    suffix_array: &[u32],
    output: &mut [Option<T>],
) -> Result<usize, Error> {
    check_output_len(suffix_array.len(), output.len())?;

    for (slot, row) in output.iter_mut().zip(rows(text, suffix_array)) {
        *slot = row;
    }

    Ok(marker_row(suffix_array))
}

/// Writes the indexed transform of `text` into `output`, returning the row of the end-of-text
/// marker.
pub(crate) fn transform_indexed<T: Copy>(
    text: &[T],
    suffix_array: &[u32],
    output: &mut [T],
) -> Result<usize, Error> {
    check_output_len(text.len(), output.len())?;

    for (slot, symbol) in output.iter_mut().zip(rows(text, suffix_array).flatten()) {
        *slot = symbol;
    }

    Ok(marker_row(suffix_array))
}

fn check_output_len(expected: usize, found: usize) -> Result<(), Error> {
    if found == expected {
        Ok(())
    } else {
        Err(Error::IncompatibleLengths { expected, found })
    }
}

/// Reconstructs a sequence from its Burrows-Wheeler transform.
///
/// `result` receives the sequence and must have the sequence's length: the length of the data for
/// [`Bwt::Indexed`] and one less for [`Bwt::Terminated`]. Every symbol must be below
/// `alphabet_size`.
///
/// This operation is *O*(*n* + *k*), where *k* is `alphabet_size`.
///
/// # Errors
///
/// * [`Error::IncompatibleLengths`] if `result` does not have the length implied by `bwt`
/// * [`Error::AlphabetSize`] if `alphabet_size` is not valid for `T`
/// * [`Error::OutOfAlphabet`] if a symbol of the transform is not below `alphabet_size`
/// * [`Error::MalformedBwt`] if the index is out of range, a terminated transform does not hold
///   exactly one end-of-text marker, or decoding reaches the marker before the sequence is full
///
/// # Examples
///
/// ```
/// use sufsort::{Bwt, SuffixArray, inverse_bwt};
///
/// let sa = SuffixArray::new(&b"banana"[..], 256).unwrap();
/// let (data, index) = sa.bwt();
///
/// let mut decoded = [0; 6];
/// inverse_bwt(Bwt::Indexed { data: &data, index }, &mut decoded, 256).unwrap();
/// assert_eq!(&decoded, b"banana");
/// ```
pub fn inverse_bwt<T: Symbol>(
    bwt: Bwt<'_, T>,
    result: &mut [T],
    alphabet_size: usize,
) -> Result<(), Error> {
    check_alphabet_size::<T>(alphabet_size)?;

    let rows = match bwt {
        Bwt::Indexed { data, index } => {
            check_output_len(data.len(), result.len())?;
            if index > data.len() {
                return Err(Error::MalformedBwt);
            }
            check_symbols(data, alphabet_size)?;

            let mut rows = Vec::with_capacity(data.len() + 1);
            rows.extend(data[..index].iter().copied().map(Some));
            rows.push(None);
            rows.extend(data[index..].iter().copied().map(Some));
            rows
        }
        Bwt::Terminated(data) => {
            check_output_len(data.len().saturating_sub(1), result.len())?;
            if data.iter().filter(|row| row.is_none()).count() != 1 {
                return Err(Error::MalformedBwt);
            }
            if let Some(position) = data
                .iter()
                .position(|row| row.is_some_and(|symbol| symbol.index() >= alphabet_size))
            {
                return Err(Error::OutOfAlphabet { position });
            }

            data.to_vec()
        }
    };

    // Occurrences of each row's symbol in the rows before it
    let mut counts = vec![0u32; alphabet_size];
    let mut occurrences = vec![0u32; rows.len()];
    for (row, occurrence) in rows.iter().zip(&mut occurrences) {
        if let Some(symbol) = row {
            let count = &mut counts[symbol.index()];
            *occurrence = *count;
            *count += 1;
        }
    }

    // First row of each symbol in the sorted first column, after the end-of-text row
    let mut first = Vec::with_capacity(alphabet_size);
    let mut offset = 1;
    for count in counts {
        first.push(offset);
        offset += count as usize;
    }

    // Row 0 holds the empty suffix, preceded by the last symbol
    let mut row = 0;
    for slot in result.iter_mut().rev() {
        let symbol = rows[row].ok_or(Error::MalformedBwt)?;
        *slot = symbol;
        row = first[symbol.index()] + occurrences[row] as usize;
    }

    Ok(())
}
