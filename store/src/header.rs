// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::io::{self, BufWriter, Write};

use blake3::{Hash, Hasher};
use integer_encoding::VarIntWriter;
use sufsort::Symbol;

pub(crate) const MAGIC: u32 = 0x5355_4653;
pub(crate) const VERSION: u32 = 1;

/// Hashes the symbol indices of `sequence`, each encoded as a varint.
pub(crate) fn digest<T: Symbol>(sequence: &[T]) -> io::Result<Hash> {
    let mut hasher = Hasher::new();

    {
        let mut writer = BufWriter::new(&mut hasher);
        for symbol in sequence {
            writer.write_varint(symbol.index() as u64)?;
        }
        writer.flush()?;
    }

    Ok(hasher.finalize())
}
