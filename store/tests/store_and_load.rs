// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

#![allow(missing_docs)]

use std::{
    error::Error,
    fs::{self, File},
    path::Path,
};

use sufsort::{Config, SuffixArray};
use sufstore::{LoadError, WriteConfig};

const STORED_FILE_NAME: &str = "lorem.sa";

fn lorem() -> Vec<u8> {
    let words = [
        "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
        "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua",
    ];

    // Deterministic word salad with plenty of repeats
    let mut text = Vec::new();
    for i in 0..5000usize {
        text.extend_from_slice(words[(i * 7 + i / 3) % words.len()].as_bytes());
        text.push(if i % 11 == 10 { b'.' } else { b' ' });
    }
    text
}

#[test]
fn lorem_ipsum() -> Result<(), Box<dyn Error>> {
    let workspace_dir = Path::new(env!("CARGO_TARGET_TMPDIR"));
    let stored_path = workspace_dir.join(STORED_FILE_NAME);
    let text = lorem();

    // Store the suffix array
    let built = SuffixArray::with_config(&text[..], 256, Config::new().precompute_lcp(true))?;
    {
        let mut out = File::create(&stored_path)?;
        sufstore::write_with_config(&built, &mut out, WriteConfig::new().compression_level(3))?;
    }

    // The stored array should be smaller than the raw one
    assert!(fs::metadata(&stored_path)?.len() < (built.array().len() * 4) as u64);

    // Load it back next to the same text
    let loaded = sufstore::read(&text[..], File::open(&stored_path)?)?;

    assert_eq!(loaded.array(), built.array());
    assert_eq!(loaded.alphabet_size(), None);
    assert_eq!(
        loaded.find_range(b"dolore magna").sequence_order(),
        built.find_range(b"dolore magna").sequence_order(),
    );
    assert_eq!(loaded.count_unique_subsequences(), built.count_unique_subsequences());

    Ok(())
}

#[test]
fn rejects_other_sequence() -> Result<(), Box<dyn Error>> {
    let text = lorem();
    let mut stored = Vec::new();
    sufstore::write(&SuffixArray::new(&text[..], 256)?, &mut stored)?;

    // Same length, one symbol changed
    let mut other = text.clone();
    other[100] = b'#';
    assert!(matches!(
        sufstore::read(&other[..], stored.as_slice()),
        Err(LoadError::SequenceMismatch),
    ));

    // Different length
    assert!(matches!(
        sufstore::read(&text[1..], stored.as_slice()),
        Err(LoadError::SequenceMismatch),
    ));

    Ok(())
}

#[test]
fn rejects_bad_header() -> Result<(), Box<dyn Error>> {
    let text = b"abracadabra";
    let mut stored = Vec::new();
    sufstore::write(&SuffixArray::new(&text[..], 256)?, &mut stored)?;

    let mut wrong_version = stored.clone();
    wrong_version[4] = 2;
    assert!(matches!(
        sufstore::read(&text[..], wrong_version.as_slice()),
        Err(LoadError::UnsupportedVersion(2)),
    ));

    let truncated = &stored[..stored.len() / 2];
    assert!(matches!(sufstore::read(&text[..], truncated), Err(LoadError::Io(_))));

    Ok(())
}

#[test]
fn wide_symbols() -> Result<(), Box<dyn Error>> {
    let text: Vec<u32> = (0..2000u32).map(|i| (i * i) % 1009).collect();
    let built = SuffixArray::new(&text[..], 1009)?;
    let mut stored = Vec::new();
    sufstore::write(&built, &mut stored)?;

    let loaded = sufstore::read(text.clone(), stored.as_slice())?;

    assert_eq!(loaded.array(), built.array());
    assert_eq!(loaded.find_instance(&text[500..510]), built.find_instance(&text[500..510]));

    Ok(())
}
