// Copyright 2023-2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sufsort::{Config, SuffixArray};

const CHUNK_SIZE: usize = 64 * 1024;
const CHUNKS: usize = 8;
const ALPHABET_SIZE: usize = 20;

// Protein-like text: a small alphabet with long repeats, generated by a fixed LCG so that runs
// are comparable
fn generate(len: usize) -> Vec<u8> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 33) as usize
    };

    let mut data = Vec::with_capacity(len);
    while data.len() < len {
        if data.len() > 256 && next() % 4 == 0 {
            // Copy an earlier stretch to create repeats
            let run = 16 + next() % 240;
            let from = next() % (data.len() - run);
            for i in from..from + run {
                data.push(data[i]);
            }
        } else {
            data.push((next() % ALPHABET_SIZE) as u8);
        }
    }
    data.truncate(len);

    data
}

fn construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct");
    let data = generate(CHUNK_SIZE * CHUNKS);

    // Grow the input chunk by chunk to test multiple data sizes
    for chunks in 1..=CHUNKS {
        let contents = &data[..chunks * CHUNK_SIZE];

        group
            .throughput(Throughput::Bytes(contents.len() as u64))
            .bench_with_input(
                BenchmarkId::from_parameter(contents.len()),
                contents,
                |b, data| {
                    b.iter(|| SuffixArray::new(data, ALPHABET_SIZE).unwrap());
                },
            );
    }

    group.finish();
}

fn search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let data = generate(CHUNK_SIZE * CHUNKS);
    let patterns: Vec<&[u8]> = (0..64)
        .map(|i| {
            let start = i * (data.len() / 64);
            &data[start..start + 8 + i % 24]
        })
        .collect();

    let plain = SuffixArray::new(&data[..], ALPHABET_SIZE).unwrap();
    let accelerated =
        SuffixArray::with_config(&data[..], ALPHABET_SIZE, Config::new().precompute_lcp_lr(true))
            .unwrap();

    for (name, sa) in [("binary", &plain), ("lcp-lr", &accelerated)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                for pattern in &patterns {
                    black_box(sa.find_subsequence(pattern));
                }
            });
        });
    }

    group.bench_function("range", |b| {
        b.iter(|| {
            for pattern in &patterns {
                black_box(plain.find_range(pattern).len());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, construct, search);
criterion_main!(benches);
