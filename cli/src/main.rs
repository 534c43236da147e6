// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use sufsort::{Bwt, SuffixArray};

// Every file is treated as a sequence of bytes
const ALPHABET_SIZE: usize = 256;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the suffix array of a file and store it
    Index { input: PathBuf, output: PathBuf },
    /// Print the byte offsets of every occurrence of a pattern
    Search {
        input: PathBuf,
        pattern: String,
        /// Load the suffix array from a file written by `index`
        #[arg(long)]
        index: Option<PathBuf>,
        /// Locate the occurrences with the LCP-LR accelerator
        #[arg(long)]
        lcp_lr: bool,
    },
    /// Write the Burrows-Wheeler transform of a file and print its index
    Bwt { input: PathBuf, output: PathBuf },
    /// Invert a Burrows-Wheeler transform written by `bwt`
    Unbwt {
        input: PathBuf,
        index: usize,
        output: PathBuf,
    },
    /// Print statistics about a file's suffixes
    Stats { input: PathBuf },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    match args.command {
        Command::Index { input, output } => {
            let data = read_input(&input)?;
            let sa = build(&data)?;

            let mut out_file = File::create(&output)
                .with_context(|| format!("Failed to create index file '{}'", output.display()))?;
            sufstore::write(&sa, &mut out_file)
                .context("I/O error occurred while writing index file")?;
        }
        Command::Search {
            input,
            pattern,
            index,
            lcp_lr,
        } => {
            let data = read_input(&input)?;
            let sa = match index {
                Some(index) => {
                    let index_file = File::open(&index).with_context(|| {
                        format!("Failed to open index file '{}'", index.display())
                    })?;
                    sufstore::read(&data[..], index_file).with_context(|| {
                        format!("Failed to load index file '{}'", index.display())
                    })?
                }
                None => build(&data)?,
            };
            if lcp_lr {
                sa.use_lcp_lr();
            }

            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            for offset in sa.find_range(pattern.as_bytes()).sequence_order() {
                writeln!(out, "{offset}")?;
            }
            out.flush()?;
        }
        Command::Bwt { input, output } => {
            let data = read_input(&input)?;
            let (bwt, index) = build(&data)?.bwt();

            fs::write(&output, bwt)
                .with_context(|| format!("Failed to write output file '{}'", output.display()))?;
            println!("{index}");
        }
        Command::Unbwt {
            input,
            index,
            output,
        } => {
            let data = read_input(&input)?;
            let mut original = vec![0; data.len()];
            sufsort::inverse_bwt(
                Bwt::Indexed { data: &data, index },
                &mut original,
                ALPHABET_SIZE,
            )
            .context("Failed to invert transform")?;

            fs::write(&output, original)
                .with_context(|| format!("Failed to write output file '{}'", output.display()))?;
        }
        Command::Stats { input } => {
            let data = read_input(&input)?;
            let sa = build(&data)?;
            let longest_repeat = sa.lcp().iter().copied().max().unwrap_or(0).max(0);

            println!("length: {}", sa.len());
            println!("distinct substrings: {}", sa.count_unique_subsequences());
            println!("longest repeat: {longest_repeat}");
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read input file '{}'", path.display()))
}

fn build(data: &[u8]) -> anyhow::Result<SuffixArray<'_, u8>> {
    log::info!("building suffix array of {} bytes", data.len());
    SuffixArray::new(data, ALPHABET_SIZE).context("Input is too large to index")
}
