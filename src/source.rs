//! Record sources: lazy, single-pass readers and shard partitioning.
//!
//! The engine only needs "a finite sequence of records". These adapters
//! provide that over the common flat-file formats without loading the file
//! into memory:
//!
//! - [`csv_records`] / [`open_csv`] -- Serde-backed CSV rows (feature `io-csv`)
//! - [`jsonl_records`] / [`open_jsonl`] -- JSON Lines, blank lines skipped (feature `io-jsonl`)
//! - [`split_even`] / [`round_robin`] -- partition records into shards for
//!   [`Runner::try_aggregate_shards`](crate::runner::Runner::try_aggregate_shards)
//!
//! Readers yield `anyhow::Result<T>` items annotated with the row or line
//! number; the engine passes those errors through unchanged.

#[cfg(any(feature = "io-csv", feature = "io-jsonl"))]
use anyhow::{Context, Result};
#[cfg(any(feature = "io-csv", feature = "io-jsonl"))]
use serde::de::DeserializeOwned;
#[cfg(any(feature = "io-csv", feature = "io-jsonl"))]
use std::fs::File;
#[cfg(any(feature = "io-csv", feature = "io-jsonl"))]
use std::io::BufReader;
#[cfg(any(feature = "io-csv", feature = "io-jsonl"))]
use std::path::Path;

#[cfg(feature = "io-csv")]
use std::io::Read;

#[cfg(feature = "io-jsonl")]
use std::io::BufRead;

/// Lazily deserialize CSV rows from `reader`.
///
/// With `has_headers`, fields are matched to `T` by column name and extra
/// columns are ignored.
#[cfg(feature = "io-csv")]
pub fn csv_records<T, R>(reader: R, has_headers: bool) -> impl Iterator<Item = Result<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize::<T>()
        .enumerate()
        .map(|(i, rec)| rec.with_context(|| format!("parse CSV record #{}", i + 1)))
}

/// Open a CSV file with a header row as a lazy record source.
///
/// # Errors
/// The file cannot be opened. Row errors surface while iterating.
#[cfg(feature = "io-csv")]
pub fn open_csv<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<impl Iterator<Item = Result<T>>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    Ok(csv_records(BufReader::new(f), true))
}

/// Lazily deserialize one JSON document per non-blank line.
#[cfg(feature = "io-jsonl")]
pub fn jsonl_records<T, R>(reader: R) -> impl Iterator<Item = Result<T>>
where
    T: DeserializeOwned,
    R: BufRead,
{
    reader.lines().enumerate().filter_map(|(i, line)| {
        let line = match line.with_context(|| format!("read JSONL line {}", i + 1)) {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };
        if line.trim().is_empty() {
            return None;
        }
        Some(serde_json::from_str(&line).with_context(|| format!("parse JSONL line {}: {line}", i + 1)))
    })
}

/// Open a JSON Lines file as a lazy record source.
///
/// # Errors
/// The file cannot be opened. Line errors surface while iterating.
#[cfg(feature = "io-jsonl")]
pub fn open_jsonl<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<impl Iterator<Item = Result<T>>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    Ok(jsonl_records(BufReader::new(f)))
}

/// Split `records` into at most `n` contiguous shards of near-equal size.
///
/// Always returns at least one shard; an empty input gives one empty shard.
#[must_use]
pub fn split_even<T>(records: Vec<T>, n: usize) -> Vec<Vec<T>> {
    let len = records.len();
    if n <= 1 || len <= 1 {
        return vec![records];
    }
    let chunk = len.div_ceil(n);
    let mut out = Vec::with_capacity(len.div_ceil(chunk));
    let mut it = records.into_iter().peekable();
    while it.peek().is_some() {
        out.push(it.by_ref().take(chunk).collect());
    }
    out
}

/// Deal records into `n` shards in turn (record `i` goes to shard `i % n`).
#[must_use]
pub fn round_robin<T>(records: impl IntoIterator<Item = T>, n: usize) -> Vec<Vec<T>> {
    let n = n.max(1);
    let mut out: Vec<Vec<T>> = (0..n).map(|_| Vec::new()).collect();
    for (i, r) in records.into_iter().enumerate() {
        out[i % n].push(r);
    }
    out
}
