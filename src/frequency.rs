//! Symbol frequency analysis
//!
//! Counts how often each of the 256 byte values occurs. The table is filled
//! once, either by scanning the input or by replaying a decoded header.

use std::io::Read;

use tracing::debug;

use crate::error::CompressError;
use crate::stream::{self, Adler32};

/// Number of distinct symbols (byte values).
pub const SYMBOL_COUNT: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; SYMBOL_COUNT],
    total: u64,
    unique: usize,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self {
            counts: [0; SYMBOL_COUNT],
            total: 0,
            unique: 0,
        }
    }

    /// Count every byte of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.record_all(data);
        table
    }

    /// Count exactly `len` bytes read from `source` in `buffer_size` chunks.
    ///
    /// A source that ends early is reported as a size mismatch.
    pub fn scan<R: Read>(
        source: &mut R,
        len: u64,
        buffer_size: usize,
    ) -> Result<Self, CompressError> {
        Self::scan_checksummed(source, len, buffer_size).map(|(table, _)| table)
    }

    /// Like `scan`, also returning the Adler-32 of the bytes counted.
    pub fn scan_checksummed<R: Read>(
        source: &mut R,
        len: u64,
        buffer_size: usize,
    ) -> Result<(Self, u32), CompressError> {
        let mut table = Self::new();
        let mut checksum = Adler32::new();
        stream::for_each_chunk(source, len, buffer_size, |chunk| {
            table.record_all(chunk);
            checksum.update(chunk);
            Ok(())
        })?;
        debug!(total = table.total, unique = table.unique, "frequency scan finished");
        Ok((table, checksum.finish()))
    }

    /// Count one occurrence of `symbol`.
    pub fn record(&mut self, symbol: u8) {
        let slot = &mut self.counts[symbol as usize];
        if *slot == 0 {
            self.unique += 1;
        }
        *slot += 1;
        self.total += 1;
    }

    pub fn record_all(&mut self, data: &[u8]) {
        for &b in data {
            self.record(b);
        }
    }

    /// Set the count of `symbol` directly, as read from a header.
    ///
    /// Returns false if the symbol already had a count.
    pub fn insert(&mut self, symbol: u8, count: u64) -> bool {
        let slot = &mut self.counts[symbol as usize];
        if *slot != 0 {
            return false;
        }
        if count > 0 {
            *slot = count;
            self.unique += 1;
            self.total += count;
        }
        true
    }

    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Total number of recorded symbols.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of symbols with a non-zero count.
    pub fn unique_count(&self) -> usize {
        self.unique
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Present symbols with their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
    }

    /// Shannon entropy in bits per symbol.
    pub fn entropy_bits(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let len = self.total as f64;
        let mut entropy = 0.0;
        for (_, c) in self.iter() {
            let p = c as f64 / len;
            entropy -= p * p.log2();
        }
        entropy
    }
}
