//! Byte frequency accounting for the encoder's scan pass.
//!
//! A [`FrequencyTable`] is built once per input (from a reader or a slice)
//! and is immutable afterward. Symbols absent from the input have a zero
//! count and never appear in iteration.

use crate::error::Result;
use std::io::{self, Read};

/// Occurrence count per byte value (0-255).
///
/// Iteration order over present symbols is ascending byte value, which keeps
/// everything derived from the table deterministic.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Count every byte of `input`, reading in `chunk_bytes`-sized chunks.
    pub fn scan<R: Read>(input: &mut R, chunk_bytes: usize) -> Result<Self> {
        let mut counts = [0u64; 256];
        let mut chunk = vec![0u8; chunk_bytes.max(1)];

        loop {
            let n = match input.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            for &byte in &chunk[..n] {
                counts[byte as usize] += 1;
            }
        }

        Ok(Self { counts })
    }

    /// Count every byte of an in-memory slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        Self { counts }
    }

    /// Occurrence count for one symbol.
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols present.
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Total bytes counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// True if no symbol was seen (empty input).
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Iterate `(symbol, count)` for present symbols in ascending symbol
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}
