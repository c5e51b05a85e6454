//! Bit-level I/O utilities for reading and writing individual bits.
//!
//! This module provides BitBuffer and BitReader for serializing Huffman
//! codes. Both operate in MSB-first (most significant bit first) order.
//!
//! BitBuffer is an append-only, front-consumable FIFO: bits go in at the
//! back, complete bytes come out at the front via [`BitBuffer::drain_bytes`].
//! Draining early bounds memory while the encoder streams; content order is
//! preserved regardless of when drains occur.
//!
//! # Padding Rules
//! - [`BitBuffer::flush`] pads an incomplete final byte with trailing zeros
//!   and reports how many were added (the container records this count)
//! - BitReader does not distinguish padding from data; the caller tracks the
//!   exact bit count
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{BitBuffer, BitReader};
//!
//! let mut buf = BitBuffer::new();
//! buf.push_bits(0b101, 3).unwrap();  // bits 1, 0, 1
//! buf.push_bit(true);
//! assert!(buf.drain_bytes().is_empty()); // only 4 bits queued
//! buf.push_bits(0b0110, 4).unwrap();
//! assert_eq!(buf.drain_bytes(), vec![0b1011_0110]);
//!
//! let data = [0b1011_0110];
//! let mut reader = BitReader::new(&data);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert!(reader.read_bit().unwrap());
//! ```

use crate::error::{BitIoError, Result};

/// FIFO bit queue that packs bits MSB-first into bytes.
///
/// Complete bytes accumulate in an internal queue until drained; at most 7
/// bits sit in the partial-byte accumulator.
///
/// # Invariants
/// - `acc` holds `acc_bits` bits, MSB-aligned
/// - `acc_bits` is always < 8
#[derive(Debug, Clone, Default)]
pub struct BitBuffer {
    /// Complete bytes awaiting drain, oldest first
    ready: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    acc: u8,
    /// Number of bits in `acc` (0-7)
    acc_bits: u8,
}

impl BitBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single bit to the back of the queue.
    pub fn push_bit(&mut self, bit: bool) {
        self.acc |= (bit as u8) << (7 - self.acc_bits);
        self.acc_bits += 1;
        if self.acc_bits == 8 {
            self.ready.push(self.acc);
            self.acc = 0;
            self.acc_bits = 0;
        }
    }

    /// Append up to 64 bits, MSB-first.
    ///
    /// Writing value=0b101 with count=3 appends bits 1, 0, 1 in that order;
    /// only the lowest `count` bits of `value` are used.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn push_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        let mut val = value;

        while remaining > 0 {
            // How many bits fit into the current partial byte?
            let take = remaining.min(8 - self.acc_bits as usize);

            // Extract the top `take` bits of the value
            let shift = remaining - take;
            let bits = ((val >> shift) & ((1 << take) - 1)) as u8;

            self.acc |= bits << (8 - self.acc_bits as usize - take);
            self.acc_bits += take as u8;

            if self.acc_bits == 8 {
                self.ready.push(self.acc);
                self.acc = 0;
                self.acc_bits = 0;
            }

            // Clear the bits just consumed from the value
            val &= (1 << shift) - 1;
            remaining -= take;
        }

        Ok(())
    }

    /// Remove and return every complete byte from the front of the queue.
    ///
    /// Up to 7 trailing bits stay queued for the next drain or flush.
    pub fn drain_bytes(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.ready)
    }

    /// Drain everything, zero-padding a final partial byte.
    ///
    /// Returns the drained bytes and the number of padding zero bits added
    /// (0-7). The buffer is empty afterwards.
    pub fn flush(&mut self) -> (Vec<u8>, u8) {
        let pad = if self.acc_bits == 0 {
            0
        } else {
            8 - self.acc_bits
        };
        if self.acc_bits > 0 {
            // acc is MSB-aligned, so the low bits are already zero
            self.ready.push(self.acc);
            self.acc = 0;
            self.acc_bits = 0;
        }
        (std::mem::take(&mut self.ready), pad)
    }

    /// Total number of bits currently queued (including the partial byte).
    pub fn bit_len(&self) -> usize {
        self.ready.len() * 8 + self.acc_bits as usize
    }

    /// True if no bits are queued.
    pub fn is_empty(&self) -> bool {
        self.ready.is_empty() && self.acc_bits == 0
    }
}

/// Reads bits MSB-first from a byte slice.
///
/// The caller must track how many bits are valid; padding bits at the end
/// of the slice are not distinguishable from data.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Source data
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a new BitReader over the given data.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
        }
    }

    /// Read up to 64 bits, MSB-first.
    ///
    /// Reading 3 bits from byte 0b10110000 returns 0b101.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `BitIoError::UnexpectedEof` if not enough bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut result = 0u64;
        let mut remaining = count;

        while remaining > 0 {
            let byte_idx = self.bit_position / 8;
            let bit_offset = self.bit_position % 8;

            // How many bits can this byte still supply?
            let bits_in_byte = 8 - bit_offset;
            let take = remaining.min(bits_in_byte);

            let byte = self.data[byte_idx];
            let mask = ((1u16 << take) - 1) as u8;
            let bits = (byte >> (bits_in_byte - take)) & mask;

            result = (result << take) | bits as u64;

            self.bit_position += take;
            remaining -= take;
        }

        Ok(result)
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? == 1)
    }

    /// Number of bits left in the slice.
    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_position
    }

    /// Current bit position from the start of the slice.
    pub fn position(&self) -> usize {
        self.bit_position
    }
}
