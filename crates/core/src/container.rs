//! On-disk container layout: header parsing, placeholder emission, and
//! seek-back patching.
//!
//! # Container layout
//!
//! ```text
//! +----------------+------------------+---------------------+------------------+
//! | trailing zeros | table bit length | code table          | payload          |
//! | 1 byte (0-7)   | u32 LE (4 bytes) | ceil(bits/8) bytes  | remaining bytes  |
//! +----------------+------------------+---------------------+------------------+
//! offset 0         offset 1           offset 5              offset 5 + tbl
//! ```
//!
//! The table section holds one entry per distinct symbol, bit-packed
//! MSB-first with no per-entry alignment: 8 bits of symbol value, 8 bits of
//! code length, then the code bits. Zero-padding to a whole byte happens
//! only at the end of the section; the declared bit length excludes that
//! padding. The payload section is bit-packed the same way, and the
//! trailing-zeros byte records how many pad bits close its final byte.
//!
//! An empty input produces the 5-byte header alone, all zeros.
//!
//! Both header fields are written as zero placeholders up front and patched
//! once their values are known, so the encoder streams in a single forward
//! pass per section instead of buffering whole sections in memory.

use crate::error::{FormatError, Result};
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Fixed header size in bytes.
pub const HEADER_SIZE: usize = 5;

/// Offset of the trailing-zero-count byte.
pub const TRAILING_ZEROS_OFFSET: u64 = 0;

/// Offset of the table-bit-length field (u32 LE).
pub const TABLE_BITS_OFFSET: u64 = 1;

/// Parsed fixed header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Pad bits in the final payload byte, 0-7.
    pub trailing_zero_bits: u8,
    /// Bit length of the table section, excluding alignment padding.
    pub table_bits: u32,
}

impl Header {
    /// Read and validate the fixed header from the start of a stream.
    ///
    /// # Errors
    /// - `FormatError::TruncatedHeader` if fewer than 5 bytes are available
    /// - `FormatError::InvalidTrailingZeros` if the count byte exceeds 7
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; HEADER_SIZE];
        let mut filled = 0;

        while filled < HEADER_SIZE {
            match reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        if filled < HEADER_SIZE {
            return Err(FormatError::TruncatedHeader {
                required: HEADER_SIZE,
                actual: filled,
            }
            .into());
        }

        let trailing_zero_bits = buf[0];
        if trailing_zero_bits > 7 {
            return Err(FormatError::InvalidTrailingZeros {
                count: trailing_zero_bits,
            }
            .into());
        }

        let table_bits = u32::from_le_bytes([buf[1], buf[2], buf[3], buf[4]]);

        Ok(Self {
            trailing_zero_bits,
            table_bits,
        })
    }

    /// Byte length of the table section (bit length rounded up).
    pub fn table_len_bytes(&self) -> usize {
        ((self.table_bits as u64 + 7) / 8) as usize
    }

    /// Absolute offset of the first payload byte.
    pub fn payload_start(&self) -> u64 {
        HEADER_SIZE as u64 + self.table_len_bytes() as u64
    }
}

/// Write the 5-byte zero placeholder the encoder later patches.
pub fn write_placeholder<W: Write>(writer: &mut W) -> Result<()> {
    writer.write_all(&[0u8; HEADER_SIZE])?;
    Ok(())
}

/// Patch the table-bit-length field, restoring the stream position after.
pub fn patch_table_bits<W: Write + Seek>(writer: &mut W, table_bits: u32) -> Result<()> {
    let pos = writer.stream_position()?;
    writer.seek(SeekFrom::Start(TABLE_BITS_OFFSET))?;
    writer.write_all(&table_bits.to_le_bytes())?;
    writer.seek(SeekFrom::Start(pos))?;
    Ok(())
}

/// Patch the trailing-zero-count byte, restoring the stream position after.
pub fn patch_trailing_zeros<W: Write + Seek>(writer: &mut W, count: u8) -> Result<()> {
    let pos = writer.stream_position()?;
    writer.seek(SeekFrom::Start(TRAILING_ZEROS_OFFSET))?;
    writer.write_all(&[count])?;
    writer.seek(SeekFrom::Start(pos))?;
    Ok(())
}
