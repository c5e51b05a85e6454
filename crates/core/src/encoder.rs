//! Two-pass streaming encoder.
//!
//! # Pipeline
//!
//! ```text
//! scan frequencies -> build tree -> write header placeholder -> write
//! table -> patch table bits -> rewind input -> write payload -> flush ->
//! patch trailing zeros
//! ```
//!
//! The input is read twice: once to count symbol frequencies and once to
//! emit codes, so nothing larger than one read chunk is held in memory.
//! Bits accumulate in a [`BitBuffer`] and drain to the writer whenever the
//! configured flush threshold is reached; both header fields start as zero
//! placeholders and are patched in place once their values are known.
//!
//! An empty input short-circuits after the scan and produces the bare
//! 5-byte all-zero header, which the decoder recognizes as an empty file.

use crate::bitio::BitBuffer;
use crate::config::CodecConfig;
use crate::container;
use crate::error::{Result, TreeError};
use crate::freq::FrequencyTable;
use crate::stats::EncodeSummary;
use crate::tree::{CodeTable, HuffmanTree};
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

/// Compress `input` into the container format, writing to `output`.
///
/// The input must be seekable: the encoder rewinds it to the start before
/// each of its two passes. The output must be seekable for header
/// patching. On success the output has been flushed and its position is at
/// the end of the container; on error the container is left partially
/// written and should be discarded.
///
/// # Errors
/// - `Error::Io` on any read/write/seek failure
/// - `TreeError::MissingCode` if the input grew new symbols between passes
pub fn encode<R, W>(input: &mut R, output: &mut W, config: &CodecConfig) -> Result<EncodeSummary>
where
    R: Read + Seek,
    W: Write + Seek,
{
    let mut summary = EncodeSummary::new();

    // Pass 1: frequency scan
    input.seek(SeekFrom::Start(0))?;
    let freq = FrequencyTable::scan(input, config.read_chunk_bytes)?;
    summary.input_bytes = freq.total();
    summary.distinct_symbols = freq.distinct_symbols();

    // The container starts at offset 0; the patch helpers rely on that
    output.seek(SeekFrom::Start(0))?;

    // Empty input: the 5-byte all-zero header is the whole container
    if freq.is_empty() {
        container::write_placeholder(output)?;
        output.flush()?;
        summary.output_bytes = output.stream_position()?;
        summary.complete();
        return Ok(summary);
    }

    let tree = HuffmanTree::from_frequencies(&freq)?;
    let codes = tree.code_table()?;

    container::write_placeholder(output)?;

    let mut bits = BitBuffer::new();
    summary.table_bits = write_table(output, &mut bits, &codes, config)?;
    container::patch_table_bits(output, summary.table_bits)?;

    // Pass 2: payload
    input.seek(SeekFrom::Start(0))?;
    summary.payload_bits = write_payload(input, output, &mut bits, &codes, config)?;

    let (tail, pad) = bits.flush();
    output.write_all(&tail)?;
    container::patch_trailing_zeros(output, pad)?;
    output.flush()?;

    summary.trailing_zero_bits = pad;
    summary.output_bytes = output.stream_position()?;
    summary.complete();
    Ok(summary)
}

/// Convenience wrapper: compress an in-memory buffer with default settings.
pub fn encode_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut input = Cursor::new(data);
    let mut output = Cursor::new(Vec::new());
    encode(&mut input, &mut output, &CodecConfig::default())?;
    Ok(output.into_inner())
}

/// Emit the table section and return its bit length (padding excluded).
///
/// Entries go out in ascending symbol order: 8 bits of symbol, 8 bits of
/// code length, then the code itself. The section is zero-padded to a
/// whole byte at the end only.
fn write_table<W: Write>(
    output: &mut W,
    bits: &mut BitBuffer,
    codes: &CodeTable,
    config: &CodecConfig,
) -> Result<u32> {
    let mut table_bits = 0u32;

    for (symbol, code) in codes.iter() {
        bits.push_bits(symbol as u64, 8)?;
        bits.push_bits(code.len() as u64, 8)?;
        for &bit in code {
            bits.push_bit(bit);
        }
        table_bits += 16 + code.len() as u32;

        if bits.bit_len() >= config.flush_threshold_bits {
            output.write_all(&bits.drain_bytes())?;
        }
    }

    // Byte-align the section end; the pad is derivable from table_bits
    let (tail, _pad) = bits.flush();
    output.write_all(&tail)?;
    Ok(table_bits)
}

/// Re-read the input and emit one code per byte. Returns the payload bit
/// length, trailing zeros excluded.
fn write_payload<R: Read, W: Write>(
    input: &mut R,
    output: &mut W,
    bits: &mut BitBuffer,
    codes: &CodeTable,
    config: &CodecConfig,
) -> Result<u64> {
    let mut payload_bits = 0u64;
    let mut chunk = vec![0u8; config.read_chunk_bytes.max(1)];

    loop {
        let n = match input.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        for &byte in &chunk[..n] {
            let code = codes
                .get(byte)
                .ok_or(TreeError::MissingCode { symbol: byte })?;
            for &bit in code {
                bits.push_bit(bit);
            }
            payload_bits += code.len() as u64;
        }

        if bits.bit_len() >= config.flush_threshold_bits {
            output.write_all(&bits.drain_bytes())?;
        }
    }

    Ok(payload_bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_bare_header() {
        let container = encode_bytes(b"").unwrap();
        assert_eq!(container, vec![0u8; 5]);
    }

    #[test]
    fn test_aaab_container_layout() {
        // Codes: a = 1, b = 0. Table entries in symbol order:
        //   'a' 0x61, len 1, bit 1   (17 bits)
        //   'b' 0x62, len 1, bit 0   (17 bits)
        // Packed MSB-first that is 0x61 0x01 0xB1 0x00 0x80 (34 bits + 6 pad).
        // Payload 1110 packs to 0xE0 with 4 trailing zeros.
        let container = encode_bytes(b"aaab").unwrap();
        assert_eq!(
            container,
            vec![0x04, 0x22, 0x00, 0x00, 0x00, 0x61, 0x01, 0xB1, 0x00, 0x80, 0xE0]
        );
    }

    #[test]
    fn test_single_symbol_container_layout() {
        // Lone leaf gets the 1-bit code 0: table is 'z' 0x7A, len 1, bit 0
        // (17 bits -> 0x7A 0x01 0x00), payload 0000 -> 0x00, 4 trailing.
        let container = encode_bytes(b"zzzz").unwrap();
        assert_eq!(
            container,
            vec![0x04, 0x11, 0x00, 0x00, 0x00, 0x7A, 0x01, 0x00, 0x00]
        );
    }

    #[test]
    fn test_summary_counters() {
        let mut input = Cursor::new(b"aaab".to_vec());
        let mut output = Cursor::new(Vec::new());
        let summary = encode(&mut input, &mut output, &CodecConfig::default()).unwrap();

        assert_eq!(summary.input_bytes, 4);
        assert_eq!(summary.distinct_symbols, 2);
        assert_eq!(summary.table_bits, 34);
        assert_eq!(summary.payload_bits, 4);
        assert_eq!(summary.trailing_zero_bits, 4);
        assert_eq!(summary.output_bytes, 11);
        assert!(summary.end_time.is_some());
    }

    #[test]
    fn test_deterministic_output() {
        let data = b"the same input must produce the same container every run";
        assert_eq!(encode_bytes(data).unwrap(), encode_bytes(data).unwrap());
    }

    #[test]
    fn test_tiny_flush_threshold_streams_correctly() {
        // A 1-bit threshold forces a drain after every table entry and
        // every chunk; the container must come out identical.
        let data = b"draining early must never change the bytes";
        let config = CodecConfig {
            read_chunk_bytes: 3,
            flush_threshold_bits: 1,
        };
        let mut input = Cursor::new(data.to_vec());
        let mut output = Cursor::new(Vec::new());
        encode(&mut input, &mut output, &config).unwrap();

        assert_eq!(output.into_inner(), encode_bytes(data).unwrap());
    }

    #[test]
    fn test_payload_bits_match_weighted_code_lengths() {
        let data = b"abracadabra alakazam";
        let freq = FrequencyTable::from_bytes(data);
        let tree = HuffmanTree::from_frequencies(&freq).unwrap();
        let codes = tree.code_table().unwrap();

        let expected: u64 = data
            .iter()
            .map(|&b| codes.get(b).map(|c| c.len() as u64).unwrap_or(0))
            .sum();

        let mut input = Cursor::new(data.to_vec());
        let mut output = Cursor::new(Vec::new());
        let summary = encode(&mut input, &mut output, &CodecConfig::default()).unwrap();
        assert_eq!(summary.payload_bits, expected);
    }

    #[test]
    fn test_misplaced_input_cursor_is_rewound() {
        let mut input = Cursor::new(b"aaab".to_vec());
        input.set_position(3);
        let mut output = Cursor::new(Vec::new());
        encode(&mut input, &mut output, &CodecConfig::default()).unwrap();

        assert_eq!(output.into_inner(), encode_bytes(b"aaab").unwrap());
    }
}
