//! Streaming container decoder.
//!
//! # Pipeline
//!
//! ```text
//! measure length -> read header -> read table section -> build trie ->
//! walk payload bits -> write decoded bytes
//! ```
//!
//! The decoder never trusts the container. Every field is validated as it
//! is parsed and every violation maps to a specific [`FormatError`]; a
//! malformed container can produce an error but never a panic, an infinite
//! loop, or silently wrong output.
//!
//! Payload decoding walks a trie rebuilt from the table section, one bit
//! at a time, restarting from the root after each emitted symbol. The
//! stream length is measured up front with a seek so the payload bit count
//! can be derived before any payload byte is read.

use crate::bitio::BitReader;
use crate::config::CodecConfig;
use crate::container::{Header, HEADER_SIZE};
use crate::error::{FormatError, Result};
use crate::stats::DecodeSummary;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

/// Decompress a container from `input`, writing decoded bytes to `output`.
///
/// The input must be seekable so the payload length can be measured before
/// decoding starts. On success the output has been flushed.
///
/// # Errors
/// - `Error::Format` for any container that violates the layout
/// - `Error::Io` on read/write/seek failures
pub fn decode<R, W>(input: &mut R, output: &mut W, config: &CodecConfig) -> Result<DecodeSummary>
where
    R: Read + Seek,
    W: Write,
{
    let mut summary = DecodeSummary::new();

    let total_len = input.seek(SeekFrom::End(0))?;
    input.seek(SeekFrom::Start(0))?;
    summary.input_bytes = total_len;

    let header = Header::read(input)?;

    let table_available = total_len.saturating_sub(HEADER_SIZE as u64);
    let table_bytes = read_table_section(input, &header, table_available)?;
    let tree = parse_table(&table_bytes, &header)?;
    summary.distinct_symbols = tree.len();

    // Everything past the table is payload. A shrinking stream already
    // failed in read_table_section, so saturation never fires on a
    // consistent reader.
    let payload_bytes = total_len.saturating_sub(header.payload_start());
    let raw_bits = payload_bytes * 8;
    if header.trailing_zero_bits as u64 > raw_bits {
        return Err(FormatError::TrailingZerosExceedPayload {
            count: header.trailing_zero_bits,
            payload_bits: raw_bits,
        }
        .into());
    }
    let payload_bits = raw_bits - header.trailing_zero_bits as u64;
    summary.payload_bits = payload_bits;

    if payload_bits > 0 && tree.is_empty() {
        return Err(FormatError::PayloadWithoutTable.into());
    }

    walk_payload(input, output, &tree, payload_bits, config, &mut summary)?;

    output.flush()?;
    summary.complete();
    Ok(summary)
}

/// Convenience wrapper: decompress an in-memory container with default
/// settings.
pub fn decode_bytes(container: &[u8]) -> Result<Vec<u8>> {
    let mut input = Cursor::new(container);
    let mut output = Cursor::new(Vec::new());
    decode(&mut input, &mut output, &CodecConfig::default())?;
    Ok(output.into_inner())
}

/// Read exactly the declared table section, or report how short it fell.
///
/// The declared length is checked against the measured stream length
/// before the buffer is allocated, so a forged header cannot demand a
/// gigabyte table out of a six-byte file.
fn read_table_section<R: Read>(input: &mut R, header: &Header, available: u64) -> Result<Vec<u8>> {
    let required = header.table_len_bytes();
    if required as u64 > available {
        return Err(FormatError::TruncatedTable {
            required,
            actual: available as usize,
        }
        .into());
    }

    let mut buf = vec![0u8; required];
    let mut filled = 0;

    while filled < required {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    if filled < required {
        return Err(FormatError::TruncatedTable {
            required,
            actual: filled,
        }
        .into());
    }

    Ok(buf)
}

/// Parse table entries out of the section and build the decoding trie.
///
/// Entries are consumed until exactly `table_bits` bits are used; the pad
/// bits that byte-align the section are never read.
fn parse_table(table_bytes: &[u8], header: &Header) -> Result<DecodeTree> {
    let mut reader = BitReader::new(table_bytes);
    let mut tree = DecodeTree::new();

    while (reader.position() as u32) < header.table_bits {
        let offset = reader.position() as u32;
        if header.table_bits - offset < 16 {
            return Err(FormatError::TableLengthMismatch {
                declared: header.table_bits,
                offset,
            }
            .into());
        }

        let symbol = reader.read_bits(8)? as u8;
        let len = reader.read_bits(8)? as usize;
        if len == 0 {
            return Err(FormatError::ZeroLengthCode { symbol }.into());
        }

        let code_offset = reader.position() as u32;
        if code_offset + len as u32 > header.table_bits {
            return Err(FormatError::TableLengthMismatch {
                declared: header.table_bits,
                offset: code_offset,
            }
            .into());
        }

        let mut code = Vec::with_capacity(len);
        for _ in 0..len {
            code.push(reader.read_bit()?);
        }

        tree.insert(symbol, &code)?;
    }

    Ok(tree)
}

/// Consume `payload_bits` bits from the input, walking the trie and
/// batching decoded bytes out through `output`.
fn walk_payload<R: Read, W: Write>(
    input: &mut R,
    output: &mut W,
    tree: &DecodeTree,
    payload_bits: u64,
    config: &CodecConfig,
    summary: &mut DecodeSummary,
) -> Result<()> {
    let mut node = DecodeTree::ROOT;
    let mut bits_done = 0u64;
    let mut pending = Vec::with_capacity(config.read_chunk_bytes);
    let mut chunk = vec![0u8; config.read_chunk_bytes.max(1)];

    while bits_done < payload_bits {
        let n = match input.read(&mut chunk) {
            // The stream delivered fewer bytes than the length we measured
            Ok(0) => return Err(FormatError::TruncatedCode { position: bits_done }.into()),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        let mut reader = BitReader::new(&chunk[..n]);
        while reader.bits_remaining() > 0 && bits_done < payload_bits {
            let bit = reader.read_bit()?;

            node = match tree.step(node, bit) {
                Some(next) => next,
                None => {
                    return Err(FormatError::InvalidCodePath {
                        position: bits_done,
                    }
                    .into())
                }
            };
            bits_done += 1;

            if let Some(symbol) = tree.symbol_at(node) {
                pending.push(symbol);
                node = DecodeTree::ROOT;
            }
        }

        if pending.len() >= config.read_chunk_bytes {
            output.write_all(&pending)?;
            summary.output_bytes += pending.len() as u64;
            pending.clear();
        }
    }

    if node != DecodeTree::ROOT {
        return Err(FormatError::TruncatedCode {
            position: bits_done,
        }
        .into());
    }

    output.write_all(&pending)?;
    summary.output_bytes += pending.len() as u64;
    Ok(())
}

/// Decoding trie rebuilt from the table section.
///
/// Arena-allocated like the encoder's tree: children are owned by index,
/// the root is slot 0. A node carries a symbol only at the end of a
/// complete code, and insertion rejects any entry that would make decoding
/// ambiguous.
#[derive(Debug)]
struct DecodeTree {
    nodes: Vec<TrieNode>,
    symbols: usize,
    seen: [bool; 256],
}

#[derive(Debug, Default, Clone)]
struct TrieNode {
    symbol: Option<u8>,
    children: [Option<usize>; 2],
}

impl DecodeTree {
    const ROOT: usize = 0;

    fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            symbols: 0,
            seen: [false; 256],
        }
    }

    /// Insert one code, extending the trie along its bit path.
    ///
    /// # Errors
    /// - `FormatError::DuplicateSymbol` if the symbol already has a code
    /// - `FormatError::AmbiguousCode` if the code equals, extends, or is a
    ///   prefix of an existing code
    fn insert(&mut self, symbol: u8, code: &[bool]) -> Result<()> {
        if self.seen[symbol as usize] {
            return Err(FormatError::DuplicateSymbol { symbol }.into());
        }

        let mut node = Self::ROOT;
        for &bit in code {
            if self.nodes[node].symbol.is_some() {
                // An existing code is a proper prefix of this one
                return Err(FormatError::AmbiguousCode { symbol }.into());
            }
            let slot = bit as usize;
            node = match self.nodes[node].children[slot] {
                Some(next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children[slot] = Some(next);
                    next
                }
            };
        }

        let last = &mut self.nodes[node];
        if last.symbol.is_some() || last.children.iter().any(Option::is_some) {
            return Err(FormatError::AmbiguousCode { symbol }.into());
        }
        last.symbol = Some(symbol);

        self.seen[symbol as usize] = true;
        self.symbols += 1;
        Ok(())
    }

    fn step(&self, node: usize, bit: bool) -> Option<usize> {
        self.nodes[node].children[bit as usize]
    }

    fn symbol_at(&self, node: usize) -> Option<u8> {
        self.nodes[node].symbol
    }

    fn len(&self) -> usize {
        self.symbols
    }

    fn is_empty(&self) -> bool {
        self.symbols == 0
    }
}
