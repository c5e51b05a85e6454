//! huffpack-core: Streaming Huffman file compression
//!
//! This library provides the core components for a byte-oriented Huffman
//! codec that:
//! - Scans input to build a per-byte frequency table
//! - Constructs a deterministic Huffman tree and prefix code table
//! - Streams compressed output in a self-describing container format
//! - Decodes containers back to the original bytes, validating as it goes
//!
//! # Architecture
//!
//! The codec is designed around clear module boundaries:
//! - `bitio`: Low-level bit packing and unpacking
//! - `freq`: Frequency scanning over chunked reads
//! - `tree`: Huffman tree construction and code generation
//! - `container`: On-disk header layout and seek-back patching
//! - `encoder`: Two-pass streaming compression
//! - `decoder`: Validating streaming decompression
//! - `config`: Buffer size tuning
//! - `stats`: Per-run summaries
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Bounded memory**: Chunked reads and threshold flushes, never the
//!   whole file
//! - **Deterministic**: The same input produces the same container on
//!   every run and platform
//! - **Untrusting**: The decoder validates every container field before
//!   use

pub mod bitio;
pub mod config;
pub mod container;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod freq;
pub mod stats;
pub mod tree;

// Re-export commonly used types
pub use config::CodecConfig;
pub use decoder::{decode, decode_bytes};
pub use encoder::{encode, encode_bytes};
pub use error::{Error, Result};
pub use freq::FrequencyTable;
pub use stats::{DecodeSummary, EncodeSummary};
pub use tree::{CodeTable, HuffmanTree};
