//! Error types for the huffpack codec.
//!
//! All operations return structured errors rather than panicking.
//! Nothing is retried internally: every failure aborts the current
//! encode/decode call and propagates to the caller, which owns user
//! messaging and any partial-output cleanup.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a failure domain:
/// - Bit I/O: misuse of the bit buffer/reader primitives
/// - Tree: Huffman tree construction or code generation
/// - Format: a container that violates the on-disk layout
/// - I/O: read/write/seek failures on either stream
#[derive(Debug, Error)]
pub enum Error {
    /// Bit-level buffer or reader misuse
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Huffman tree construction or code generation failed
    #[error("huffman tree error: {0}")]
    Tree(#[from] TreeError),

    /// Container inconsistent with the specified layout
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Stream I/O error (never retried; the operation is aborted)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the end of the bit slice
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Requested a bit group wider than 64 bits
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Huffman tree and code table errors.
#[derive(Debug, Error)]
pub enum TreeError {
    /// No symbols with non-zero frequency (cannot build a tree).
    /// Normal empty-file encoding never reaches this; the encoder skips
    /// tree building for an empty table.
    #[error("empty frequency table: cannot build tree")]
    EmptyFrequencyTable,

    /// Code length exceeds the container's 1-byte length field
    #[error("code length {length} exceeds maximum 255")]
    CodeTooLong { length: usize },

    /// A byte seen during the payload pass has no code entry, which means
    /// the input changed between the scan and payload passes
    #[error("symbol {symbol:#04x} has no code (input changed between passes)")]
    MissingCode { symbol: u8 },
}

/// Container format violations detected by the decoder.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Stream shorter than the 5-byte header
    #[error("container too short: need at least {required} bytes, got {actual}")]
    TruncatedHeader { required: usize, actual: usize },

    /// Trailing-zero-count byte outside its valid range
    #[error("trailing zero count {count} out of range 0-7")]
    InvalidTrailingZeros { count: u8 },

    /// Trailing-zero count larger than the entire payload
    #[error("trailing zero count {count} exceeds payload of {payload_bits} bits")]
    TrailingZerosExceedPayload { count: u8, payload_bits: u64 },

    /// Stream ends before the declared table section
    #[error("table section truncated: need {required} bytes, got {actual}")]
    TruncatedTable { required: usize, actual: usize },

    /// A table entry overruns the declared table bit length
    #[error("table entry at bit {offset} overruns declared length of {declared} bits")]
    TableLengthMismatch { declared: u32, offset: u32 },

    /// A table entry declares a zero-length code; well-formed containers
    /// encode the degenerate single-symbol case with a 1-bit code
    #[error("zero-length code for symbol {symbol:#04x}")]
    ZeroLengthCode { symbol: u8 },

    /// A code collides with a previously inserted prefix
    #[error("code for symbol {symbol:#04x} conflicts with an earlier code")]
    AmbiguousCode { symbol: u8 },

    /// The same symbol appears in two table entries
    #[error("symbol {symbol:#04x} appears twice in the code table")]
    DuplicateSymbol { symbol: u8 },

    /// Payload bits present but the code table is empty
    #[error("payload present but the code table is empty")]
    PayloadWithoutTable,

    /// A payload bit steps into a branch the table never defined
    #[error("payload walks off the code table at bit {position}")]
    InvalidCodePath { position: u64 },

    /// Payload ends in the middle of a code path
    #[error("payload ends mid-code at bit {position}")]
    TruncatedCode { position: u64 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
