//! Codec tunables.

/// Buffering parameters shared by the encoder and decoder.
///
/// The defaults favor streaming large files with modest memory: input is
/// read in fixed chunks and output bits accumulate until the flush
/// threshold, so peak memory stays bounded regardless of file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Bytes requested per read call during the scan and payload passes.
    /// Zero is clamped to 1.
    pub read_chunk_bytes: usize,

    /// Complete-bit threshold at which buffered output is drained to the
    /// writer. Flushing happens at chunk boundaries, so a single chunk may
    /// overshoot this by up to `read_chunk_bytes * 8` bits.
    pub flush_threshold_bits: usize,
}

impl CodecConfig {
    /// Default read chunk: 10 KiB.
    pub const DEFAULT_READ_CHUNK_BYTES: usize = 10_240;

    /// Default flush threshold: 81_920 bits (10 KiB of complete bytes).
    pub const DEFAULT_FLUSH_THRESHOLD_BITS: usize = 81_920;
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            read_chunk_bytes: Self::DEFAULT_READ_CHUNK_BYTES,
            flush_threshold_bits: Self::DEFAULT_FLUSH_THRESHOLD_BITS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.read_chunk_bytes, 10_240);
        assert_eq!(config.flush_threshold_bits, 81_920);
    }
}
