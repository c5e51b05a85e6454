//! Run statistics and reporting for encode/decode operations.
//!
//! Counters are filled in by the codec as it runs and returned to the
//! caller on success; printing is the caller's choice. Collection is
//! single-threaded with explicit updates at each stage, no atomics.

use std::time::{Duration, Instant};

/// Statistics for one encode run.
#[derive(Debug, Clone)]
pub struct EncodeSummary {
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    /// Bytes read from the input stream
    pub input_bytes: u64,

    /// Bytes written to the container, header included
    pub output_bytes: u64,

    /// Distinct symbols in the input (code table entries)
    pub distinct_symbols: usize,

    /// Bit length of the table section, excluding alignment padding
    pub table_bits: u32,

    /// Bit length of the payload section, excluding trailing zeros
    pub payload_bits: u64,

    /// Pad bits recorded in the header
    pub trailing_zero_bits: u8,
}

impl EncodeSummary {
    /// Create a summary with the start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_bytes: 0,
            output_bytes: 0,
            distinct_symbols: 0,
            table_bits: 0,
            payload_bits: 0,
            trailing_zero_bits: 0,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compression ratio (output / input).
    ///
    /// Returns 0.0 for an empty input.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Fraction of the input size saved (1 - ratio). Negative when the
    /// container is larger than the input, e.g. for tiny or random files.
    pub fn space_saving(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            1.0 - self.compression_ratio()
        }
    }

    /// Throughput in input bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.input_bytes as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Encode Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();

        println!(
            "Input:  {} bytes ({:.2} MiB)",
            self.input_bytes,
            self.input_bytes as f64 / 1024.0 / 1024.0
        );
        println!(
            "Output: {} bytes ({:.2} MiB)",
            self.output_bytes,
            self.output_bytes as f64 / 1024.0 / 1024.0
        );
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!("Space saving: {:.1}%", self.space_saving() * 100.0);
        println!();

        println!("=== Container ===");
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!("Table bits: {}", self.table_bits);
        println!("Payload bits: {}", self.payload_bits);
        println!("Trailing zero bits: {}", self.trailing_zero_bits);
        println!();

        println!("=== Performance ===");
        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
        println!();
    }
}

impl Default for EncodeSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics for one decode run.
#[derive(Debug, Clone)]
pub struct DecodeSummary {
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    /// Container bytes read, header included
    pub input_bytes: u64,

    /// Decoded bytes written to the output stream
    pub output_bytes: u64,

    /// Code table entries parsed from the container
    pub distinct_symbols: usize,

    /// Payload bits consumed, trailing zeros excluded
    pub payload_bits: u64,
}

impl DecodeSummary {
    /// Create a summary with the start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_bytes: 0,
            output_bytes: 0,
            distinct_symbols: 0,
            payload_bits: 0,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compression ratio of the container (container / decoded).
    ///
    /// Returns 0.0 when nothing was decoded.
    pub fn compression_ratio(&self) -> f64 {
        if self.output_bytes == 0 {
            0.0
        } else {
            self.input_bytes as f64 / self.output_bytes as f64
        }
    }

    /// Fraction of the decoded size the container saved (1 - ratio).
    /// Negative when the container is larger than the data it holds.
    pub fn space_saving(&self) -> f64 {
        if self.output_bytes == 0 {
            0.0
        } else {
            1.0 - self.compression_ratio()
        }
    }

    /// Throughput in decoded bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.output_bytes as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Decode Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();

        println!(
            "Input:  {} bytes ({:.2} MiB)",
            self.input_bytes,
            self.input_bytes as f64 / 1024.0 / 1024.0
        );
        println!(
            "Output: {} bytes ({:.2} MiB)",
            self.output_bytes,
            self.output_bytes as f64 / 1024.0 / 1024.0
        );
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!("Space saving: {:.1}%", self.space_saving() * 100.0);
        println!();

        println!("=== Container ===");
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!("Payload bits: {}", self.payload_bits);
        println!();

        println!("=== Performance ===");
        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
        println!();
    }
}

impl Default for DecodeSummary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_creation() {
        let summary = EncodeSummary::new();
        assert!(summary.end_time.is_none());
        assert!(summary.duration().as_millis() < 100); // Should be recent
    }

    #[test]
    fn test_compression_ratio() {
        let mut summary = EncodeSummary::new();
        summary.input_bytes = 1000;
        summary.output_bytes = 750;

        assert_eq!(summary.compression_ratio(), 0.75);
        assert_eq!(summary.space_saving(), 0.25);
    }

    #[test]
    fn test_empty_input_ratios() {
        let summary = EncodeSummary::new();
        assert_eq!(summary.compression_ratio(), 0.0);
        assert_eq!(summary.space_saving(), 0.0);
    }

    #[test]
    fn test_negative_space_saving_when_output_grows() {
        let mut summary = EncodeSummary::new();
        summary.input_bytes = 4;
        summary.output_bytes = 11;

        assert!(summary.space_saving() < 0.0);
    }

    #[test]
    fn test_decode_summary_complete() {
        let mut summary = DecodeSummary::new();
        summary.complete();
        assert!(summary.end_time.is_some());
    }

    #[test]
    fn test_decode_summary_ratios() {
        let mut summary = DecodeSummary::new();
        summary.input_bytes = 750;
        summary.output_bytes = 1000;

        assert_eq!(summary.compression_ratio(), 0.75);
        assert_eq!(summary.space_saving(), 0.25);
    }

    #[test]
    fn test_decode_summary_empty_output_ratios() {
        let summary = DecodeSummary::new();
        assert_eq!(summary.compression_ratio(), 0.0);
        assert_eq!(summary.space_saving(), 0.0);
    }
}
