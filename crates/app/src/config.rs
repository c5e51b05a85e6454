//! Configuration for the huffpack command-line tool.
//!
//! Handles parsing command-line arguments: a mode flag, two positional
//! paths, and a few tuning/behavior switches. Compression is the default
//! mode so the common case needs no flag at all.

use huffpack_core::CodecConfig;
use std::path::PathBuf;

/// What the tool should do with the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Compress or decompress
    pub mode: Mode,

    /// Input file path
    pub input_file: PathBuf,

    /// Output file path
    pub output_file: PathBuf,

    /// Codec buffer tuning
    pub codec: CodecConfig,

    /// Overwrite the output without prompting
    pub force: bool,

    /// Whether to print the run summary
    pub print_stats: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut mode = Mode::Compress;
        let mut paths: Vec<PathBuf> = Vec::new();
        let mut codec = CodecConfig::default();
        let mut force = false;
        let mut print_stats = true;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--compress" => {
                    mode = Mode::Compress;
                }
                "--decompress" => {
                    mode = Mode::Decompress;
                }
                "--chunk-bytes" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--chunk-bytes requires a number".to_string());
                    }
                    let n: usize = args[i].parse().map_err(|_| "invalid chunk-bytes")?;
                    if n == 0 {
                        return Err("--chunk-bytes must be positive".to_string());
                    }
                    codec.read_chunk_bytes = n;
                }
                "--flush-bits" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--flush-bits requires a number".to_string());
                    }
                    codec.flush_threshold_bits =
                        args[i].parse().map_err(|_| "invalid flush-bits")?;
                }
                "--force" => {
                    force = true;
                }
                "--no-stats" => {
                    print_stats = false;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                other if other.starts_with('-') => {
                    return Err(format!("unknown argument: {}", other));
                }
                path => {
                    paths.push(PathBuf::from(path));
                }
            }
            i += 1;
        }

        if paths.len() > 2 {
            return Err(format!("unexpected extra path: {}", paths[2].display()));
        }
        let mut paths = paths.into_iter();
        let input_file = paths.next().ok_or("missing input path")?;
        let output_file = paths.next().ok_or("missing output path")?;

        Ok(Config {
            mode,
            input_file,
            output_file,
            codec,
            force,
            print_stats,
        })
    }
}

fn print_help() {
    println!("huffpack: Streaming Huffman file compression");
    println!();
    println!("USAGE:");
    println!("    huffpack [--compress|--decompress] [OPTIONS] <INPUT> <OUTPUT>");
    println!();
    println!("MODES:");
    println!("    --compress              Compress INPUT into OUTPUT (default)");
    println!("    --decompress            Decompress INPUT into OUTPUT");
    println!();
    println!("OPTIONS:");
    println!("    --chunk-bytes <N>       Read chunk size in bytes (default: 10240)");
    println!("    --flush-bits <N>        Output flush threshold in bits (default: 81920)");
    println!("    --force                 Overwrite OUTPUT without asking");
    println!("    --no-stats              Don't print the run summary");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffpack file.txt file.txt.hc                  # Compress");
    println!("    huffpack --decompress file.txt.hc restored.txt # Decompress");
    println!("    huffpack --force --no-stats big.bin big.bin.hc # Quiet overwrite");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compress_is_default() {
        let config = Config::from_args(&args(&["in.txt", "out.hc"])).unwrap();
        assert_eq!(config.mode, Mode::Compress);
        assert_eq!(config.input_file, PathBuf::from("in.txt"));
        assert_eq!(config.output_file, PathBuf::from("out.hc"));
        assert!(!config.force);
        assert!(config.print_stats);
        assert_eq!(config.codec, CodecConfig::default());
    }

    #[test]
    fn test_decompress_mode() {
        let config =
            Config::from_args(&args(&["--decompress", "in.hc", "out.txt"])).unwrap();
        assert_eq!(config.mode, Mode::Decompress);
    }

    #[test]
    fn test_tuning_flags() {
        let config = Config::from_args(&args(&[
            "--chunk-bytes",
            "512",
            "--flush-bits",
            "4096",
            "--force",
            "--no-stats",
            "a",
            "b",
        ]))
        .unwrap();
        assert_eq!(config.codec.read_chunk_bytes, 512);
        assert_eq!(config.codec.flush_threshold_bits, 4096);
        assert!(config.force);
        assert!(!config.print_stats);
    }

    #[test]
    fn test_zero_chunk_bytes_rejected() {
        let result = Config::from_args(&args(&["--chunk-bytes", "0", "a", "b"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_paths_rejected() {
        assert!(Config::from_args(&args(&[])).is_err());
        assert!(Config::from_args(&args(&["only-one"])).is_err());
    }

    #[test]
    fn test_extra_path_rejected() {
        assert!(Config::from_args(&args(&["a", "b", "c"])).is_err());
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let result = Config::from_args(&args(&["--loud", "a", "b"]));
        assert!(result.is_err());
    }
}
