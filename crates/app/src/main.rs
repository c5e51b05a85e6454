//! huffpack: Huffman file compression command-line tool.
//!
//! Thin wrapper around `huffpack-core`: validates paths, guards against
//! clobbering the input, prompts before overwriting, then streams the
//! encode or decode and prints the run summary.

mod config;

use config::{Config, Mode};
use huffpack_core::{decode, encode};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            eprintln!("Try 'huffpack --help' for usage.");
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), String> {
    let input_path = &config.input_file;
    let output_path = &config.output_file;

    if !input_path.is_file() {
        return Err(format!(
            "cannot find '{}' (or it is not a regular file)",
            input_path.display()
        ));
    }

    // Refuse to truncate the input through the output path. Checked before
    // the output is created.
    if same_file(input_path, output_path) {
        return Err(format!(
            "'{}' and '{}' are the same file",
            input_path.display(),
            output_path.display()
        ));
    }

    if output_path.exists() && !config.force && !confirm_overwrite(output_path)? {
        println!("Aborted");
        return Ok(());
    }

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("cannot create '{}': {}", parent.display(), e))?;
        }
    }

    let input = File::open(input_path)
        .map_err(|e| format!("cannot open '{}': {}", input_path.display(), e))?;
    let output = File::create(output_path)
        .map_err(|e| format!("cannot open '{}' for writing: {}", output_path.display(), e))?;

    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);

    match config.mode {
        Mode::Compress => {
            let summary = encode(&mut reader, &mut writer, &config.codec)
                .map_err(|e| e.to_string())?;
            println!("Done!");
            if config.print_stats {
                summary.print_summary();
            }
        }
        Mode::Decompress => {
            let summary = decode(&mut reader, &mut writer, &config.codec)
                .map_err(|e| e.to_string())?;
            println!("Done!");
            if config.print_stats {
                summary.print_summary();
            }
        }
    }

    Ok(())
}

/// Ask before overwriting; only an empty line, "y", or "Y" means yes.
fn confirm_overwrite(path: &Path) -> Result<bool, String> {
    print!(
        "Output file '{}' already exists. Overwrite it? [Y/n] ",
        path.display()
    );
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut answer = String::new();
    let n = io::stdin()
        .read_line(&mut answer)
        .map_err(|e| e.to_string())?;
    if n == 0 {
        // stdin closed; never overwrite without an explicit yes
        println!();
        return Ok(false);
    }

    let answer = answer.trim();
    Ok(answer.is_empty() || answer.eq_ignore_ascii_case("y"))
}

/// True when both paths name the same underlying file.
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (a.metadata(), b.metadata()) {
        (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}
