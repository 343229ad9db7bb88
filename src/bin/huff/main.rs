mod progress;

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{bail, WrapErr};
use console::style;
use huffproc::decoding::bit_reader::BitReader;
use huffproc::encoding::bit_writer::BitWriter;
use huffproc::{CodecStats, Compressor, DebugLevel, Decompressor};
use progress::{fmt_size, ProgressMonitor};
use tracing::info;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

/// File name extension of compressed files
const COMPRESSED_EXTENSION: &str = "hf";

#[derive(Parser)]
#[command(version, about = "Compress and decompress files with Huffman coding")]
struct Cli {
    /// Print more about what the codec does. Once for a summary of every phase, twice
    /// for every code and tree node
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    Compress {
        input: PathBuf,
        /// Where to put the compressed file, defaults to the input with `.hf` appended
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Decompress a file created by `compress`
    Decompress {
        input: PathBuf,
        /// Where to put the decompressed file, defaults to the input without `.hf`
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let (debug, level) = match cli.verbose {
        0 => (DebugLevel::Off, LevelFilter::INFO),
        1 => (DebugLevel::Low, LevelFilter::DEBUG),
        _ => (DebugLevel::High, LevelFilter::TRACE),
    };
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .with(level)
        .init();

    match cli.command {
        Commands::Compress { input, output } => {
            let output = output.unwrap_or_else(|| compressed_path(&input));
            compress(&input, &output, debug)
        }
        Commands::Decompress { input, output } => {
            let output = output.unwrap_or_else(|| decompressed_path(&input));
            decompress(&input, &output, debug)
        }
    }
}

fn compress(input: &Path, output: &Path, debug: DebugLevel) -> color_eyre::Result<()> {
    let source = File::open(input)
        .wrap_err_with(|| format!("failed to open input file: {}", input.display()))?;
    let size = source.metadata()?.len() as usize;

    // The compressor reads its input twice, buffering it keeps the file from
    // changing between the two passes
    let mut data = Vec::with_capacity(size);
    ProgressMonitor::new(source, size)
        .read_to_end(&mut data)
        .wrap_err_with(|| format!("failed to read input file: {}", input.display()))?;

    let sink = File::create(output)
        .wrap_err_with(|| format!("failed to create output file: {}", output.display()))?;
    let mut writer = BitWriter::new(BufWriter::new(sink));
    let stats = Compressor::new(debug)
        .compress(BitReader::new(Cursor::new(data)), &mut writer)
        .wrap_err_with(|| format!("failed to compress {}", input.display()))?;
    writer.finish()?.flush()?;

    report(input, output, size as u64, stats.bits_written.div_ceil(8));
    report_stats(&stats);
    Ok(())
}

fn decompress(input: &Path, output: &Path, debug: DebugLevel) -> color_eyre::Result<()> {
    let source = File::open(input)
        .wrap_err_with(|| format!("failed to open input file: {}", input.display()))?;
    let size = source.metadata()?.len() as usize;

    let sink = File::create(output)
        .wrap_err_with(|| format!("failed to create output file: {}", output.display()))?;
    let mut reader = BitReader::new(ProgressMonitor::new(source, size));
    let mut writer = BitWriter::new(BufWriter::new(sink));
    let result = Decompressor::new(debug).decompress(&mut reader, &mut writer);
    reader.into_inner().finish();

    let stats = match result {
        Ok(stats) => stats,
        Err(err) => {
            drop(writer);
            // Whatever was decoded before the failure would look like a complete file
            let _ = std::fs::remove_file(output);
            if err.is_format_mismatch() {
                bail!("{} is not a huffman compressed file: {}", input.display(), err)
            }
            return Err(err).wrap_err_with(|| format!("failed to decompress {}", input.display()));
        }
    };
    writer.finish()?.flush()?;

    report(input, output, size as u64, stats.bits_written / 8);
    report_stats(&stats);
    Ok(())
}

fn report(input: &Path, output: &Path, from: u64, to: u64) {
    info!(
        "{} -> {}, {}",
        style(input.display()).bold(),
        style(output.display()).bold().green(),
        size_summary(from, to)
    );
}

/// Sizes before and after, plus the ratio when there is one
fn size_summary(from: u64, to: u64) -> String {
    let sizes = format!("{} to {}", fmt_size(from as f64), fmt_size(to as f64));
    if from == 0 {
        sizes
    } else {
        format!("{} ({:.1}%)", sizes, to as f64 / from as f64 * 100.0)
    }
}

fn report_stats(stats: &CodecStats) {
    tracing::debug!(
        bits_read = stats.bits_read,
        bits_written = stats.bits_written,
        "bit channel totals"
    );
}

/// `file.txt` becomes `file.txt.hf`
fn compressed_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".");
    name.push(COMPRESSED_EXTENSION);
    PathBuf::from(name)
}

/// `file.txt.hf` becomes `file.txt`, anything else gets `.out` appended
fn decompressed_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == COMPRESSED_EXTENSION) {
        input.with_extension("")
    } else {
        let mut name = OsString::from(input.as_os_str());
        name.push(".out");
        PathBuf::from(name)
    }
}
