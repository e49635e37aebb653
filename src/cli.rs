use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lzw12::{decoder::FixedDecoder, encoder::FixedEncoder};

#[derive(Parser)]
#[command(name = "lzwc")]
#[command(about = "Compress and decompress files with 12 bit LZW")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Compress a file
    lzwc compress notes.txt notes.lzw

    # Decompress it back
    lzwc d notes.lzw notes.txt
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log every run at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compress INPUT into OUTPUT
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,
        /// Where to write the compressed data, overwritten if present
        output: PathBuf,
    },
    /// Decompress INPUT into OUTPUT
    #[command(alias = "d")]
    Decompress {
        /// File produced by the compress command
        input: PathBuf,
        /// Where to write the decompressed data, overwritten if present
        output: PathBuf,
    },
}

fn open_files(input: &Path, output: &Path) -> Result<(BufReader<File>, BufWriter<File>)> {
    let reader = File::open(input)
        .with_context(|| format!("Failed to open input file {}", input.display()))?;
    let writer = File::create(output)
        .with_context(|| format!("Failed to create output file {}", output.display()))?;
    Ok((BufReader::new(reader), BufWriter::new(writer)))
}

fn file_size(path: &Path) -> Result<u64> {
    Ok(fs::metadata(path)
        .with_context(|| format!("Failed to read metadata of {}", path.display()))?
        .len())
}

pub fn compress(input: &Path, output: &Path) -> Result<()> {
    tracing::info!("Compressing...");
    let (reader, mut writer) = open_files(input, output)?;

    let summary = FixedEncoder::encode(reader, &mut writer)
        .with_context(|| format!("Failed to compress {}", input.display()))?;
    drop(writer);

    tracing::info!(
        input_bytes = file_size(input)?,
        output_bytes = file_size(output)?,
        codewords = summary.codewords,
        resets = summary.resets.len(),
        "Compressed {} into {}",
        input.display(),
        output.display()
    );
    Ok(())
}

pub fn decompress(input: &Path, output: &Path) -> Result<()> {
    tracing::info!("Decompressing...");
    let (reader, mut writer) = open_files(input, output)?;

    let summary = FixedDecoder::decode(reader, &mut writer)
        .with_context(|| format!("Failed to decompress {}", input.display()))?;
    drop(writer);

    tracing::info!(
        input_bytes = file_size(input)?,
        output_bytes = file_size(output)?,
        codewords = summary.codewords,
        resets = summary.resets.len(),
        "Decompressed {} into {}",
        input.display(),
        output.display()
    );
    Ok(())
}
