//! Encode flow - collect, compress, encode, serialize, envelope
//!
//! The pipeline is strictly linear. Per-file failures become `Skipped` outcomes;
//! a walk that cannot start or a document that cannot be serialized aborts.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::backends::collect::collect;
use crate::core::codec::encode_text;
use crate::core::error::EncodeError;
use crate::core::model::{Collection, EncodeStats, FileMap, Outcome};

/// Everything a finished run produced
#[derive(Debug)]
pub struct Encoded {
    /// base64 of the serialized file map
    pub envelope: String,
    pub file_map: FileMap,
    pub outcomes: Vec<Outcome>,
    pub stats: EncodeStats,
}

/// Encode every collected item, then serialize and wrap the document
pub fn encode_collection(collection: Collection) -> Result<Encoded, EncodeError> {
    let Collection { items, outcomes } = collection;
    tracing::debug!(items = items.len(), "collected");

    let mut file_map = FileMap::new();
    let mut stats = EncodeStats::default();

    for (identifier, packed) in items {
        stats.raw_bytes += packed.raw_len;
        stats.compressed_bytes += packed.compressed.len() as u64;
        file_map.insert(identifier, encode_text(&packed.compressed));
    }

    let document = serde_json::to_string(&file_map)?;
    let envelope = encode_text(document.as_bytes());

    for outcome in &outcomes {
        if outcome.is_skipped() {
            stats.skipped += 1;
        } else if matches!(outcome, Outcome::Included { replaced: true, .. }) {
            stats.replaced += 1;
        }
    }
    stats.included = file_map.len();
    stats.envelope_bytes = envelope.len() as u64;

    Ok(Encoded {
        envelope,
        file_map,
        outcomes,
        stats,
    })
}

/// Run the whole pipeline over a directory and/or explicit files
pub fn encode_inputs(dir: Option<&Path>, files: &[PathBuf]) -> Result<Encoded, EncodeError> {
    let collection = collect(dir, files)?;
    encode_collection(collection)
}

/// Write the envelope to `output`, or to stdout followed by a newline
pub fn write_output(envelope: &str, output: Option<&Path>) -> Result<(), EncodeError> {
    let mut stdout = io::stdout().lock();
    write_output_to(&mut stdout, envelope, output)
}

/// Like `write_output`, with the console stream supplied by the caller
pub fn write_output_to<W: Write>(
    console: &mut W,
    envelope: &str,
    output: Option<&Path>,
) -> Result<(), EncodeError> {
    match output {
        Some(path) => {
            write_file(path, envelope).map_err(|source| EncodeError::WriteOutput {
                path: path.to_path_buf(),
                source,
            })?;
            writeln!(
                console,
                "Compressed and encoded data written to {}",
                path.display()
            )
            .map_err(EncodeError::WriteStdout)?;
        }
        None => writeln!(console, "{}", envelope).map_err(EncodeError::WriteStdout)?,
    }
    console.flush().map_err(EncodeError::WriteStdout)
}

#[cfg(unix)]
fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(path)?;
    file.write_all(contents.as_bytes())
}

#[cfg(not(unix))]
fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(contents.as_bytes())
}

fn log_outcomes(outcomes: &[Outcome]) {
    for outcome in outcomes {
        match outcome {
            Outcome::Included {
                identifier,
                path,
                origin,
                replaced,
            } => {
                tracing::debug!(%identifier, path = %path.display(), ?origin, "included");
                if *replaced {
                    tracing::debug!(%identifier, "replaced an earlier entry with the same identifier");
                }
            }
            Outcome::Skipped(reason) => tracing::warn!(code = reason.code(), "{}", reason),
        }
    }
}

fn print_stats(encoded: &Encoded) {
    let stats = &encoded.stats;
    eprintln!("{}", "Pack Statistics:".bold());
    eprintln!("   Included: {}", stats.included.to_string().green());
    eprintln!("   Replaced: {}", stats.replaced);
    if stats.skipped > 0 {
        eprintln!("   Skipped: {}", stats.skipped.to_string().yellow());
        for outcome in &encoded.outcomes {
            if let Outcome::Skipped(reason) = outcome {
                eprintln!("     [{}] {}", reason.code().yellow(), reason);
            }
        }
    } else {
        eprintln!("   Skipped: 0");
    }
    eprintln!(
        "   Bytes: {} raw -> {} compressed -> {} encoded",
        stats.raw_bytes, stats.compressed_bytes, stats.envelope_bytes
    );
    eprintln!();
}

/// Run the encode command
pub fn run_encode(
    dir: Option<&Path>,
    files: &[PathBuf],
    output: Option<&Path>,
    show_stats: bool,
) -> Result<()> {
    let encoded = encode_inputs(dir, files).context("Failed to encode inputs")?;

    log_outcomes(&encoded.outcomes);
    tracing::info!(
        included = encoded.stats.included,
        skipped = encoded.stats.skipped,
        "encoded file map"
    );
    if encoded.file_map.is_empty() {
        tracing::warn!("no files were included");
    }

    if show_stats {
        print_stats(&encoded);
    }

    write_output(&encoded.envelope, output).context("Failed to write output")?;
    Ok(())
}
