//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// filepack - bundle files into one compressed, base64-encoded JSON document.
#[derive(Parser, Debug)]
#[command(name = "filepack")]
#[command(
    author,
    version,
    about,
    long_about = r#"filepack collects files from a directory tree and/or an explicit file list,
zlib-compresses each file, base64-encodes the compressed bytes, and emits a JSON
object mapping each file identifier to its encoded content. The JSON text is
base64-encoded once more and written to stdout or to --output.

Identifiers:
- files found under --dir are keyed by their path relative to DIR
- files given as arguments are keyed by their basename

Directory entries are processed first, then file arguments in order. When two
entries share an identifier, the later one wins.

Examples:
    filepack -d assets
    filepack -d assets -o bundle.b64
    filepack config.toml data/report.csv
    filepack -d assets extra/logo.svg --stats
"#
)]
#[command(group(
    ArgGroup::new("inputs")
        .required(true)
        .multiple(true)
        .args(["dir", "files"])
))]
pub struct Cli {
    /// Directory containing files to process (walked recursively).
    #[arg(
        short = 'd',
        long = "dir",
        alias = "d",
        value_name = "DIR",
        long_help = "Directory containing files to process.\n\n\
The directory is walked recursively; symlinks are not followed. Unreadable entries\n\
are reported and skipped. If DIR itself cannot be opened the run fails."
    )]
    pub dir: Option<PathBuf>,

    /// Output file for the encoded data.
    #[arg(
        short,
        long,
        value_name = "FILE",
        long_help = "Write the encoded data to FILE (created with mode 0644, or truncated).\n\n\
If omitted, the encoded data is printed to stdout followed by a newline."
    )]
    pub output: Option<PathBuf>,

    /// Individual files to include (keyed by basename).
    #[arg(value_name = "FILES", num_args = 0..)]
    pub files: Vec<PathBuf>,

    /// Print run statistics on stderr.
    #[arg(
        long,
        long_help = "Print a summary on stderr: included, replaced and skipped counts, every\n\
skip reason, and byte totals for each stage."
    )]
    pub stats: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode (errors only).
    #[arg(
        short,
        long,
        conflicts_with = "verbose",
        long_help = "Only log errors. Skipped files are still reported in --stats.\n\n\
RUST_LOG, when set, takes precedence."
    )]
    pub quiet: bool,

    /// Verbose mode (log every included file).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Default tracing filter for the selected verbosity
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "filepack=error"
        } else if self.verbose {
            "filepack=debug"
        } else {
            "filepack=info"
        }
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    crate::flows::encode::run_encode(
        cli.dir.as_deref(),
        &cli.files,
        cli.output.as_deref(),
        cli.stats,
    )
}
