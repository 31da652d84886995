//! Error types
//!
//! Two severities: a `SkipReason` drops a single entry and the run goes on,
//! an `EncodeError` aborts the whole run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why an entry was left out of the file map
#[derive(Debug, Error)]
pub enum SkipReason {
    /// The walk could not visit an entry below the root
    #[error("error accessing path {}: {source}", path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("error determining relative path for {}", path.display())]
    RelativePath { path: PathBuf },

    #[error("error reading file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An explicit path that could not be stat'ed
    #[error("file not found: {}", path.display())]
    Missing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("skipping directory: {}", path.display())]
    IsDirectory { path: PathBuf },

    #[error("error compressing file {identifier}: {source}")]
    Compress {
        identifier: String,
        #[source]
        source: io::Error,
    },
}

impl SkipReason {
    /// Short machine-friendly code, used in the stats summary
    pub fn code(&self) -> &'static str {
        match self {
            SkipReason::Access { .. } => "ACCESS",
            SkipReason::RelativePath { .. } => "RELATIVE_PATH",
            SkipReason::Read { .. } => "READ",
            SkipReason::Missing { .. } => "MISSING",
            SkipReason::IsDirectory { .. } => "IS_DIRECTORY",
            SkipReason::Compress { .. } => "COMPRESS",
        }
    }
}

/// Failures that abort the run
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("error walking directory {}: {source}", root.display())]
    WalkStart {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("error marshaling JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("error writing to output file {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing to stdout: {0}")]
    WriteStdout(#[source] io::Error),
}
