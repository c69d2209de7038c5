// File: crates/misp-plot/src/error.rs
// Summary: Error taxonomy for loading, rendering and writing charts.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    /// Bad command line; carries clap's rendered usage message.
    #[error(transparent)]
    Usage(clap::Error),

    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("failed to read input {}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed input {}: missing required column `{column}`", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("malformed input {}: line {line}: column `{column}`: {reason}", path.display())]
    MalformedInput {
        path: PathBuf,
        column: String,
        line: u64,
        reason: String,
    },

    #[error("failed to write output image {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to render chart: {0:#}")]
    Render(anyhow::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PlotError {
    /// Process exit status for this failure. Success is 0; every variant is non-zero.
    pub fn exit_code(&self) -> u8 {
        match self {
            PlotError::Usage(_) | PlotError::InvalidConfig(_) => 2,
            PlotError::InputNotFound { .. } | PlotError::InputRead { .. } => 3,
            PlotError::MissingColumn { .. } | PlotError::MalformedInput { .. } => 4,
            PlotError::OutputWrite { .. } => 5,
            PlotError::Render(_) => 6,
        }
    }

    /// True for the malformed-input family (missing or unparseable column).
    pub fn is_malformed(&self) -> bool {
        matches!(self, PlotError::MissingColumn { .. } | PlotError::MalformedInput { .. })
    }
}

pub type Result<T, E = PlotError> = std::result::Result<T, E>;
