// ============================================================================
// madmeasurer-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Core Error Types
//
// This module defines the error type shared by the whole library together with
// a handful of constructors for subprocess failures.
//
// Per-title problems (missing clips, missing video tracks, no main title found)
// are NOT errors: they are reported through the event system and processing
// carries on. Only disc-level and filesystem failures surface as CoreError.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors raised by madmeasurer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Directory traversal error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Failed to serialize description of {}: {source}", path.display())]
    DescriptionSerialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The disc could not be opened, e.g. no title meets the minimum duration.
    #[error("Unable to open disc {}: {reason}", path.display())]
    DiscOpen { path: PathBuf, reason: String },

    #[error("No discs found")]
    NoFilesFound,

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, io::Error),

    #[error("Command '{0}' failed with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("Mount error: {0}")]
    Mount(String),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type used throughout madmeasurer-core.
pub type CoreResult<T> = Result<T, CoreError>;

pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd.into(), status, stderr.into())
}

/// Builds a `DiscOpen` error for the given disc path.
pub fn disc_open_error(path: impl Into<PathBuf>, reason: impl Into<String>) -> CoreError {
    CoreError::DiscOpen {
        path: path.into(),
        reason: reason.into(),
    }
}
