//! Error type shared by every stage of the conversion pipeline.

use std::path::PathBuf;

/// All failures the pipeline can report.
///
/// Each variant carries enough context to print a useful message on its own;
/// the CLI only prefixes it with `Error:`.
#[derive(Debug, thiserror::Error)]
pub enum StretchError {
    #[error("Cannot open {}: file not found", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("Cannot open {}: {reason}", .path.display())]
    InputUnreadable { path: PathBuf, reason: String },

    #[error("Band {band} out of range: source has {available} band(s)")]
    BandOutOfRange { band: usize, available: usize },

    #[error(
        "Band dimensions differ: expected {expected_width}x{expected_height}, got {width}x{height}"
    )]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    #[error("Invalid stretch parameters: {0}")]
    InvalidParameters(String),

    #[error("Unsupported output format: {0}")]
    UnsupportedOutput(String),

    #[error("Failed to write {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },

    #[error("Config error: {0}")]
    Config(String),
}

impl StretchError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        StretchError::InputUnreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        StretchError::Write {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T, E = StretchError> = std::result::Result<T, E>;
