//! Error types for per-segment media operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error from probing or generating a single segment.
#[derive(Error, Debug)]
pub enum SegmentError {
    /// An input media file is missing, empty, or cannot be parsed.
    #[error("media unreadable: {}: {reason}", path.display())]
    MediaUnreadable { path: PathBuf, reason: String },

    /// A transition source is shorter than the requested trim duration.
    #[error(
        "insufficient source length: {} is {available:.3}s, {requested:.3}s requested",
        path.display()
    )]
    InsufficientSourceLength {
        path: PathBuf,
        available: f64,
        requested: f64,
    },

    /// A trim was requested with a non-positive target duration.
    #[error("invalid trim target: {requested:.3}s (must be > 0)")]
    InvalidTarget { requested: f64 },

    /// An external tool exited with a non-zero status.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// The tool exited successfully but the expected output is missing
    /// or empty.
    #[error("output file missing or empty: {}", path.display())]
    OutputMissing { path: PathBuf },
}

impl SegmentError {
    /// Create a media unreadable error.
    pub fn media_unreadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MediaUnreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an insufficient source length error.
    pub fn insufficient_source_length(
        path: impl Into<PathBuf>,
        available: f64,
        requested: f64,
    ) -> Self {
        Self::InsufficientSourceLength {
            path: path.into(),
            available,
            requested,
        }
    }

    /// Create a command failed error.
    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// Create an I/O error with operation context.
    pub fn io_error(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create an output missing error.
    pub fn output_missing(path: impl Into<PathBuf>) -> Self {
        Self::OutputMissing { path: path.into() }
    }
}

/// Result type for segment operations.
pub type SegmentResult<T> = Result<T, SegmentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_unreadable_displays_path_and_reason() {
        let err = SegmentError::media_unreadable("/deck/a.mp3", "empty file");
        let msg = err.to_string();
        assert!(msg.contains("/deck/a.mp3"));
        assert!(msg.contains("empty file"));
    }

    #[test]
    fn insufficient_source_length_displays_durations() {
        let err = SegmentError::insufficient_source_length("/deck/t.mp4", 2.0, 2.5);
        let msg = err.to_string();
        assert!(msg.contains("2.000"));
        assert!(msg.contains("2.500"));
    }

    #[test]
    fn command_failed_displays_tool_context() {
        let err = SegmentError::command_failed("ffmpeg", 1, "invalid option");
        let msg = err.to_string();
        assert!(msg.contains("ffmpeg"));
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("invalid option"));
    }
}
