//! Error types for the sequence assembler.
//!
//! Errors chain through layers: the assembler wraps each builder failure
//! with the failing segment's position and kind, so callers can tell
//! exactly which segment stopped the run.

use std::io;

use thiserror::Error;

use crate::media::SegmentError;
use crate::models::SegmentKind;

/// Top-level assembly error.
#[derive(Error, Debug)]
pub enum AssemblyError {
    /// The input lists violate the N images / N audios / N-1 transitions
    /// invariant. Raised before any external call is issued.
    #[error(
        "sequence length mismatch: {images} images, {audios} audio clips, \
         {transitions} transitions (need N, N, N-1 with N >= 1)"
    )]
    SequenceLengthMismatch {
        images: usize,
        audios: usize,
        transitions: usize,
    },

    /// Building one segment failed; position is 1-based within its kind.
    #[error("{kind} {position} failed: {source}")]
    SegmentFailed {
        position: usize,
        kind: SegmentKind,
        #[source]
        source: SegmentError,
    },

    /// The final lossless concatenation failed. Scratch segments are left
    /// in place for postmortem inspection.
    #[error("concatenation failed with exit code {exit_code}: {message}")]
    ConcatenationFailed { exit_code: i32, message: String },

    /// Scratch or manifest I/O failed.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl AssemblyError {
    /// Create a segment failed error.
    pub fn segment_failed(position: usize, kind: SegmentKind, source: SegmentError) -> Self {
        Self::SegmentFailed {
            position,
            kind,
            source,
        }
    }

    /// Create an I/O error with operation context.
    pub fn io_error(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Map a concat tool failure onto the assembly taxonomy.
    pub(crate) fn from_concat_failure(source: SegmentError) -> Self {
        match source {
            SegmentError::CommandFailed {
                exit_code, message, ..
            } => Self::ConcatenationFailed { exit_code, message },
            SegmentError::OutputMissing { path } => Self::ConcatenationFailed {
                exit_code: 0,
                message: format!("output file missing or empty: {}", path.display()),
            },
            SegmentError::Io { operation, source } => Self::Io { operation, source },
            other => Self::ConcatenationFailed {
                exit_code: -1,
                message: other.to_string(),
            },
        }
    }
}

/// Result type for assembly operations.
pub type AssemblyResult<T> = Result<T, AssemblyError>;
