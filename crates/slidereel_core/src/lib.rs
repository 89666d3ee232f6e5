//! SlideReel Core - slideshow assembly backend.
//!
//! This crate contains all assembly logic with zero CLI dependencies.
//! It turns N slide images + N narration clips + (N-1) transition clips
//! into a single video file by driving ffmpeg/ffprobe as blocking
//! subprocesses.
//!
//! Module overview:
//! - [`config`] - TOML settings (paths, encode parameters, logging)
//! - [`logging`] - per-run file logger and tracing setup
//! - [`models`] - slides, segments, sequences, assembly jobs
//! - [`media`] - external tool boundary (probe, encode, concat)
//! - [`assembly`] - segment builders and the sequence assembler

pub mod assembly;
pub mod config;
pub mod logging;
pub mod media;
pub mod models;

// Re-exports for the common entry points.
pub use assembly::{AssemblyError, SequenceAssembler};
pub use config::Settings;
pub use media::{FfmpegTool, MediaTool, SegmentError};
pub use models::{AssemblyJob, Segment, SegmentKind, Sequence, Slide};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
