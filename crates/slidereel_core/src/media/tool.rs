//! External media tool boundary.
//!
//! All probing and transcoding is delegated to an external tool invoked as
//! a blocking subprocess. The trait keeps the assembly logic independent of
//! the concrete tool and lets tests record invocations without spawning
//! processes.

use std::path::Path;

use super::errors::SegmentResult;

/// The probing and transcoding operations the assembly pipeline needs.
///
/// Implementations issue one blocking call per operation and return once
/// the external process has exited. The production implementation is
/// [`super::FfmpegTool`].
///
/// # Example
///
/// ```ignore
/// let duration = tool.probe_duration(Path::new("narration.mp3"))?;
/// tool.encode_still_segment(image, audio, duration, &segment_path)?;
/// ```
pub trait MediaTool {
    /// Report a media file's playback duration in seconds.
    ///
    /// Must work on both audio-only and video files. Fails with
    /// `MediaUnreadable` when the file is missing, empty, or the container
    /// cannot be parsed.
    fn probe_duration(&self, path: &Path) -> SegmentResult<f64>;

    /// Encode a still image plus its audio into a constant-frame-rate
    /// segment of exactly `duration` seconds, overwriting `output`.
    fn encode_still_segment(
        &self,
        image: &Path,
        audio: &Path,
        duration: f64,
        output: &Path,
    ) -> SegmentResult<()>;

    /// Re-encode the `[start, start + duration)` window of `input` into
    /// `output`, dropping the audio track, overwriting `output`.
    fn extract_window(
        &self,
        input: &Path,
        start: f64,
        duration: f64,
        output: &Path,
    ) -> SegmentResult<()>;

    /// Losslessly concatenate the segments listed in `manifest` (stream
    /// copy, no re-encode) into `output`.
    fn concat(&self, manifest: &Path, output: &Path) -> SegmentResult<()>;
}
