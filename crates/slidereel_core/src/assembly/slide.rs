//! Slide segment builder.
//!
//! Turns one static image + one narration clip into a constant-frame-rate
//! video segment whose length equals the narration exactly.

use std::path::Path;

use crate::media::{MediaTool, SegmentError, SegmentResult};
use crate::models::{Segment, SegmentKind, Slide};

/// Build the video segment for one slide, overwriting `output`.
///
/// The narration is probed first; the still image is then looped for
/// exactly that duration with the audio muxed in unmodified. Unreadable
/// or zero-duration narration is an error - no default duration is ever
/// substituted.
pub fn build_slide_segment(
    tool: &dyn MediaTool,
    slide: &Slide,
    output: &Path,
) -> SegmentResult<Segment> {
    let duration = tool.probe_duration(&slide.audio)?;
    if duration <= 0.0 {
        return Err(SegmentError::media_unreadable(
            &slide.audio,
            "zero-duration audio",
        ));
    }

    tracing::debug!(
        "Building {} ({:.3}s) -> {}",
        slide.display_name(),
        duration,
        output.display()
    );

    tool.encode_still_segment(&slide.image, &slide.audio, duration, output)?;

    Ok(Segment::new(
        output,
        SegmentKind::Slide,
        slide.position,
        duration,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::test_support::{RecordingTool, ToolCall};
    use std::path::PathBuf;

    #[test]
    fn probes_audio_then_encodes_for_that_duration() {
        let tool = RecordingTool::new().with_duration("n1.mp3", 4.0);
        let slide = Slide::new("s1.png", "n1.mp3", 1);

        let segment =
            build_slide_segment(&tool, &slide, Path::new("/scratch/slide_01.mp4")).unwrap();

        assert_eq!(segment.kind, SegmentKind::Slide);
        assert_eq!(segment.position, 1);
        assert!((segment.duration_secs - 4.0).abs() < 1e-9);

        let calls = tool.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ToolCall::Probe(PathBuf::from("n1.mp3")));
        match &calls[1] {
            ToolCall::StillSegment {
                image,
                audio,
                duration,
                output,
            } => {
                assert_eq!(image, &PathBuf::from("s1.png"));
                assert_eq!(audio, &PathBuf::from("n1.mp3"));
                assert!((duration - 4.0).abs() < 1e-9);
                assert_eq!(output, &PathBuf::from("/scratch/slide_01.mp4"));
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[test]
    fn unreadable_audio_propagates_without_encoding() {
        let tool = RecordingTool::new();
        let slide = Slide::new("s1.png", "missing.mp3", 1);

        let result = build_slide_segment(&tool, &slide, Path::new("/scratch/slide_01.mp4"));

        assert!(matches!(result, Err(SegmentError::MediaUnreadable { .. })));
        assert_eq!(tool.calls().len(), 1);
    }

    #[test]
    fn zero_duration_audio_is_rejected() {
        let tool = RecordingTool::new().with_duration("silent.mp3", 0.0);
        let slide = Slide::new("s1.png", "silent.mp3", 1);

        let result = build_slide_segment(&tool, &slide, Path::new("/scratch/slide_01.mp4"));

        match result {
            Err(SegmentError::MediaUnreadable { reason, .. }) => {
                assert!(reason.contains("zero-duration"));
            }
            other => panic!("expected MediaUnreadable, got {:?}", other.map(|_| ())),
        }
        assert_eq!(tool.calls().len(), 1);
    }
}
