//! Transition trimmer.
//!
//! Extracts a centered window of the requested duration from a longer
//! transition clip, stripped of audio and re-encoded with the shared
//! segment parameters.

use std::path::Path;

use crate::media::{MediaTool, SegmentError, SegmentResult};
use crate::models::{Segment, SegmentKind};

/// Start offset of the trim window.
///
/// Discards equal amounts from head and tail where possible. The floor at
/// zero biases short sources toward head content; there is deliberately no
/// matching clamp at the tail.
pub fn window_start(full_duration: f64, target_duration: f64) -> f64 {
    ((full_duration - target_duration) / 2.0).max(0.0)
}

/// Trim `source` to `target_duration` seconds, overwriting `output`.
///
/// Fails with `InsufficientSourceLength` when the source is shorter than
/// the target - the trimmer never pads.
pub fn trim_transition(
    tool: &dyn MediaTool,
    source: &Path,
    target_duration: f64,
    output: &Path,
    position: usize,
) -> SegmentResult<Segment> {
    if target_duration <= 0.0 {
        return Err(SegmentError::InvalidTarget {
            requested: target_duration,
        });
    }

    let full_duration = tool.probe_duration(source)?;
    if full_duration < target_duration {
        return Err(SegmentError::insufficient_source_length(
            source,
            full_duration,
            target_duration,
        ));
    }

    let start = window_start(full_duration, target_duration);

    tracing::debug!(
        "Trimming transition {}: {:.3}s window at {:.3}s from {}",
        position,
        target_duration,
        start,
        source.display()
    );

    tool.extract_window(source, start, target_duration, output)?;

    Ok(Segment::new(
        output,
        SegmentKind::Transition,
        position,
        target_duration,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::test_support::{RecordingTool, ToolCall};
    use std::path::PathBuf;

    #[test]
    fn window_is_centered() {
        assert!((window_start(5.0, 2.5) - 1.25).abs() < 1e-9);
        assert!((window_start(10.0, 2.0) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn exact_length_source_starts_at_zero() {
        assert_eq!(window_start(2.5, 2.5), 0.0);
    }

    #[test]
    fn window_start_floors_at_zero() {
        // Shorter-than-target sources are rejected before extraction, but
        // the formula itself must never go negative.
        assert_eq!(window_start(1.0, 2.0), 0.0);
    }

    #[test]
    fn trims_centered_window_without_audio_probe_of_output() {
        let tool = RecordingTool::new().with_duration("wipe.mp4", 5.0);

        let segment = trim_transition(
            &tool,
            Path::new("wipe.mp4"),
            2.5,
            Path::new("/scratch/transition_01.mp4"),
            1,
        )
        .unwrap();

        assert_eq!(segment.kind, SegmentKind::Transition);
        assert!((segment.duration_secs - 2.5).abs() < 1e-9);

        let calls = tool.calls();
        assert_eq!(calls.len(), 2);
        match &calls[1] {
            ToolCall::Window {
                input,
                start,
                duration,
                output,
            } => {
                assert_eq!(input, &PathBuf::from("wipe.mp4"));
                assert!((start - 1.25).abs() < 1e-9);
                assert!((duration - 2.5).abs() < 1e-9);
                assert_eq!(output, &PathBuf::from("/scratch/transition_01.mp4"));
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[test]
    fn short_source_is_rejected_without_extraction() {
        let tool = RecordingTool::new().with_duration("wipe.mp4", 2.0);

        let result = trim_transition(
            &tool,
            Path::new("wipe.mp4"),
            2.5,
            Path::new("/scratch/transition_01.mp4"),
            1,
        );

        match result {
            Err(SegmentError::InsufficientSourceLength {
                available,
                requested,
                ..
            }) => {
                assert!((available - 2.0).abs() < 1e-9);
                assert!((requested - 2.5).abs() < 1e-9);
            }
            other => panic!("expected InsufficientSourceLength, got {:?}", other.map(|_| ())),
        }
        assert_eq!(tool.calls().len(), 1);
    }

    #[test]
    fn non_positive_target_is_rejected_before_probing() {
        let tool = RecordingTool::new();

        let result = trim_transition(
            &tool,
            Path::new("wipe.mp4"),
            0.0,
            Path::new("/scratch/transition_01.mp4"),
            1,
        );

        assert!(matches!(result, Err(SegmentError::InvalidTarget { .. })));
        assert!(tool.calls().is_empty());
    }

    #[test]
    fn identical_inputs_make_identical_timing_decisions() {
        for _ in 0..2 {
            let tool = RecordingTool::new().with_duration("wipe.mp4", 5.0);
            trim_transition(
                &tool,
                Path::new("wipe.mp4"),
                2.5,
                Path::new("/scratch/transition_01.mp4"),
                1,
            )
            .unwrap();

            match &tool.calls()[1] {
                ToolCall::Window { start, duration, .. } => {
                    assert!((start - 1.25).abs() < 1e-9);
                    assert!((duration - 2.5).abs() < 1e-9);
                }
                other => panic!("unexpected call: {:?}", other),
            }
        }
    }
}
