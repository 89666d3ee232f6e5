//! Segment and sequence structures.
//!
//! A segment is one self-contained encoded clip in the run's scratch
//! directory. The sequence is the explicit ordered list handed to the
//! concatenation step - ordering never relies on directory listing order
//! or filename parsing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Kind of generated segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// A static slide held for the duration of its narration.
    Slide,
    /// A trimmed, silent transition clip.
    Transition,
}

impl SegmentKind {
    /// Lowercase name used in scratch filenames and log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::Slide => "slide",
            SegmentKind::Transition => "transition",
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated segment file, ready for concatenation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Path of the encoded segment in the scratch directory.
    pub path: PathBuf,
    /// Whether this is a slide or a transition.
    pub kind: SegmentKind,
    /// 1-based index among segments of the same kind.
    pub position: usize,
    /// Intended playback duration in seconds (audio length for slides,
    /// trim target for transitions).
    pub duration_secs: f64,
}

impl Segment {
    /// Create a new segment reference.
    pub fn new(
        path: impl Into<PathBuf>,
        kind: SegmentKind,
        position: usize,
        duration_secs: f64,
    ) -> Self {
        Self {
            path: path.into(),
            kind,
            position,
            duration_secs,
        }
    }

    /// Display string for logs (e.g. "transition 2").
    pub fn display_name(&self) -> String {
        format!("{} {}", self.kind, self.position)
    }
}

/// Ordered list of segments for one assembly run.
///
/// For N slides the finished sequence holds `2N - 1` entries in the pattern
/// slide, transition, slide, ..., slide: no transition before the first
/// slide or after the last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    segments: Vec<Segment>,
}

impl Sequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sequence with room for `slide_count` slides and their
    /// interleaved transitions.
    pub fn with_capacity_for(slide_count: usize) -> Self {
        Self {
            segments: Vec::with_capacity(expected_len(slide_count)),
        }
    }

    /// Append a segment in output order.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Number of segments appended so far.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether the sequence is complete for `slide_count` slides
    /// (length `2N - 1`, alternating kinds, slides at both ends).
    pub fn is_complete_for(&self, slide_count: usize) -> bool {
        if self.segments.len() != expected_len(slide_count) {
            return false;
        }
        self.segments.iter().enumerate().all(|(i, s)| {
            let expected = if i % 2 == 0 {
                SegmentKind::Slide
            } else {
                SegmentKind::Transition
            };
            s.kind == expected
        })
    }

    /// Iterate segments in output order.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Segment paths in output order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.segments.iter().map(|s| s.path.as_path())
    }

    /// Sum of the intended segment durations in seconds.
    ///
    /// The concatenated output should match this, modulo container
    /// overhead.
    pub fn total_duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration_secs).sum()
    }
}

/// Expected sequence length for `slide_count` slides.
pub(crate) fn expected_len(slide_count: usize) -> usize {
    if slide_count == 0 {
        0
    } else {
        2 * slide_count - 1
    }
}
