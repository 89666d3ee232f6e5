//! Slide and assembly job structures.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One slide: a static image paired with its narration audio.
///
/// Position is 1-based and determines output ordering. Slides are always
/// processed strictly in position order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Path to the static slide image.
    pub image: PathBuf,
    /// Path to the narration audio for this slide.
    pub audio: PathBuf,
    /// 1-based position in the presentation.
    pub position: usize,
}

impl Slide {
    /// Create a new slide.
    pub fn new(image: impl Into<PathBuf>, audio: impl Into<PathBuf>, position: usize) -> Self {
        Self {
            image: image.into(),
            audio: audio.into(),
            position,
        }
    }

    /// Display string for logs (e.g. "slide 3: intro.png + intro.mp3").
    pub fn display_name(&self) -> String {
        format!(
            "slide {}: {} + {}",
            self.position,
            file_name_or(&self.image, "?"),
            file_name_or(&self.audio, "?")
        )
    }
}

fn file_name_or(path: &Path, fallback: &str) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| fallback.to_string())
}

/// Full input description for one assembly run.
///
/// Holds the ordered image/audio/transition lists. The lists must satisfy
/// `images.len() == audios.len()` and `transitions.len() == images.len() - 1`;
/// the assembler checks this before issuing any external call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyJob {
    /// Ordered slide images.
    pub images: Vec<PathBuf>,
    /// Ordered narration clips, paired with `images` by index.
    pub audios: Vec<PathBuf>,
    /// Ordered transition source clips, one per adjacent slide pair.
    pub transitions: Vec<PathBuf>,
    /// Target duration for each trimmed transition, in seconds.
    pub transition_duration: f64,
    /// Path of the final concatenated video.
    pub output_path: PathBuf,
}

impl AssemblyJob {
    /// Create a new assembly job.
    pub fn new(
        images: Vec<PathBuf>,
        audios: Vec<PathBuf>,
        transitions: Vec<PathBuf>,
        transition_duration: f64,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            images,
            audios,
            transitions,
            transition_duration,
            output_path: output_path.into(),
        }
    }

    /// Number of slides in this job.
    pub fn slide_count(&self) -> usize {
        self.images.len()
    }

    /// Whether the input lists satisfy the N / N / N-1 invariant with N >= 1.
    pub fn lengths_match(&self) -> bool {
        !self.images.is_empty()
            && self.images.len() == self.audios.len()
            && self.transitions.len() == self.images.len() - 1
    }

    /// Iterate slides in position order.
    pub fn slides(&self) -> impl Iterator<Item = Slide> + '_ {
        self.images
            .iter()
            .zip(self.audios.iter())
            .enumerate()
            .map(|(i, (image, audio))| Slide::new(image.clone(), audio.clone(), i + 1))
    }
}
