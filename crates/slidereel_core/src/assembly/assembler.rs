//! Sequence assembler: interleaves slide segments and trimmed transitions
//! into one ordered sequence, then concatenates it losslessly.
//!
//! The assembler is strictly sequential: one external call at a time, in
//! index order. Segment files are written to a run-scoped scratch
//! directory owned exclusively by this run; they are never cleaned up,
//! success or failure, so a failed run can be inspected and resumed
//! without regenerating earlier segments.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::logging::RunLogger;
use crate::media::MediaTool;
use crate::models::{AssemblyJob, SegmentKind, Sequence};

use super::errors::{AssemblyError, AssemblyResult};
use super::manifest;
use super::slide::build_slide_segment;
use super::transition::trim_transition;

/// Progress callback: (phase, percent, message).
pub type ProgressCallback = Box<dyn Fn(&str, u32, &str) + Send + Sync>;

/// Assembles an ordered slide/transition sequence into the final video.
pub struct SequenceAssembler<'t> {
    tool: &'t dyn MediaTool,
    scratch_dir: PathBuf,
    logger: Arc<RunLogger>,
    progress_callback: Option<ProgressCallback>,
}

impl<'t> SequenceAssembler<'t> {
    /// Create an assembler writing segments under `scratch_dir`.
    ///
    /// The scratch directory must be scoped to this run; two concurrent
    /// runs sharing one scratch directory are not supported.
    pub fn new(
        tool: &'t dyn MediaTool,
        scratch_dir: impl Into<PathBuf>,
        logger: Arc<RunLogger>,
    ) -> Self {
        Self {
            tool,
            scratch_dir: scratch_dir.into(),
            logger,
            progress_callback: None,
        }
    }

    /// Set the progress callback.
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn report_progress(&self, phase: &str, percent: u32, message: &str) {
        self.logger.progress(percent);
        if let Some(ref callback) = self.progress_callback {
            callback(phase, percent, message);
        }
    }

    /// Run the full assembly for `job`, returning the final output path.
    ///
    /// Fails fast with `SequenceLengthMismatch` before any external call
    /// when the input lists violate the N / N / N-1 invariant. Any later
    /// failure is terminal for the run: no retry, no partial-output
    /// cleanup.
    pub fn assemble(&self, job: &AssemblyJob) -> AssemblyResult<PathBuf> {
        if !job.lengths_match() {
            return Err(AssemblyError::SequenceLengthMismatch {
                images: job.images.len(),
                audios: job.audios.len(),
                transitions: job.transitions.len(),
            });
        }

        let slide_count = job.slide_count();
        self.logger.info(&format!(
            "Assembling {} slides, {} transitions -> {}",
            slide_count,
            job.transitions.len(),
            job.output_path.display()
        ));

        let segments_dir = self.scratch_dir.join("segments");
        fs::create_dir_all(&segments_dir)
            .map_err(|e| AssemblyError::io_error("creating scratch directory", e))?;
        if let Some(parent) = job.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| AssemblyError::io_error("creating output directory", e))?;
            }
        }

        // 2N-1 segment builds plus manifest and concat.
        let total_steps = (2 * slide_count + 1) as u32;
        let mut done_steps: u32 = 0;

        self.logger.phase("Building segments");
        let mut sequence = Sequence::with_capacity_for(slide_count);

        for slide in job.slides() {
            let index = slide.position;

            self.logger.section(&slide.display_name());
            let output = segments_dir.join(format!("slide_{:02}.mp4", index));
            let segment = build_slide_segment(self.tool, &slide, &output)
                .map_err(|e| AssemblyError::segment_failed(index, SegmentKind::Slide, e))?;
            self.logger
                .info(&format!("Built {} ({:.3}s)", segment.display_name(), segment.duration_secs));
            sequence.push(segment);

            done_steps += 1;
            self.report_progress(
                "Building segments",
                done_steps * 100 / total_steps,
                &format!("slide {}/{}", index, slide_count),
            );

            if index < slide_count {
                let source = &job.transitions[index - 1];

                self.logger.section(&format!("transition {}", index));
                let output = segments_dir.join(format!("transition_{:02}.mp4", index));
                let segment =
                    trim_transition(self.tool, source, job.transition_duration, &output, index)
                        .map_err(|e| {
                            AssemblyError::segment_failed(index, SegmentKind::Transition, e)
                        })?;
                sequence.push(segment);

                done_steps += 1;
                self.report_progress(
                    "Building segments",
                    done_steps * 100 / total_steps,
                    &format!("transition {}/{}", index, slide_count - 1),
                );
            }
        }

        debug_assert!(sequence.is_complete_for(slide_count));

        self.logger.phase("Writing manifest");
        let manifest_path = self.scratch_dir.join("concat.txt");
        manifest::write_manifest(&manifest_path, &sequence)?;
        self.logger.info(&format!(
            "Manifest: {} segments -> {}",
            sequence.len(),
            manifest_path.display()
        ));

        done_steps += 1;
        self.report_progress("Writing manifest", done_steps * 100 / total_steps, "manifest");

        self.logger.phase("Concatenating");
        self.tool
            .concat(&manifest_path, &job.output_path)
            .map_err(AssemblyError::from_concat_failure)
            .inspect_err(|_| {
                self.logger.error(&format!(
                    "Concatenation failed; scratch retained at {}",
                    self.scratch_dir.display()
                ));
            })?;

        self.report_progress("Concatenating", 100, "done");
        self.report_final_duration(&job.output_path, sequence.total_duration());
        self.logger
            .success(&format!("Assembled {}", job.output_path.display()));

        Ok(job.output_path.clone())
    }

    /// Compare the concatenated output's duration against the sum of the
    /// segment durations. Verification only - a probe failure here does
    /// not fail the run.
    fn report_final_duration(&self, output: &Path, expected: f64) {
        match self.tool.probe_duration(output) {
            Ok(actual) => {
                self.logger.info(&format!(
                    "Output duration {:.3}s (expected {:.3}s)",
                    actual, expected
                ));
                if (actual - expected).abs() > 0.5 {
                    self.logger.warn(&format!(
                        "Output duration deviates from segment total by {:.3}s",
                        (actual - expected).abs()
                    ));
                }
            }
            Err(e) => {
                self.logger
                    .warn(&format!("Could not verify output duration: {}", e));
            }
        }
    }
}
