//! ffmpeg-backed implementation of the media tool boundary.
//!
//! Builds fixed argument sets for the three encode operations and runs
//! ffmpeg/ffprobe as blocking subprocesses. Every generated segment uses
//! the shared encode settings so that the final stream-copy concatenation
//! sees identical codec parameters across segments.

use std::path::Path;
use std::sync::Arc;

use crate::config::{EncodeSettings, Settings};
use crate::logging::RunLogger;

use super::errors::{SegmentError, SegmentResult};
use super::probe;
use super::runner::run_tool;
use super::tool::MediaTool;

/// Production media tool shelling out to ffmpeg and ffprobe.
pub struct FfmpegTool {
    ffmpeg: String,
    ffprobe: String,
    encode: EncodeSettings,
    show_command_pretty: bool,
    logger: Arc<RunLogger>,
}

impl FfmpegTool {
    /// Create a tool from application settings and a run logger.
    pub fn new(settings: &Settings, logger: Arc<RunLogger>) -> Self {
        Self {
            ffmpeg: settings.paths.ffmpeg.clone(),
            ffprobe: settings.paths.ffprobe.clone(),
            encode: settings.encode.clone(),
            show_command_pretty: settings.logging.show_command_pretty,
            logger,
        }
    }

    /// The encode settings shared by every segment this tool produces.
    pub fn encode_settings(&self) -> &EncodeSettings {
        &self.encode
    }

    fn run_ffmpeg(&self, args: &[String]) -> SegmentResult<()> {
        run_tool(&self.logger, &self.ffmpeg, args, self.show_command_pretty)?;
        Ok(())
    }

    /// Fail if the tool exited cleanly but wrote nothing.
    fn check_output(path: &Path) -> SegmentResult<()> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > 0 => Ok(()),
            _ => Err(SegmentError::output_missing(path)),
        }
    }
}

impl MediaTool for FfmpegTool {
    fn probe_duration(&self, path: &Path) -> SegmentResult<f64> {
        probe::probe_duration(&self.ffprobe, path)
    }

    fn encode_still_segment(
        &self,
        image: &Path,
        audio: &Path,
        duration: f64,
        output: &Path,
    ) -> SegmentResult<()> {
        let args = build_still_segment_args(&self.encode, image, audio, duration, output);
        self.run_ffmpeg(&args)?;
        Self::check_output(output)
    }

    fn extract_window(
        &self,
        input: &Path,
        start: f64,
        duration: f64,
        output: &Path,
    ) -> SegmentResult<()> {
        let args = build_window_args(&self.encode, input, start, duration, output);
        self.run_ffmpeg(&args)?;
        Self::check_output(output)
    }

    fn concat(&self, manifest: &Path, output: &Path) -> SegmentResult<()> {
        let args = build_concat_args(manifest, output);
        self.run_ffmpeg(&args)?;
        Self::check_output(output)
    }
}

/// Arguments for encoding a still image + audio into one segment.
///
/// The image is looped at the configured frame rate and the stream is cut
/// at the probed audio duration; `-shortest` guards against the looped
/// video outrunning the audio.
fn build_still_segment_args(
    encode: &EncodeSettings,
    image: &Path,
    audio: &Path,
    duration: f64,
    output: &Path,
) -> Vec<String> {
    vec![
        "-y".into(),
        "-loop".into(),
        "1".into(),
        "-i".into(),
        image.to_string_lossy().into_owned(),
        "-i".into(),
        audio.to_string_lossy().into_owned(),
        "-c:v".into(),
        encode.video_codec.clone(),
        "-tune".into(),
        "stillimage".into(),
        "-preset".into(),
        encode.preset.clone(),
        "-crf".into(),
        encode.crf.to_string(),
        "-r".into(),
        encode.frame_rate.to_string(),
        "-pix_fmt".into(),
        encode.pixel_format.clone(),
        "-c:a".into(),
        encode.audio_codec.clone(),
        "-b:a".into(),
        encode.audio_bitrate.clone(),
        "-t".into(),
        format_secs(duration),
        "-shortest".into(),
        output.to_string_lossy().into_owned(),
    ]
}

/// Arguments for re-encoding a window of a transition clip, audio dropped.
fn build_window_args(
    encode: &EncodeSettings,
    input: &Path,
    start: f64,
    duration: f64,
    output: &Path,
) -> Vec<String> {
    vec![
        "-y".into(),
        "-ss".into(),
        format_secs(start),
        "-i".into(),
        input.to_string_lossy().into_owned(),
        "-t".into(),
        format_secs(duration),
        "-an".into(),
        "-c:v".into(),
        encode.video_codec.clone(),
        "-preset".into(),
        encode.preset.clone(),
        "-crf".into(),
        encode.crf.to_string(),
        "-r".into(),
        encode.frame_rate.to_string(),
        "-pix_fmt".into(),
        encode.pixel_format.clone(),
        output.to_string_lossy().into_owned(),
    ]
}

/// Arguments for lossless concat-demuxer concatenation (stream copy).
fn build_concat_args(manifest: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".into(),
        "-f".into(),
        "concat".into(),
        "-safe".into(),
        "0".into(),
        "-i".into(),
        manifest.to_string_lossy().into_owned(),
        "-c".into(),
        "copy".into(),
        output.to_string_lossy().into_owned(),
    ]
}

/// Millisecond-precision seconds formatting for ffmpeg time arguments.
fn format_secs(secs: f64) -> String {
    format!("{:.3}", secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode() -> EncodeSettings {
        EncodeSettings::default()
    }

    /// Value of a flag in an ffmpeg argument list.
    fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .map(|s| s.as_str())
    }

    #[test]
    fn still_segment_args_fix_rate_and_cut() {
        let args = build_still_segment_args(
            &encode(),
            Path::new("/deck/s1.png"),
            Path::new("/deck/n1.mp3"),
            4.0,
            Path::new("/scratch/slide_01.mp4"),
        );

        assert_eq!(args[0], "-y");
        assert_eq!(flag_value(&args, "-loop"), Some("1"));
        assert_eq!(flag_value(&args, "-r"), Some("30"));
        assert_eq!(flag_value(&args, "-t"), Some("4.000"));
        assert_eq!(flag_value(&args, "-pix_fmt"), Some("yuv420p"));
        assert_eq!(flag_value(&args, "-c:a"), Some("aac"));
        assert!(args.iter().any(|a| a == "-shortest"));
        assert_eq!(args.last().unwrap(), "/scratch/slide_01.mp4");
    }

    #[test]
    fn window_args_seek_and_strip_audio() {
        let args = build_window_args(
            &encode(),
            Path::new("/deck/t1.mp4"),
            1.25,
            2.5,
            Path::new("/scratch/transition_01.mp4"),
        );

        assert_eq!(flag_value(&args, "-ss"), Some("1.250"));
        assert_eq!(flag_value(&args, "-t"), Some("2.500"));
        assert_eq!(flag_value(&args, "-c:v"), Some("libx264"));
        assert!(args.iter().any(|a| a == "-an"));
        assert!(!args.iter().any(|a| a == "-c:a"));
    }

    #[test]
    fn concat_args_stream_copy() {
        let args = build_concat_args(Path::new("/scratch/concat.txt"), Path::new("/out/final.mp4"));

        assert_eq!(flag_value(&args, "-f"), Some("concat"));
        assert_eq!(flag_value(&args, "-safe"), Some("0"));
        assert_eq!(flag_value(&args, "-c"), Some("copy"));
        assert_eq!(flag_value(&args, "-i"), Some("/scratch/concat.txt"));
        assert_eq!(args.last().unwrap(), "/out/final.mp4");
    }

    #[test]
    fn seconds_format_is_millisecond_precision() {
        assert_eq!(format_secs(0.0), "0.000");
        assert_eq!(format_secs(1.25), "1.250");
        assert_eq!(format_secs(9.4999), "9.500");
    }
}
