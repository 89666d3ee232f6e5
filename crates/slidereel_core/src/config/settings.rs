//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Every field carries a serde default so partial config files load cleanly.

use serde::{Deserialize, Serialize};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Encode parameters shared by every generated segment.
    #[serde(default)]
    pub encode: EncodeSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Path configuration for output, scratch, logs, and tool executables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Output folder for assembled videos.
    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Root folder for per-run scratch directories.
    #[serde(default = "default_scratch_root")]
    pub scratch_root: String,

    /// Folder for run log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// ffmpeg executable (name resolved via PATH, or an absolute path).
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,

    /// ffprobe executable (name resolved via PATH, or an absolute path).
    #[serde(default = "default_ffprobe")]
    pub ffprobe: String,
}

fn default_output_folder() -> String {
    "reel_output".to_string()
}

fn default_scratch_root() -> String {
    ".scratch".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_ffprobe() -> String {
    "ffprobe".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_folder: default_output_folder(),
            scratch_root: default_scratch_root(),
            logs_folder: default_logs_folder(),
            ffmpeg: default_ffmpeg(),
            ffprobe: default_ffprobe(),
        }
    }
}

/// Encode parameters applied to every segment.
///
/// Slide segments and trimmed transitions must agree on codec, pixel format
/// and frame rate, otherwise the final stream-copy concatenation produces a
/// broken file. Keeping them in one section makes that agreement structural.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeSettings {
    /// Constant frame rate for generated segments.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Video codec passed to ffmpeg `-c:v`.
    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    /// Pixel format passed to ffmpeg `-pix_fmt`.
    #[serde(default = "default_pixel_format")]
    pub pixel_format: String,

    /// Constant rate factor for the video encoder.
    #[serde(default = "default_crf")]
    pub crf: u32,

    /// Encoder preset (e.g. "medium", "fast").
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Audio codec for slide segments, passed to `-c:a`.
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// Audio bitrate for slide segments, passed to `-b:a`.
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,

    /// Default trimmed-transition duration in seconds.
    #[serde(default = "default_transition_duration")]
    pub transition_duration: f64,
}

fn default_frame_rate() -> u32 {
    30
}

fn default_video_codec() -> String {
    "libx264".to_string()
}

fn default_pixel_format() -> String {
    "yuv420p".to_string()
}

fn default_crf() -> u32 {
    18
}

fn default_preset() -> String {
    "medium".to_string()
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

fn default_audio_bitrate() -> String {
    "192k".to_string()
}

fn default_transition_duration() -> f64 {
    2.5
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            video_codec: default_video_codec(),
            pixel_format: default_pixel_format(),
            crf: default_crf(),
            preset: default_preset(),
            audio_codec: default_audio_codec(),
            audio_bitrate: default_audio_bitrate(),
            transition_duration: default_transition_duration(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Use compact run logs (tool output retained only in the tail buffer).
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Number of tool output lines replayed after a failure.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,

    /// Progress update step percentage.
    #[serde(default = "default_progress_step")]
    pub progress_step: u32,

    /// Log each ffmpeg argument list one token per line.
    #[serde(default)]
    pub show_command_pretty: bool,
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> u32 {
    20
}

fn default_progress_step() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            compact: true,
            error_tail: default_error_tail(),
            progress_step: default_progress_step(),
            show_command_pretty: false,
        }
    }
}

impl LoggingSettings {
    /// Build a run-log configuration from these settings.
    pub fn to_log_config(&self) -> crate::logging::LogConfig {
        crate::logging::LogConfig {
            compact: self.compact,
            error_tail: self.error_tail as usize,
            progress_step: self.progress_step,
            ..crate::logging::LogConfig::default()
        }
    }
}
