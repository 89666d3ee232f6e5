//! Duration probing using ffprobe's JSON output.
//!
//! The probe reads container metadata only; it never decodes streams and
//! has no side effects. Durations are derived on demand and never cached.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

use super::errors::{SegmentError, SegmentResult};

/// Probe a media file's duration in seconds via the given ffprobe binary.
///
/// Works on audio-only and video files. A missing, empty, or unparseable
/// file yields `MediaUnreadable` - never a default duration.
pub(crate) fn probe_duration(ffprobe: &str, path: &Path) -> SegmentResult<f64> {
    match std::fs::metadata(path) {
        Err(_) => {
            return Err(SegmentError::media_unreadable(path, "file not found"));
        }
        Ok(meta) if meta.len() == 0 => {
            return Err(SegmentError::media_unreadable(path, "empty file"));
        }
        Ok(_) => {}
    }

    tracing::debug!("Probing duration: {}", path.display());

    let output = Command::new(ffprobe)
        .args(["-v", "error", "-show_entries", "format=duration", "-of", "json"])
        .arg(path)
        .output()
        .map_err(|e| SegmentError::io_error(format!("executing {}", ffprobe), e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SegmentError::media_unreadable(
            path,
            format!("ffprobe could not parse container: {}", stderr.trim()),
        ));
    }

    let json: Value = serde_json::from_slice(&output.stdout).map_err(|e| {
        SegmentError::media_unreadable(path, format!("invalid ffprobe output: {}", e))
    })?;

    match parse_duration(&json) {
        Some(secs) if secs >= 0.0 => Ok(secs),
        Some(secs) => Err(SegmentError::media_unreadable(
            path,
            format!("negative duration {:.3}", secs),
        )),
        None => Err(SegmentError::media_unreadable(
            path,
            "no duration in container metadata",
        )),
    }
}

/// Pull `format.duration` out of ffprobe's JSON document.
///
/// ffprobe reports the duration as a decimal string.
fn parse_duration(json: &Value) -> Option<f64> {
    json.get("format")
        .and_then(|f| f.get("duration"))
        .and_then(|d| d.as_str())
        .and_then(|s| s.trim().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn parses_duration_string() {
        let json: Value =
            serde_json::from_str(r#"{"format": {"duration": "9.500000"}}"#).unwrap();
        assert_eq!(parse_duration(&json), Some(9.5));
    }

    #[test]
    fn missing_duration_is_none() {
        let json: Value = serde_json::from_str(r#"{"format": {}}"#).unwrap();
        assert_eq!(parse_duration(&json), None);

        let json: Value = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(parse_duration(&json), None);
    }

    #[test]
    fn garbage_duration_is_none() {
        let json: Value = serde_json::from_str(r#"{"format": {"duration": "N/A"}}"#).unwrap();
        assert_eq!(parse_duration(&json), None);
    }

    #[test]
    fn probe_missing_file_is_unreadable() {
        let result = probe_duration("ffprobe", Path::new("/nonexistent/clip.mp4"));
        assert!(matches!(result, Err(SegmentError::MediaUnreadable { .. })));
    }

    #[test]
    fn probe_empty_file_is_unreadable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.mp3");
        std::fs::File::create(&path).unwrap().flush().unwrap();

        let result = probe_duration("ffprobe", &path);
        match result {
            Err(SegmentError::MediaUnreadable { reason, .. }) => {
                assert_eq!(reason, "empty file");
            }
            other => panic!("expected MediaUnreadable, got {:?}", other.map(|_| ())),
        }
    }
}
