//! Concatenation manifest writing.
//!
//! The manifest is the one bit-exact artifact this crate defines: a plain
//! text file with one `file '<absolute path>'` line per segment, in output
//! order, consumed once by the concat demuxer.

use std::fs;
use std::path::Path;

use crate::models::Sequence;

use super::errors::{AssemblyError, AssemblyResult};

/// Write the concat manifest for `sequence` to `path`.
///
/// Paths are made absolute so the concat step is independent of the
/// working directory it runs from.
pub fn write_manifest(path: &Path, sequence: &Sequence) -> AssemblyResult<()> {
    let mut content = String::new();
    for segment_path in sequence.paths() {
        let absolute = std::path::absolute(segment_path)
            .map_err(|e| AssemblyError::io_error("resolving segment path", e))?;
        content.push_str(&manifest_line(&absolute));
        content.push('\n');
    }

    fs::write(path, content).map_err(|e| AssemblyError::io_error("writing manifest", e))
}

/// One manifest line: `file '<path>'`, quoted per the concat demuxer's
/// rules (a single quote inside the path becomes `'\''`).
fn manifest_line(path: &Path) -> String {
    let escaped = path.to_string_lossy().replace('\'', "'\\''");
    format!("file '{}'", escaped)
}
