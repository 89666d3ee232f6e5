//! Blocking subprocess execution with run-log integration.

use std::process::Command;
use std::sync::Arc;

use crate::logging::RunLogger;

use super::errors::{SegmentError, SegmentResult};

/// Captured output of a finished command.
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Run an external tool to completion, logging the command line and its
/// output through the run logger.
///
/// Any non-zero exit is an error: the tail buffer is replayed into the log
/// for diagnosis and `CommandFailed` is returned.
pub fn run_tool(
    logger: &Arc<RunLogger>,
    program: &str,
    args: &[String],
    show_pretty: bool,
) -> SegmentResult<CommandOutput> {
    logger.command(&format!("{} {}", program, args.join(" ")));
    if show_pretty {
        logger.command_pretty(program, args);
    }
    logger.clear_tail();

    tracing::debug!(tool = program, "running external tool");

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| SegmentError::io_error(format!("executing {}", program), e))?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    for line in stdout.lines() {
        logger.tool_output(line, false);
    }
    for line in stderr.lines() {
        logger.tool_output(line, true);
    }

    if !output.status.success() {
        logger.show_tail(program);
        return Err(SegmentError::command_failed(
            program,
            exit_code,
            last_stderr_line(&stderr),
        ));
    }

    Ok(CommandOutput {
        stdout,
        stderr,
        exit_code,
    })
}

/// Last non-empty stderr line, the part of ffmpeg output that names the
/// actual failure.
fn last_stderr_line(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("no stderr output")
        .to_string()
}
