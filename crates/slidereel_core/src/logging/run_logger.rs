//! Per-run logger with file and callback output.
//!
//! Each assembly run gets its own logger that:
//! - Writes to a dedicated log file under the logs folder
//! - Echoes lines to an optional callback (console, UI, ...)
//! - Supports compact mode where tool output goes only to a tail buffer
//!   that is replayed when an external command fails

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use super::types::{LogCallback, LogConfig, LogLevel, MessagePrefix};

/// Per-run logger with dual output (file + callback).
pub struct RunLogger {
    /// Run name for identification.
    run_name: String,
    /// Path to the log file.
    log_path: PathBuf,
    /// Buffered file writer.
    file_writer: Mutex<Option<BufWriter<File>>>,
    /// Optional line callback.
    callback: Mutex<Option<LogCallback>>,
    /// Logging configuration.
    config: LogConfig,
    /// Recent tool output lines, kept for error diagnosis.
    tail_buffer: Mutex<VecDeque<String>>,
    /// Last progress value logged (for step filtering).
    last_progress: Mutex<u32>,
}

impl RunLogger {
    /// Create a new run logger writing to `<log_dir>/<run_name>.log`.
    pub fn new(
        run_name: impl Into<String>,
        log_dir: impl AsRef<Path>,
        config: LogConfig,
        callback: Option<LogCallback>,
    ) -> std::io::Result<Self> {
        let run_name = run_name.into();
        let log_dir = log_dir.as_ref();
        fs::create_dir_all(log_dir)?;

        let log_path = log_dir.join(format!("{}.log", sanitize_filename(&run_name)));
        let writer = BufWriter::new(File::create(&log_path)?);
        let tail_capacity = config.error_tail.max(1);

        Ok(Self {
            run_name,
            log_path,
            file_writer: Mutex::new(Some(writer)),
            callback: Mutex::new(callback),
            config,
            tail_buffer: Mutex::new(VecDeque::with_capacity(tail_capacity)),
            last_progress: Mutex::new(0),
        })
    }

    /// Get the run name.
    pub fn run_name(&self) -> &str {
        &self.run_name
    }

    /// Get the log file path.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Log a message at the specified level.
    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.config.level {
            return;
        }
        let formatted = self.format_message(message);
        self.output(&formatted);
    }

    /// Log an info message.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Log a debug message.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Log a warning.
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, &MessagePrefix::Warning.format(message));
    }

    /// Log an error.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, &MessagePrefix::Error.format(message));
    }

    /// Log a command being executed.
    pub fn command(&self, command: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Command.format(command));
    }

    /// Log a phase marker.
    pub fn phase(&self, phase_name: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Phase.format(phase_name));
    }

    /// Log a section marker.
    pub fn section(&self, section_name: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Section.format(section_name));
    }

    /// Log a success message.
    pub fn success(&self, message: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Success.format(message));
    }

    /// Log a command's argument list one token per line.
    pub fn command_pretty(&self, program: &str, args: &[String]) {
        self.section("command");
        let mut pretty = String::from(program);
        for arg in args {
            pretty.push_str(" \\\n  ");
            pretty.push_str(arg);
        }
        self.info(&pretty);
    }

    /// Log a progress update, filtered to `progress_step` intervals.
    ///
    /// Returns true if the update was logged, false if filtered.
    pub fn progress(&self, percent: u32) -> bool {
        let step = self.config.progress_step.max(1);
        {
            let mut last = self.last_progress.lock();
            let current_step = (percent / step) * step;
            let last_step = (*last / step) * step;
            if current_step <= last_step && percent < 100 && *last != 0 {
                return false;
            }
            *last = percent.max(1);
        }
        self.log(LogLevel::Info, &format!("Progress: {}%", percent));
        true
    }

    /// Record one stdout/stderr line from an external tool.
    ///
    /// In compact mode the line is retained only in the tail buffer.
    pub fn tool_output(&self, line: &str, is_stderr: bool) {
        {
            let mut buffer = self.tail_buffer.lock();
            if buffer.len() >= self.config.error_tail {
                buffer.pop_front();
            }
            buffer.push_back(line.to_string());
        }

        if self.config.compact {
            return;
        }

        let msg = if is_stderr {
            format!("[stderr] {}", line)
        } else {
            line.to_string()
        };
        self.output(&self.format_message(&msg));
    }

    /// Replay the tail buffer, typically after a tool failure.
    pub fn show_tail(&self, header: &str) {
        let buffer = self.tail_buffer.lock();
        if buffer.is_empty() {
            return;
        }
        self.output(&self.format_message(&format!("[{}/tail]", header)));
        for line in buffer.iter() {
            self.output(&self.format_message(line));
        }
    }

    /// Clear the tail buffer (e.g. between external commands).
    pub fn clear_tail(&self) {
        self.tail_buffer.lock().clear();
    }

    /// Current tail buffer contents.
    pub fn tail(&self) -> Vec<String> {
        self.tail_buffer.lock().iter().cloned().collect()
    }

    /// Flush the log file.
    pub fn flush(&self) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writer.flush();
        }
    }

    /// Close the logger and release the file handle.
    pub fn close(&self) {
        self.flush();
        *self.file_writer.lock() = None;
    }

    fn format_message(&self, message: &str) -> String {
        if self.config.show_timestamps {
            format!("[{}] {}", Local::now().format("%H:%M:%S"), message)
        } else {
            message.to_string()
        }
    }

    fn output(&self, formatted: &str) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writeln!(writer, "{}", formatted);
        }
        if let Some(ref callback) = *self.callback.lock() {
            callback(formatted);
        }
    }
}

impl Drop for RunLogger {
    fn drop(&mut self) {
        self.close();
    }
}

/// Sanitize a run name for use as a filename.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
