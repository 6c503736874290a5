// ABOUTME: Output formatting for CLI feedback and the Progress notice sink.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use serde::Serialize;
use std::time::Instant;

/// Receives human-readable notices emitted while engine work is in progress
/// (image pulls, container removals).
pub trait Progress: Send + Sync {
    fn notice(&self, message: &str);
}

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    fn elapsed_secs(&self) -> Option<f64> {
        self.start_time.map(|t| t.elapsed().as_secs_f64())
    }

    /// Print a progress message (suppressed in quiet mode).
    pub fn progress(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => println!("{message}"),
            OutputMode::Quiet => {}
            OutputMode::Json => self.emit("progress", message, false),
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => match self.elapsed_secs() {
                Some(elapsed) => println!("{message} ({elapsed:.1}s)"),
                None => println!("{message}"),
            },
            OutputMode::Quiet => println!("{message}"),
            OutputMode::Json => self.emit("success", message, false),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Error: {message}"),
            OutputMode::Json => self.emit("error", message, true),
        }
    }

    fn emit(&self, event: &str, message: &str, to_stderr: bool) {
        let event = JsonEvent {
            event,
            message,
            duration_secs: self.elapsed_secs(),
        };
        if let Ok(json) = serde_json::to_string(&event) {
            if to_stderr {
                eprintln!("{json}");
            } else {
                println!("{json}");
            }
        }
    }
}

impl Progress for Output {
    fn notice(&self, message: &str) {
        self.progress(message);
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}
