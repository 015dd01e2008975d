// ABOUTME: User-facing output for og commands.
// ABOUTME: Renders progress, warnings, and results as text or JSON lines.

use serde::Serialize;
use std::time::Instant;

use crate::diagnostics::Diagnostics;
use crate::runner::CommandOutput;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Progress lines plus the result
    Normal,
    /// Only the result and errors
    Quiet,
    /// One JSON object per event
    Json,
}

impl OutputMode {
    pub fn from_flags(quiet: bool, json: bool) -> Self {
        match (json, quiet) {
            (true, _) => OutputMode::Json,
            (false, true) => OutputMode::Quiet,
            (false, false) => OutputMode::Normal,
        }
    }
}

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

    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    fn elapsed_secs(&self) -> Option<f64> {
        self.start_time.map(|t| t.elapsed().as_secs_f64())
    }

    /// Progress line, shown in normal mode only.
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Report collected warnings. Text modes already saw them through the
    /// log as they were recorded, so only JSON mode emits them again.
    pub fn warnings(&self, diag: &Diagnostics) {
        if self.mode != OutputMode::Json {
            return;
        }
        for warning in diag.warnings() {
            self.emit_stderr("warning", &warning.message);
        }
    }

    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => match self.elapsed_secs() {
                Some(elapsed) => println!("{message} ({elapsed:.1}s)"),
                None => println!("{message}"),
            },
            OutputMode::Quiet => println!("{message}"),
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "success",
                    message,
                    duration_secs: self.elapsed_secs(),
                    stderr: None,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    println!("{json}");
                }
            }
        }
    }

    /// Report a failure, with the captured stderr of the command behind it.
    pub fn error(&self, message: &str, captured: Option<&CommandOutput>) {
        let stderr = captured
            .map(|o| o.stderr.trim())
            .filter(|s| !s.is_empty());

        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
                if let Some(stderr) = stderr {
                    eprintln!("{stderr}");
                }
            }
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "error",
                    message,
                    duration_secs: self.elapsed_secs(),
                    stderr,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }

    fn emit_stderr(&self, event: &str, message: &str) {
        let event = JsonEvent {
            event,
            message,
            duration_secs: None,
            stderr: None,
        };
        if let Ok(json) = serde_json::to_string(&event) {
            eprintln!("{json}");
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stderr: Option<&'a str>,
}
