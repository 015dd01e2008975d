// ABOUTME: Runner error types with SNAFU pattern.
// ABOUTME: Separates "the program could not be run" from "the program failed".

use snafu::Snafu;
use std::time::Duration;

/// Errors raised when a process could not be run to completion.
///
/// A process that exits with a non-zero status is not an error at this
/// level; callers inspect `CommandOutput::exit_code`.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RunnerError {
    #[snafu(display("failed to spawn {program}: {source}"))]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[snafu(display("failed waiting for {program}: {source}"))]
    Wait {
        program: String,
        source: std::io::Error,
    },

    #[snafu(display("{program} did not finish within {timeout:?}"))]
    TimedOut { program: String, timeout: Duration },

    #[snafu(display("{program} was cancelled"))]
    Cancelled { program: String },
}

impl RunnerError {
    pub fn program(&self) -> &str {
        match self {
            RunnerError::Spawn { program, .. }
            | RunnerError::Wait { program, .. }
            | RunnerError::TimedOut { program, .. }
            | RunnerError::Cancelled { program } => program,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunnerError::Cancelled { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RunnerError::TimedOut { .. })
    }
}
