// ABOUTME: CommandRunner backed by real child processes via tokio.
// ABOUTME: Captures output, kills the child on cancellation or timeout backstop.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use snafu::ResultExt;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use super::CommandRunner;
use super::error::{CancelledSnafu, RunnerError, SpawnSnafu, TimedOutSnafu, WaitSnafu};
use super::invocation::{CommandOutput, Invocation};

/// Extra time a process gets beyond its declared timeout before it is killed.
pub const DEFAULT_KILL_GRACE: Duration = Duration::from_secs(30);

/// Runs invocations as local child processes.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    kill_grace: Duration,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self {
            kill_grace: DEFAULT_KILL_GRACE,
        }
    }

    /// Override the grace period added on top of an invocation's timeout.
    pub fn with_kill_grace(mut self, grace: Duration) -> Self {
        self.kill_grace = grace;
        self
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        cancel: &CancellationToken,
    ) -> Result<CommandOutput, RunnerError> {
        let program = invocation.program();

        let mut command = Command::new(program);
        command
            .args(invocation.arguments())
            .envs(invocation.env_overrides())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = invocation.working_dir() {
            command.current_dir(dir);
        }

        tracing::debug!(command = %invocation, "spawning process");
        let child = command.spawn().context(SpawnSnafu { program })?;

        // Dropping the wait future drops the child, which kills it
        let wait = child.wait_with_output();
        let backstop = invocation.expected_duration().map(|t| t + self.kill_grace);
        let finished = async move {
            match backstop {
                Some(limit) => tokio::time::timeout(limit, wait).await.ok(),
                None => Some(wait.await),
            }
        };

        let result = tokio::select! {
            () = cancel.cancelled() => {
                tracing::warn!(command = %invocation, "cancelled, killing process");
                return CancelledSnafu { program }.fail();
            }
            result = finished => result,
        };

        let Some(result) = result else {
            tracing::warn!(command = %invocation, "process outlived its timeout, killed");
            return TimedOutSnafu {
                program,
                timeout: invocation.expected_duration().unwrap_or_default(),
            }
            .fail();
        };

        let output = result.context(WaitSnafu { program })?;
        let output = CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        tracing::debug!(
            command = %invocation,
            status = %output.status(),
            "process finished"
        );

        Ok(output)
    }
}
