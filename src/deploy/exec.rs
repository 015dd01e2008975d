// ABOUTME: Shared helper for running one stage command through a CommandRunner.
// ABOUTME: Maps runner failures and non-zero exits onto the stage's failure class.

use tokio_util::sync::CancellationToken;

use crate::runner::{CommandOutput, CommandRunner, Invocation};

use super::error::{DeployError, FailureClass};

/// Fail fast when the caller already cancelled.
pub(crate) fn ensure_not_cancelled(cancel: &CancellationToken) -> Result<(), DeployError> {
    if cancel.is_cancelled() {
        return Err(DeployError::Cancelled);
    }
    Ok(())
}

/// Run `invocation` once and require a zero exit status.
pub(crate) async fn run_checked<R: CommandRunner + ?Sized>(
    runner: &R,
    invocation: &Invocation,
    cancel: &CancellationToken,
    class: FailureClass,
) -> Result<CommandOutput, DeployError> {
    ensure_not_cancelled(cancel)?;

    tracing::info!(command = %invocation, "running");
    let output = runner
        .run(invocation, cancel)
        .await
        .map_err(|e| class.from_runner(e))?;

    if !output.success() {
        return Err(class.from_exit(invocation, output));
    }

    Ok(output)
}
