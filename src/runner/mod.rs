// ABOUTME: Abstraction over running external programs.
// ABOUTME: Every stage goes through CommandRunner so tests can substitute a fake.

mod error;
mod invocation;
mod process;

pub use error::RunnerError;
pub use invocation::{CommandOutput, Invocation};
pub use process::{DEFAULT_KILL_GRACE, ProcessRunner};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Executes an external program and captures its result.
///
/// Implementations return `Ok` for any process that ran to completion,
/// whatever its exit status. Cancellation through `cancel` must stop the
/// program and yield `RunnerError::Cancelled`.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        invocation: &Invocation,
        cancel: &CancellationToken,
    ) -> Result<CommandOutput, RunnerError>;
}

#[async_trait]
impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    async fn run(
        &self,
        invocation: &Invocation,
        cancel: &CancellationToken,
    ) -> Result<CommandOutput, RunnerError> {
        (**self).run(invocation, cancel).await
    }
}
