// ABOUTME: Error types for deployment stages.
// ABOUTME: One variant per failure class, each keeping the subprocess output.

use std::time::Duration;

use crate::runner::{CommandOutput, Invocation, RunnerError};

/// Errors that can occur while resolving or running a deployment.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Identifier, app identity, or image coordinates could not be resolved.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Image build or push failed. The build tool does both in one call.
    #[error("image build failed: {reason}")]
    Build {
        reason: String,
        output: Option<CommandOutput>,
    },

    /// Manifest apply failed, or the readiness check failed for a reason
    /// other than a timeout.
    #[error("apply failed: {reason}")]
    Apply {
        reason: String,
        output: Option<CommandOutput>,
    },

    /// Pods did not become ready in time.
    #[error("pods not ready within {timeout:?}")]
    Timeout {
        timeout: Duration,
        output: Option<CommandOutput>,
    },

    /// Manifest delete failed.
    #[error("teardown failed: {reason}")]
    Teardown {
        reason: String,
        output: Option<CommandOutput>,
    },

    /// The invocation was aborted by the caller.
    #[error("deployment cancelled")]
    Cancelled,
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    Configuration,
    Build,
    Apply,
    Timeout,
    Teardown,
    Cancelled,
}

impl DeployError {
    pub fn config_error(message: impl Into<String>) -> Self {
        DeployError::Configuration(message.into())
    }

    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::Configuration(_) => DeployErrorKind::Configuration,
            DeployError::Build { .. } => DeployErrorKind::Build,
            DeployError::Apply { .. } => DeployErrorKind::Apply,
            DeployError::Timeout { .. } => DeployErrorKind::Timeout,
            DeployError::Teardown { .. } => DeployErrorKind::Teardown,
            DeployError::Cancelled => DeployErrorKind::Cancelled,
        }
    }

    /// Captured output of the subprocess that caused this error, if it ran.
    pub fn output(&self) -> Option<&CommandOutput> {
        match self {
            DeployError::Build { output, .. }
            | DeployError::Apply { output, .. }
            | DeployError::Timeout { output, .. }
            | DeployError::Teardown { output, .. } => output.as_ref(),
            DeployError::Configuration(_) | DeployError::Cancelled => None,
        }
    }
}

/// Failure class a stage reports its subprocess problems under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureClass {
    Build,
    Apply,
    Teardown,
}

impl FailureClass {
    pub(crate) fn error(self, reason: String, output: Option<CommandOutput>) -> DeployError {
        match self {
            FailureClass::Build => DeployError::Build { reason, output },
            FailureClass::Apply => DeployError::Apply { reason, output },
            FailureClass::Teardown => DeployError::Teardown { reason, output },
        }
    }

    /// The process could not be run to completion.
    pub(crate) fn from_runner(self, err: RunnerError) -> DeployError {
        if err.is_cancelled() {
            return DeployError::Cancelled;
        }
        self.error(err.to_string(), None)
    }

    /// The process ran but exited unsuccessfully.
    pub(crate) fn from_exit(self, invocation: &Invocation, output: CommandOutput) -> DeployError {
        let reason = format!("`{invocation}` failed with {}", output.status());
        self.error(reason, Some(output))
    }
}
