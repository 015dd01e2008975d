// ABOUTME: Readiness wait: one blocking cluster-client call bounded by a timeout.
// ABOUTME: Distinguishes "not ready in time" from every other wait failure.

use std::path::Path;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::runner::{CommandOutput, CommandRunner, Invocation};

use super::context::ReadinessPolicy;
use super::error::{DeployError, FailureClass};
use super::exec::ensure_not_cancelled;
use super::manifest::CLUSTER_CLIENT;

/// Message the cluster client prints when its own wait times out.
const TIMEOUT_MARKER: &str = "timed out waiting for the condition";

pub struct ReadinessWaiter<'a> {
    policy: &'a ReadinessPolicy,
    working_dir: &'a Path,
}

impl<'a> ReadinessWaiter<'a> {
    pub fn new(policy: &'a ReadinessPolicy, working_dir: &'a Path) -> Self {
        Self {
            policy,
            working_dir,
        }
    }

    /// The wait call. The timeout goes to the cluster client and is also
    /// declared on the invocation so the runner can stop a hung client.
    pub fn invocation(&self) -> Invocation {
        Invocation::new(CLUSTER_CLIENT)
            .arg("wait")
            .args(["-n", self.policy.namespace.as_str()])
            .arg("--for=condition=Ready")
            .arg("pod")
            .args(["-l", self.policy.selector.as_str()])
            .arg(format!("--timeout={}", cluster_duration(self.policy.timeout)))
            .timeout(self.policy.timeout)
            .current_dir(self.working_dir)
    }

    pub async fn wait<R: CommandRunner + ?Sized>(
        &self,
        runner: &R,
        cancel: &CancellationToken,
    ) -> Result<CommandOutput, DeployError> {
        ensure_not_cancelled(cancel)?;

        let invocation = self.invocation();
        tracing::info!(
            namespace = %self.policy.namespace,
            selector = %self.policy.selector,
            timeout = ?self.policy.timeout,
            "waiting for pods to be ready"
        );

        let output = match runner.run(&invocation, cancel).await {
            Ok(output) => output,
            Err(e) if e.is_timeout() => {
                return Err(DeployError::Timeout {
                    timeout: self.policy.timeout,
                    output: None,
                });
            }
            Err(e) => return Err(FailureClass::Apply.from_runner(e)),
        };

        if output.success() {
            return Ok(output);
        }

        if output.stderr.contains(TIMEOUT_MARKER) {
            return Err(DeployError::Timeout {
                timeout: self.policy.timeout,
                output: Some(output),
            });
        }

        Err(FailureClass::Apply.from_exit(&invocation, output))
    }
}

/// Render a duration the way the cluster client parses it (`300s`, `1500ms`).
fn cluster_duration(duration: Duration) -> String {
    if duration.subsec_millis() == 0 {
        format!("{}s", duration.as_secs())
    } else {
        format!("{}ms", duration.as_millis())
    }
}
