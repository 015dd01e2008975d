// ABOUTME: CommandRunner fake that records invocations and replays scripted results.
// ABOUTME: Can simulate a readiness wait that never succeeds within its timeout.

use async_trait::async_trait;
use ongoku::runner::{CommandOutput, CommandRunner, Invocation, RunnerError};
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

/// Scripted behavior for one command.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Finish immediately with this output.
    Exit(CommandOutput),
    /// Block for the invocation's declared timeout, then fail the way the
    /// cluster client does when its wait times out.
    NeverReady,
    /// Fail to start the program.
    SpawnFailure,
    /// The runner gave up on the process after its declared timeout.
    TimedOut,
}

impl Reply {
    pub fn exit(code: i32) -> Self {
        Reply::Exit(CommandOutput {
            exit_code: Some(code),
            ..Default::default()
        })
    }

    pub fn exit_with_stderr(code: i32, stderr: &str) -> Self {
        Reply::Exit(CommandOutput {
            exit_code: Some(code),
            stderr: stderr.to_string(),
            ..Default::default()
        })
    }
}

/// Records every invocation; replies are keyed by "program subcommand",
/// e.g. "kubectl apply". Unscripted commands exit 0.
#[derive(Default)]
pub struct FakeRunner {
    calls: Mutex<Vec<Invocation>>,
    replies: Mutex<HashMap<String, Reply>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, key: &str, reply: Reply) -> Self {
        self.replies.lock().insert(key.to_string(), reply);
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().clone()
    }

    /// Keys of the recorded calls, in order.
    pub fn call_keys(&self) -> Vec<String> {
        self.calls.lock().iter().map(key_of).collect()
    }

    pub fn was_called(&self, key: &str) -> bool {
        self.call_keys().iter().any(|k| k == key)
    }

    /// The single recorded call matching `key`.
    pub fn call(&self, key: &str) -> Invocation {
        let matching: Vec<_> = self
            .calls
            .lock()
            .iter()
            .filter(|i| key_of(i) == key)
            .cloned()
            .collect();
        assert_eq!(matching.len(), 1, "expected exactly one `{key}` call");
        matching.into_iter().next().unwrap()
    }
}

fn key_of(invocation: &Invocation) -> String {
    match invocation.arguments().first() {
        Some(first) => format!("{} {first}", invocation.program()),
        None => invocation.program().to_string(),
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        cancel: &CancellationToken,
    ) -> Result<CommandOutput, RunnerError> {
        self.calls.lock().push(invocation.clone());
        let reply = self.replies.lock().get(&key_of(invocation)).cloned();
        let program = invocation.program().to_string();

        match reply {
            None => Ok(CommandOutput {
                exit_code: Some(0),
                ..Default::default()
            }),
            Some(Reply::Exit(output)) => Ok(output),
            Some(Reply::SpawnFailure) => Err(RunnerError::Spawn {
                program,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            }),
            Some(Reply::TimedOut) => Err(RunnerError::TimedOut {
                program,
                timeout: invocation.expected_duration().unwrap_or_default(),
            }),
            Some(Reply::NeverReady) => {
                let wait = async {
                    match invocation.expected_duration() {
                        Some(timeout) => tokio::time::sleep(timeout).await,
                        None => std::future::pending::<()>().await,
                    }
                };
                tokio::select! {
                    () = cancel.cancelled() => Err(RunnerError::Cancelled { program }),
                    () = wait => Ok(CommandOutput {
                        exit_code: Some(1),
                        stdout: String::new(),
                        stderr: "error: timed out waiting for the condition on pods/app-0\n"
                            .to_string(),
                    }),
                }
            }
        }
    }
}
