// ABOUTME: Wrapper around the license-gated core engine binary.
// ABOUTME: Appends the license to every call and runs it through a CommandRunner.

mod create;

pub use create::{CreateOptions, CreateRequest, DEFAULT_COMPONENTS};

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::runner::{CommandOutput, CommandRunner, Invocation, RunnerError};

pub const ENGINE_BINARY: &str = "goku";

/// License file name under the per-user `.ongoku` directory.
pub const LICENSE_FILENAME: &str = "license.txt";

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to read license file {path}: {source}")]
    LicenseUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("license is empty")]
    EmptyLicense,

    #[error("{0}")]
    InvalidAppName(String),

    #[error("core engine failed: `{command}` exited with {status}")]
    Failed {
        command: String,
        status: String,
        output: CommandOutput,
    },

    #[error("core engine call interrupted: {0}")]
    Runner(#[from] RunnerError),
}

impl EngineError {
    pub fn output(&self) -> Option<&CommandOutput> {
        match self {
            EngineError::Failed { output, .. } => Some(output),
            _ => None,
        }
    }
}

/// Where the license comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum License {
    /// Passed to the engine by path.
    File(PathBuf),
    /// Passed to the engine inline.
    Inline(String),
}

/// Default license location for a given home directory.
pub fn default_license_path(home: &Path) -> PathBuf {
    home.join(".ongoku").join(LICENSE_FILENAME)
}

/// Client for the core engine binary.
#[derive(Debug, Clone)]
pub struct CoreEngine {
    license: License,
}

impl CoreEngine {
    /// Use the license stored at `path`. The file must exist and be non-empty.
    pub fn from_license_file(path: impl Into<PathBuf>) -> Result<Self, EngineError> {
        let path = path.into();
        let content =
            std::fs::read_to_string(&path).map_err(|source| EngineError::LicenseUnreadable {
                path: path.clone(),
                source,
            })?;
        if content.trim().is_empty() {
            return Err(EngineError::EmptyLicense);
        }
        Ok(Self {
            license: License::File(path),
        })
    }

    pub fn from_license(license: impl Into<String>) -> Result<Self, EngineError> {
        let license = license.into();
        if license.trim().is_empty() {
            return Err(EngineError::EmptyLicense);
        }
        Ok(Self {
            license: License::Inline(license.trim().to_string()),
        })
    }

    pub fn license(&self) -> &License {
        &self.license
    }

    /// Engine call with `args` followed by the license arguments.
    pub fn command<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let invocation = Invocation::new(ENGINE_BINARY).args(args);
        match &self.license {
            License::File(path) => invocation
                .arg("--license-file")
                .arg(path.to_string_lossy()),
            License::Inline(text) => invocation.arg("--license").arg(text.as_str()),
        }
    }

    /// Check that the engine runs and accepts the license.
    pub async fn validate<R: CommandRunner + ?Sized>(
        &self,
        runner: &R,
        cancel: &CancellationToken,
    ) -> Result<(), EngineError> {
        self.execute(runner, self.command(["version"]), cancel)
            .await
            .map(|_| ())
    }

    /// Run an engine invocation built with [`CoreEngine::command`].
    pub async fn execute<R: CommandRunner + ?Sized>(
        &self,
        runner: &R,
        invocation: Invocation,
        cancel: &CancellationToken,
    ) -> Result<CommandOutput, EngineError> {
        tracing::debug!(command = %redacted(&invocation), "running core engine");
        let output = runner.run(&invocation, cancel).await?;
        if !output.success() {
            return Err(EngineError::Failed {
                command: redacted(&invocation),
                status: output.status(),
                output,
            });
        }
        Ok(output)
    }
}

/// Command line with an inline license masked.
fn redacted(invocation: &Invocation) -> String {
    let mut parts = vec![invocation.program().to_string()];
    let mut mask_next = false;
    for arg in invocation.arguments() {
        if mask_next {
            parts.push("***".to_string());
            mask_next = false;
        } else {
            mask_next = arg == "--license";
            parts.push(arg.clone());
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_license_appended_by_path() {
        let engine = CoreEngine {
            license: License::File(PathBuf::from("/home/dev/.ongoku/license.txt")),
        };
        let invocation = engine.command(["version"]);
        assert_eq!(
            invocation.to_string(),
            "goku version --license-file /home/dev/.ongoku/license.txt"
        );
    }

    #[test]
    fn inline_license_is_redacted_in_logs() {
        let engine = CoreEngine::from_license("secret-key").unwrap();
        let invocation = engine.command(["version"]);
        assert!(invocation.has_arg("secret-key"));
        assert_eq!(redacted(&invocation), "goku version --license ***");
    }

    #[test]
    fn empty_license_rejected() {
        assert!(matches!(
            CoreEngine::from_license("  \n"),
            Err(EngineError::EmptyLicense)
        ));
    }

    #[test]
    fn default_path_under_home() {
        assert_eq!(
            default_license_path(Path::new("/home/dev")),
            Path::new("/home/dev/.ongoku/license.txt")
        );
    }
}
