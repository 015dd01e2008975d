// ABOUTME: Application-wide error types for the og CLI.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::deploy::StageFailure;
use crate::engine::EngineError;
use crate::runner::CommandOutput;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("cannot locate home directory; pass --license-file explicitly")]
    MissingHome,

    #[error(transparent)]
    Deploy(#[from] StageFailure),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Output captured from the external command behind this error, if any.
    pub fn diagnostic_output(&self) -> Option<&CommandOutput> {
        match self {
            Error::Deploy(failure) => failure.output(),
            Error::Engine(e) => e.output(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
