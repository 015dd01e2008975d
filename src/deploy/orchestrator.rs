// ABOUTME: Runs the stage sequence of the selected operation and reports the outcome.
// ABOUTME: Stops at the first failure and tags it with the stage that failed.

use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;
use crate::diagnostics::Diagnostics;
use crate::runner::{CommandOutput, CommandRunner};

use super::context::{DeploymentContext, EnvOverrides};
use super::deployment::Deployment;
use super::error::DeployError;
use super::operation::{DeployRequest, Operation, Stage};

/// Terminal state of one pipeline run.
#[derive(Debug)]
pub enum PipelineOutcome {
    Succeeded { completed: Vec<Stage> },
    Failed { stage: Stage, error: DeployError },
}

impl PipelineOutcome {
    fn failed(stage: Stage, error: DeployError) -> Self {
        tracing::error!(stage = %stage, error = %error, "stage failed");
        PipelineOutcome::Failed { stage, error }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Succeeded { .. })
    }

    /// The stage that failed, if any.
    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            PipelineOutcome::Succeeded { .. } => None,
            PipelineOutcome::Failed { stage, .. } => Some(*stage),
        }
    }

    pub fn into_result(self) -> Result<Vec<Stage>, StageFailure> {
        match self {
            PipelineOutcome::Succeeded { completed } => Ok(completed),
            PipelineOutcome::Failed { stage, error } => Err(StageFailure {
                stage,
                source: error,
            }),
        }
    }
}

/// The first failure of a pipeline, wrapped with the stage name.
#[derive(Debug, thiserror::Error)]
#[error("{stage} stage failed: {source}")]
pub struct StageFailure {
    pub stage: Stage,
    pub source: DeployError,
}

impl StageFailure {
    pub fn output(&self) -> Option<&CommandOutput> {
        self.source.output()
    }
}

/// Drives one deploy operation through its stages.
pub struct Orchestrator<R> {
    runner: R,
    cancel: CancellationToken,
}

impl<R: CommandRunner> Orchestrator<R> {
    pub fn new(runner: R, cancel: CancellationToken) -> Self {
        Self { runner, cancel }
    }

    /// Resolve the context for `request`, then run its operation.
    pub async fn execute(
        &self,
        config: &AppConfig,
        request: &DeployRequest,
        env: &EnvOverrides,
        diag: &mut Diagnostics,
    ) -> PipelineOutcome {
        let context = match DeploymentContext::resolve(config, request, env, diag) {
            Ok(context) => context,
            Err(e) => return PipelineOutcome::failed(Stage::Resolve, e),
        };

        self.run(context, &request.operation).await
    }

    /// Run the stages of `operation` against an already-resolved context.
    pub async fn run(&self, context: DeploymentContext, operation: &Operation) -> PipelineOutcome {
        tracing::info!(
            operation = operation.name(),
            app = %context.app_name(),
            identifier = %context.identifier(),
            "starting deployment"
        );

        let runner = &self.runner;
        let cancel = &self.cancel;
        let deployment = Deployment::new(context);

        match operation {
            Operation::BuildImage(_) => match deployment.build_image(runner, cancel).await {
                Ok(done) => succeeded(done.finish(), operation),
                Err(e) => PipelineOutcome::failed(Stage::BuildImage, e),
            },
            Operation::ApplyAndWait(_) => {
                let applied = match deployment.apply(runner, cancel).await {
                    Ok(applied) => applied,
                    Err(e) => return PipelineOutcome::failed(Stage::Apply, e),
                };
                match applied.wait_ready(runner, cancel).await {
                    Ok(done) => succeeded(done.finish(), operation),
                    Err(e) => PipelineOutcome::failed(Stage::Readiness, e),
                }
            }
            Operation::Destroy => match deployment.destroy(runner, cancel).await {
                Ok(done) => succeeded(done.finish(), operation),
                Err(e) => PipelineOutcome::failed(Stage::Teardown, e),
            },
        }
    }
}

fn succeeded(context: DeploymentContext, operation: &Operation) -> PipelineOutcome {
    tracing::info!(
        operation = operation.name(),
        identifier = %context.identifier(),
        "deployment finished"
    );
    PipelineOutcome::Succeeded {
        completed: operation.stages().to_vec(),
    }
}
