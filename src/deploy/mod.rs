// ABOUTME: Deployment orchestration: context resolution, stages, and the pipeline.
// ABOUTME: Exports the type state Deployment and the Orchestrator that drives it.

mod context;
mod deployment;
mod error;
mod exec;
mod image;
mod manifest;
mod operation;
mod orchestrator;
mod readiness;
mod state;
mod teardown;

pub use context::{
    BUILD_DESCRIPTION_PATH, DEFAULT_IMAGE_REPOSITORY, DEPLOY_IDENTIFIER_ENV, DeploymentContext,
    EnvOverrides, IDENTIFIER_LABEL, IMAGE_REPO_ENV, IMAGE_TAG_ENV, ImageSpec, MANIFEST_PATH,
    ManifestLocation, ReadinessPolicy,
};
pub use deployment::Deployment;
pub use error::{DeployError, DeployErrorKind};
pub use image::{BUILD_TOOL, ImageBuildStage};
pub use manifest::{CLUSTER_CLIENT, ManifestApplyStage};
pub use operation::{DeployRequest, ImageFlags, Operation, ReadinessFlags, Stage};
pub use orchestrator::{Orchestrator, PipelineOutcome, StageFailure};
pub use readiness::ReadinessWaiter;
pub use state::{Applied, ImageBuilt, Ready, Resolved, Terminal, TornDown};
pub use teardown::TeardownStage;
