// ABOUTME: Deployment struct parameterized by state marker, with its transitions.
// ABOUTME: Each transition consumes self and runs exactly one stage.

use std::marker::PhantomData;

use tokio_util::sync::CancellationToken;

use crate::runner::CommandRunner;

use super::context::DeploymentContext;
use super::error::DeployError;
use super::image::ImageBuildStage;
use super::manifest::ManifestApplyStage;
use super::readiness::ReadinessWaiter;
use super::state::{Applied, ImageBuilt, Ready, Resolved, Terminal, TornDown};
use super::teardown::TeardownStage;

/// A deployment in progress, parameterized by its current state.
///
/// The context is read-only for the whole pipeline; only the state marker
/// changes. A failed transition drops the deployment, since nothing is
/// rolled back.
#[derive(Debug)]
pub struct Deployment<S> {
    context: DeploymentContext,
    state: PhantomData<S>,
}

impl Deployment<Resolved> {
    pub fn new(context: DeploymentContext) -> Self {
        Deployment {
            context,
            state: PhantomData,
        }
    }
}

impl<S> Deployment<S> {
    fn transition<T>(self) -> Deployment<T> {
        Deployment {
            context: self.context,
            state: PhantomData,
        }
    }
}

impl<S: Terminal> Deployment<S> {
    /// Finish the pipeline, handing back the context.
    pub fn finish(self) -> DeploymentContext {
        self.context
    }
}

// =============================================================================
// Resolved -> ImageBuilt | Applied | TornDown
// =============================================================================

impl Deployment<Resolved> {
    /// Build the image, pushing it unless pushing is disabled.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Build` if the build tool fails, or
    /// `DeployError::Configuration` if the context was resolved for an
    /// operation that builds no image.
    #[must_use = "deployment state must be used"]
    pub async fn build_image<R: CommandRunner + ?Sized>(
        self,
        runner: &R,
        cancel: &CancellationToken,
    ) -> Result<Deployment<ImageBuilt>, DeployError> {
        let image = self
            .context
            .image()
            .ok_or_else(|| DeployError::config_error("no image resolved for this deployment"))?;
        ImageBuildStage::new(image, self.context.working_dir())
            .run(runner, cancel)
            .await?;
        Ok(self.transition())
    }

    /// Apply the manifest to the cluster.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Apply` if the cluster client fails.
    #[must_use = "deployment state must be used"]
    pub async fn apply<R: CommandRunner + ?Sized>(
        self,
        runner: &R,
        cancel: &CancellationToken,
    ) -> Result<Deployment<Applied>, DeployError> {
        ManifestApplyStage::new(self.context.manifest(), self.context.working_dir())
            .run(runner, cancel)
            .await?;
        Ok(self.transition())
    }

    /// Delete the manifest from the cluster.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Teardown` if the cluster client fails.
    #[must_use = "deployment state must be used"]
    pub async fn destroy<R: CommandRunner + ?Sized>(
        self,
        runner: &R,
        cancel: &CancellationToken,
    ) -> Result<Deployment<TornDown>, DeployError> {
        TeardownStage::new(self.context.manifest(), self.context.working_dir())
            .run(runner, cancel)
            .await?;
        Ok(self.transition())
    }
}

// =============================================================================
// Applied -> Ready
// =============================================================================

impl Deployment<Applied> {
    /// Wait for the pods labelled with the identifier to become ready.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Timeout` when readiness is not reached in time,
    /// or `DeployError::Apply` for any other wait failure.
    #[must_use = "deployment state must be used"]
    pub async fn wait_ready<R: CommandRunner + ?Sized>(
        self,
        runner: &R,
        cancel: &CancellationToken,
    ) -> Result<Deployment<Ready>, DeployError> {
        let policy = self.context.readiness().ok_or_else(|| {
            DeployError::config_error("no readiness policy resolved for this deployment")
        })?;
        ReadinessWaiter::new(policy, self.context.working_dir())
            .wait(runner, cancel)
            .await?;
        Ok(self.transition())
    }
}
