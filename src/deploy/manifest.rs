// ABOUTME: Manifest apply stage: submits the rendered manifest to the cluster.
// ABOUTME: Re-applying replaces the desired state; nothing is tracked locally.

use std::path::Path;

use tokio_util::sync::CancellationToken;

use crate::runner::{CommandOutput, CommandRunner, Invocation};

use super::context::ManifestLocation;
use super::error::{DeployError, FailureClass};
use super::exec::run_checked;

pub const CLUSTER_CLIENT: &str = "kubectl";

pub struct ManifestApplyStage<'a> {
    manifest: &'a ManifestLocation,
    working_dir: &'a Path,
}

impl<'a> ManifestApplyStage<'a> {
    pub fn new(manifest: &'a ManifestLocation, working_dir: &'a Path) -> Self {
        Self {
            manifest,
            working_dir,
        }
    }

    pub fn invocation(&self) -> Invocation {
        Invocation::new(CLUSTER_CLIENT)
            .args(["apply", "-f"])
            .arg(self.manifest.path().to_string_lossy())
            .current_dir(self.working_dir)
    }

    pub async fn run<R: CommandRunner + ?Sized>(
        &self,
        runner: &R,
        cancel: &CancellationToken,
    ) -> Result<CommandOutput, DeployError> {
        run_checked(runner, &self.invocation(), cancel, FailureClass::Apply).await
    }
}
