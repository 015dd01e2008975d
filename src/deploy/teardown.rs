// ABOUTME: Teardown stage: deletes the applied manifest from the cluster.
// ABOUTME: No check that an apply happened; the cluster client's exit code is surfaced as-is.

use std::path::Path;

use tokio_util::sync::CancellationToken;

use crate::runner::{CommandOutput, CommandRunner, Invocation};

use super::context::ManifestLocation;
use super::error::{DeployError, FailureClass};
use super::exec::run_checked;
use super::manifest::CLUSTER_CLIENT;

pub struct TeardownStage<'a> {
    manifest: &'a ManifestLocation,
    working_dir: &'a Path,
}

impl<'a> TeardownStage<'a> {
    pub fn new(manifest: &'a ManifestLocation, working_dir: &'a Path) -> Self {
        Self {
            manifest,
            working_dir,
        }
    }

    pub fn invocation(&self) -> Invocation {
        Invocation::new(CLUSTER_CLIENT)
            .args(["delete", "-f"])
            .arg(self.manifest.path().to_string_lossy())
            .current_dir(self.working_dir)
    }

    pub async fn run<R: CommandRunner + ?Sized>(
        &self,
        runner: &R,
        cancel: &CancellationToken,
    ) -> Result<CommandOutput, DeployError> {
        run_checked(runner, &self.invocation(), cancel, FailureClass::Teardown).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::manifest::ManifestApplyStage;
    use super::*;

    #[test]
    fn deletes_the_manifest_that_apply_uses() {
        let manifest = ManifestLocation::new("infra/.goku/generated/k3s/app.yaml");
        let root = Path::new("/srv/demo");

        let apply = ManifestApplyStage::new(&manifest, root).invocation();
        let delete = TeardownStage::new(&manifest, root).invocation();

        assert_eq!(delete.arguments()[0], "delete");
        assert_eq!(apply.arguments()[1..], delete.arguments()[1..]);
        assert_eq!(apply.working_dir(), delete.working_dir());
    }
}
