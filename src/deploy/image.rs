// ABOUTME: Image build stage: one buildx call that builds and optionally pushes.
// ABOUTME: Build and push failures both surface as DeployError::Build.

use std::path::Path;

use tokio_util::sync::CancellationToken;

use crate::runner::{CommandOutput, CommandRunner, Invocation};

use super::context::ImageSpec;
use super::error::{DeployError, FailureClass};
use super::exec::run_checked;

pub const BUILD_TOOL: &str = "docker";

/// Builds the app image from its build description.
pub struct ImageBuildStage<'a> {
    spec: &'a ImageSpec,
    working_dir: &'a Path,
}

impl<'a> ImageBuildStage<'a> {
    pub fn new(spec: &'a ImageSpec, working_dir: &'a Path) -> Self {
        Self { spec, working_dir }
    }

    /// The build tool call for this spec.
    ///
    /// With push enabled the same call pushes; otherwise a single-platform
    /// build is loaded into the local image store and nothing leaves the host.
    pub fn invocation(&self) -> Invocation {
        let platforms = self
            .spec
            .platforms
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let invocation = Invocation::new(BUILD_TOOL)
            .args(["buildx", "build"])
            .arg("--file")
            .arg(self.spec.build_description.to_string_lossy())
            .arg("--platform")
            .arg(platforms)
            .arg("--tag")
            .arg(self.spec.image.to_string());

        let invocation = if self.spec.push {
            invocation.arg("--push")
        } else if self.spec.platforms.len() == 1 {
            invocation.arg("--load")
        } else {
            invocation
        };

        invocation.arg(".").current_dir(self.working_dir)
    }

    pub async fn run<R: CommandRunner + ?Sized>(
        &self,
        runner: &R,
        cancel: &CancellationToken,
    ) -> Result<CommandOutput, DeployError> {
        tracing::info!(
            image = %self.spec.image,
            push = self.spec.push,
            "building image"
        );
        run_checked(runner, &self.invocation(), cancel, FailureClass::Build).await
    }
}
