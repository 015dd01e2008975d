// ABOUTME: The deploy operation selected for one invocation, with its flags.
// ABOUTME: A closed enum, so "no operation" cannot be represented.

use std::fmt;
use std::time::Duration;

/// Flags of the `docker-image` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageFlags {
    pub image_repo: Option<String>,
    pub image_tag: Option<String>,
    pub no_push: bool,
}

/// Flags of the `k8s-apply` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadinessFlags {
    pub namespace: Option<String>,
    pub timeout: Option<Duration>,
}

/// The deploy operation to run. Exactly one per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Build the app image, pushing it unless disabled.
    BuildImage(ImageFlags),
    /// Apply the manifest, then wait for the pods to be ready.
    ApplyAndWait(ReadinessFlags),
    /// Delete the manifest from the cluster.
    Destroy,
}

impl Operation {
    /// Subcommand name of this operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::BuildImage(_) => "docker-image",
            Operation::ApplyAndWait(_) => "k8s-apply",
            Operation::Destroy => "destroy",
        }
    }

    /// Stages this operation runs, in order.
    pub fn stages(&self) -> &'static [Stage] {
        match self {
            Operation::BuildImage(_) => &[Stage::BuildImage],
            Operation::ApplyAndWait(_) => &[Stage::Apply, Stage::Readiness],
            Operation::Destroy => &[Stage::Teardown],
        }
    }
}

/// Everything the caller asked for: the operation and the common flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    pub deploy_identifier: Option<String>,
    pub operation: Operation,
}

impl DeployRequest {
    pub fn new(operation: Operation) -> Self {
        Self {
            deploy_identifier: None,
            operation,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.deploy_identifier = Some(identifier.into());
        self
    }
}

/// A named step of the pipeline, used to tag failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Resolve,
    BuildImage,
    Apply,
    Readiness,
    Teardown,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Resolve => "resolve",
            Stage::BuildImage => "build-image",
            Stage::Apply => "apply",
            Stage::Readiness => "readiness",
            Stage::Teardown => "teardown",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
