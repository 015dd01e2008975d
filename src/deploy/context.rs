// ABOUTME: Resolution of flags, environment, and app config into a DeploymentContext.
// ABOUTME: The context is built once per invocation and never changes afterwards.

use std::path::{Path, PathBuf};
use std::time::Duration;

use nonempty::NonEmpty;

use crate::config::{AppConfig, CONFIG_FILENAME};
use crate::diagnostics::{Diagnostics, Warning};
use crate::types::{AppName, DeployIdentifier, ImageRef};

use super::error::DeployError;
use super::operation::{DeployRequest, ImageFlags, Operation, ReadinessFlags};

pub const DEFAULT_IMAGE_REPOSITORY: &str = "iamteejay/goku";

/// Build description, relative to the app root.
pub const BUILD_DESCRIPTION_PATH: &str = "infra/.goku/static/app.Dockerfile";

/// Rendered workload manifest, relative to the app root.
pub const MANIFEST_PATH: &str = "infra/.goku/generated/k3s/app.yaml";

/// Pod label carrying the deploy identifier.
pub const IDENTIFIER_LABEL: &str = "identifier";

pub const DEPLOY_IDENTIFIER_ENV: &str = "GOKU_DEPLOY_IDENTIFIER";
pub const IMAGE_REPO_ENV: &str = "GOKU_DEPLOY_IMAGE_REPO";
pub const IMAGE_TAG_ENV: &str = "GOKU_DEPLOY_IMAGE_TAG";

/// Snapshot of the environment variables consulted during resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub deploy_identifier: Option<String>,
    pub image_repo: Option<String>,
    pub image_tag: Option<String>,
}

impl EnvOverrides {
    pub fn from_process() -> Self {
        let read = |key: &str| std::env::var(key).ok();
        Self {
            deploy_identifier: read(DEPLOY_IDENTIFIER_ENV),
            image_repo: read(IMAGE_REPO_ENV),
            image_tag: read(IMAGE_TAG_ENV),
        }
    }
}

/// What to build and where to send it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSpec {
    pub image: ImageRef,
    pub build_description: PathBuf,
    pub platforms: NonEmpty<String>,
    pub push: bool,
}

/// Path of an already-rendered manifest, relative to the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLocation(PathBuf);

impl ManifestLocation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Which pods must become ready, and how long to wait for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub namespace: String,
    pub selector: String,
    pub timeout: Duration,
}

impl ReadinessPolicy {
    pub fn for_identifier(
        identifier: &DeployIdentifier,
        namespace: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            selector: format!("{IDENTIFIER_LABEL}={identifier}"),
            timeout,
        }
    }
}

/// Resolved, validated parameters for one deploy invocation.
#[derive(Debug, Clone)]
pub struct DeploymentContext {
    app_name: AppName,
    identifier: DeployIdentifier,
    working_dir: PathBuf,
    image: Option<ImageSpec>,
    manifest: ManifestLocation,
    readiness: Option<ReadinessPolicy>,
}

impl DeploymentContext {
    /// Resolve a context from the request, the environment, and the app config.
    ///
    /// Precedence for the identifier is flag, then environment, then the
    /// compact app name. Every substituted default is recorded in `diag`.
    /// Image coordinates are only resolved for `BuildImage` and the readiness
    /// policy only for `ApplyAndWait`, so settings of one operation never
    /// fail another.
    pub fn resolve(
        config: &AppConfig,
        request: &DeployRequest,
        env: &EnvOverrides,
        diag: &mut Diagnostics,
    ) -> Result<Self, DeployError> {
        let app_name = config.app_name.as_deref().ok_or_else(|| {
            DeployError::config_error(format!(
                "no app_name in {CONFIG_FILENAME} at {}",
                config.root.display()
            ))
        })?;
        let app_name = AppName::new(app_name)
            .map_err(|e| DeployError::config_error(format!("invalid app name: {e}")))?;

        let identifier = resolve_identifier(&app_name, request, env, diag)?;

        let image = match &request.operation {
            Operation::BuildImage(flags) => {
                Some(resolve_image(config, flags, env, &identifier, diag)?)
            }
            _ => None,
        };

        let readiness = match &request.operation {
            Operation::ApplyAndWait(flags) => Some(resolve_readiness(config, flags, &identifier)?),
            _ => None,
        };

        Ok(DeploymentContext {
            app_name,
            identifier,
            working_dir: config.root.clone(),
            image,
            manifest: ManifestLocation::new(MANIFEST_PATH),
            readiness,
        })
    }

    pub fn app_name(&self) -> &AppName {
        &self.app_name
    }

    pub fn identifier(&self) -> &DeployIdentifier {
        &self.identifier
    }

    /// Directory every stage runs from (the app root).
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Present when the operation builds an image.
    pub fn image(&self) -> Option<&ImageSpec> {
        self.image.as_ref()
    }

    pub fn manifest(&self) -> &ManifestLocation {
        &self.manifest
    }

    /// Present when the operation waits for readiness.
    pub fn readiness(&self) -> Option<&ReadinessPolicy> {
        self.readiness.as_ref()
    }
}

/// First candidate that is present and not blank.
fn first_set<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
}

fn resolve_identifier(
    app_name: &AppName,
    request: &DeployRequest,
    env: &EnvOverrides,
    diag: &mut Diagnostics,
) -> Result<DeployIdentifier, DeployError> {
    let explicit = first_set([
        request.deploy_identifier.as_deref(),
        env.deploy_identifier.as_deref(),
    ]);

    if let Some(value) = explicit {
        return DeployIdentifier::new(value).map_err(|e| {
            DeployError::config_error(format!("invalid deploy identifier '{value}': {e}"))
        });
    }

    let derived = DeployIdentifier::derived_from(app_name).map_err(|e| {
        DeployError::config_error(format!(
            "cannot derive deploy identifier from app name '{app_name}': {e}"
        ))
    })?;
    diag.warn(Warning::default_identifier(derived.as_str()));
    Ok(derived)
}

fn resolve_image(
    config: &AppConfig,
    flags: &ImageFlags,
    env: &EnvOverrides,
    identifier: &DeployIdentifier,
    diag: &mut Diagnostics,
) -> Result<ImageSpec, DeployError> {
    let repository = match first_set([
        flags.image_repo.as_deref(),
        env.image_repo.as_deref(),
        config.deploy.image_repo.as_deref(),
    ]) {
        Some(repo) => repo.to_string(),
        None => {
            diag.warn(Warning::default_image_repository(DEFAULT_IMAGE_REPOSITORY));
            DEFAULT_IMAGE_REPOSITORY.to_string()
        }
    };

    let tag = match first_set([flags.image_tag.as_deref(), env.image_tag.as_deref()]) {
        Some(tag) => tag.to_string(),
        None => {
            let tag = identifier.default_image_tag();
            diag.warn(Warning::default_image_tag(&tag));
            tag
        }
    };

    let image = ImageRef::new(&repository, &tag).map_err(|e| {
        DeployError::config_error(format!("invalid image '{repository}:{tag}': {e}"))
    })?;

    Ok(ImageSpec {
        image,
        build_description: config.root.join(BUILD_DESCRIPTION_PATH),
        platforms: config.deploy.platforms.clone(),
        push: !flags.no_push,
    })
}

fn resolve_readiness(
    config: &AppConfig,
    flags: &ReadinessFlags,
    identifier: &DeployIdentifier,
) -> Result<ReadinessPolicy, DeployError> {
    let namespace = first_set([
        flags.namespace.as_deref(),
        Some(config.deploy.namespace.as_str()),
    ])
    .ok_or_else(|| DeployError::config_error("readiness namespace cannot be empty"))?;

    let timeout = flags.timeout.unwrap_or(config.deploy.readiness_timeout);
    if timeout.is_zero() {
        return Err(DeployError::config_error(
            "readiness timeout must be greater than zero",
        ));
    }

    Ok(ReadinessPolicy::for_identifier(identifier, namespace, timeout))
}
