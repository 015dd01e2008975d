// ABOUTME: Deployment settings section of goku.yaml.
// ABOUTME: Image repository, build platforms, namespace, and readiness timeout.

use nonempty::NonEmpty;
use serde::Deserialize;
use std::time::Duration;

use super::deserialize::deserialize_platforms;

pub const DEFAULT_PLATFORM: &str = "linux/amd64";
pub const DEFAULT_NAMESPACE: &str = "ongoku";
pub const DEFAULT_READINESS_TIMEOUT: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, Deserialize)]
pub struct DeploySettings {
    #[serde(default)]
    pub image_repo: Option<String>,

    #[serde(
        default = "default_platforms",
        deserialize_with = "deserialize_platforms"
    )]
    pub platforms: NonEmpty<String>,

    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_readiness_timeout", with = "humantime_serde")]
    pub readiness_timeout: Duration,
}

fn default_platforms() -> NonEmpty<String> {
    NonEmpty::new(DEFAULT_PLATFORM.to_string())
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_readiness_timeout() -> Duration {
    DEFAULT_READINESS_TIMEOUT
}

impl Default for DeploySettings {
    fn default() -> Self {
        DeploySettings {
            image_repo: None,
            platforms: default_platforms(),
            namespace: default_namespace(),
            readiness_timeout: default_readiness_timeout(),
        }
    }
}
