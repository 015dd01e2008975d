// ABOUTME: Application configuration loaded from goku.yaml in the app root.
// ABOUTME: Provides the app name, root path, and deployment settings.

mod deploy;
mod deserialize;

pub use deploy::{
    DEFAULT_NAMESPACE, DEFAULT_PLATFORM, DEFAULT_READINESS_TIMEOUT, DeploySettings,
};

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "goku.yaml";
pub const CONFIG_FILENAME_ALT: &str = "goku.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Raw name from the file; validated when a deployment is resolved.
    #[serde(default)]
    pub app_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub deploy: DeploySettings,

    /// Directory holding the config file. Every stage runs from here.
    #[serde(skip)]
    pub root: PathBuf,
}

impl AppConfig {
    pub fn from_yaml(yaml: &str, root: impl Into<PathBuf>) -> Result<Self> {
        let mut config: AppConfig = serde_yaml::from_str(yaml)?;
        config.root = root.into();
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::from_yaml(&content, root)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [dir.join(CONFIG_FILENAME), dir.join(CONFIG_FILENAME_ALT)];

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading app config");
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Config for an app rooted at `root`, with every setting defaulted.
    pub fn for_app(app_name: &str, root: impl Into<PathBuf>) -> Self {
        AppConfig {
            app_name: Some(app_name.to_string()),
            description: None,
            deploy: DeploySettings::default(),
            root: root.into(),
        }
    }
}
