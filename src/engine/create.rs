// ABOUTME: Validated request to scaffold a new app through the core engine.
// ABOUTME: Applies defaults and renders the engine's create arguments.

use crate::types::AppName;

use super::EngineError;

pub const DEFAULT_COMPONENTS: [&str; 4] = ["backend", "database", "frontend", "infra"];

/// Raw create options as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub app_name: String,
    pub description: Option<String>,
    pub components: Vec<String>,
    pub skip_generate: bool,
    pub skip_git_init: bool,
    pub skip_dev_migrate: bool,
    pub no_rollback: bool,
}

/// Create options after validation and defaulting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub app_name: String,
    pub description: Option<String>,
    pub components: Vec<String>,
    pub skip_generate: bool,
    pub skip_git_init: bool,
    pub skip_dev_migrate: bool,
    pub no_rollback: bool,
}

impl CreateRequest {
    pub fn from_options(options: CreateOptions) -> Result<Self, EngineError> {
        let name = options.app_name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidAppName("please provide an app name".to_string()));
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            let suggestion = suggest_name(name);
            return Err(EngineError::InvalidAppName(format!(
                "app name should only contain letters, numbers and -. \
                 How about naming it '{suggestion}'?"
            )));
        }

        let components: Vec<String> = options
            .components
            .iter()
            .flat_map(|c| split_components(c))
            .collect();
        let components = if components.is_empty() {
            tracing::debug!(?DEFAULT_COMPONENTS, "no components given, using defaults");
            DEFAULT_COMPONENTS.iter().map(|c| c.to_string()).collect()
        } else {
            components
        };

        let description = options
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        if description.is_none() {
            tracing::warn!(
                "no description provided for the app; consider adding one to {}",
                crate::config::CONFIG_FILENAME
            );
        }

        Ok(Self {
            app_name: name.to_string(),
            description,
            components,
            skip_generate: options.skip_generate,
            skip_git_init: options.skip_git_init,
            skip_dev_migrate: options.skip_dev_migrate,
            no_rollback: options.no_rollback,
        })
    }

    /// Arguments of the engine's `create` call, without the license.
    pub fn engine_args(&self, log_level: &str) -> Vec<String> {
        let mut args = vec!["create".to_string(), self.app_name.clone()];

        if let Some(description) = &self.description {
            args.push("--description".to_string());
            args.push(description.clone());
        }
        if !self.components.is_empty() {
            args.push("--generate-components".to_string());
            args.push(self.components.join(","));
        }

        let switches = [
            (self.skip_generate, "--skip-generate"),
            (self.skip_git_init, "--skip-git-init"),
            (self.skip_dev_migrate, "--skip-dev-migrate"),
            (self.no_rollback, "--no-rollback"),
        ];
        args.extend(
            switches
                .into_iter()
                .filter(|(on, _)| *on)
                .map(|(_, flag)| flag.to_string()),
        );

        args.push("--log-level".to_string());
        args.push(log_level.to_string());
        args
    }
}

fn split_components(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// Kebab-case form of an invalid name, keeping only allowed characters.
fn suggest_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    match AppName::new(&cleaned) {
        Ok(app) => app.to_kebab(),
        Err(_) => "my-app".to_string(),
    }
}
