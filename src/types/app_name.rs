// ABOUTME: Application name as read from goku.yaml or the create command.
// ABOUTME: Provides the compact and kebab forms used to derive other names.

use heck::{ToKebabCase, ToSnakeCase};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppNameError {
    #[error("app name cannot be empty")]
    Empty,

    #[error("invalid character in app name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppName(String);

impl AppName {
    pub fn new(value: &str) -> Result<Self, AppNameError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AppNameError::Empty);
        }

        for c in value.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != ' ' {
                return Err(AppNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form with every word separator removed: `My App` becomes `myapp`.
    pub fn to_compact(&self) -> String {
        self.0.to_snake_case().replace('_', "")
    }

    pub fn to_kebab(&self) -> String {
        self.0.to_kebab_case()
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_form_drops_separators() {
        assert_eq!(AppName::new("demo").unwrap().to_compact(), "demo");
        assert_eq!(AppName::new("My App").unwrap().to_compact(), "myapp");
        assert_eq!(AppName::new("demo-app").unwrap().to_compact(), "demoapp");
        assert_eq!(AppName::new("DemoApp").unwrap().to_compact(), "demoapp");
    }

    #[test]
    fn kebab_form() {
        assert_eq!(AppName::new("DemoApp").unwrap().to_kebab(), "demo-app");
    }

    #[test]
    fn rejects_empty_and_symbols() {
        assert!(matches!(AppName::new("  "), Err(AppNameError::Empty)));
        assert!(matches!(
            AppName::new("demo!"),
            Err(AppNameError::InvalidChar('!'))
        ));
    }
}
