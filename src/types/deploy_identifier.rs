// ABOUTME: Deployment identifier that scopes the image tag and pod labels.
// ABOUTME: Validated against Kubernetes label value rules.

use super::app_name::AppName;
use std::fmt;
use thiserror::Error;

/// Prefix of the image tag derived from an identifier.
pub const IMAGE_TAG_PREFIX: &str = "og-img-";

const MAX_LEN: usize = 63;

#[derive(Debug, Error)]
pub enum DeployIdentifierError {
    #[error("deploy identifier cannot be empty")]
    Empty,

    #[error("deploy identifier exceeds maximum length of 63 characters")]
    TooLong,

    #[error("deploy identifier must start and end with a letter or digit")]
    InvalidBoundary,

    #[error("invalid character in deploy identifier: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeployIdentifier(String);

impl DeployIdentifier {
    pub fn new(value: &str) -> Result<Self, DeployIdentifierError> {
        if value.is_empty() {
            return Err(DeployIdentifierError::Empty);
        }

        if value.len() > MAX_LEN {
            return Err(DeployIdentifierError::TooLong);
        }

        for c in value.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '.' {
                return Err(DeployIdentifierError::InvalidChar(c));
            }
        }

        let boundary_ok = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphanumeric());
        if !boundary_ok(value.chars().next()) || !boundary_ok(value.chars().last()) {
            return Err(DeployIdentifierError::InvalidBoundary);
        }

        Ok(Self(value.to_string()))
    }

    /// Identifier used when neither the flag nor the environment provides one.
    pub fn derived_from(app: &AppName) -> Result<Self, DeployIdentifierError> {
        Self::new(&app.to_compact())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn default_image_tag(&self) -> String {
        format!("{IMAGE_TAG_PREFIX}{}", self.0)
    }
}

impl fmt::Display for DeployIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
