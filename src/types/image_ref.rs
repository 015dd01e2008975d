// ABOUTME: Container image coordinates (repository and tag).
// ABOUTME: Validates both parts before they reach the build tool.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageRefError {
    #[error("image repository cannot be empty")]
    EmptyRepository,

    #[error("image tag cannot be empty")]
    EmptyTag,

    #[error("image tag exceeds maximum length of 128 characters")]
    TagTooLong,

    #[error("invalid character in image repository: {0}")]
    InvalidRepositoryChar(char),

    #[error("invalid character in image tag: {0}")]
    InvalidTagChar(char),

    #[error("image tag cannot start with '{0}'")]
    InvalidTagStart(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    repository: String,
    tag: String,
}

impl ImageRef {
    pub fn new(repository: &str, tag: &str) -> Result<Self, ImageRefError> {
        let repository = repository.trim();
        let tag = tag.trim();

        if repository.is_empty() {
            return Err(ImageRefError::EmptyRepository);
        }

        // Registry hosts may carry a port, so ':' is allowed in the repository
        for c in repository.chars() {
            if !c.is_ascii_alphanumeric() && !matches!(c, '/' | ':' | '.' | '-' | '_') {
                return Err(ImageRefError::InvalidRepositoryChar(c));
            }
        }

        if tag.is_empty() {
            return Err(ImageRefError::EmptyTag);
        }

        if tag.len() > 128 {
            return Err(ImageRefError::TagTooLong);
        }

        for c in tag.chars() {
            if !c.is_ascii_alphanumeric() && !matches!(c, '.' | '-' | '_') {
                return Err(ImageRefError::InvalidTagChar(c));
            }
        }

        if let Some(first @ ('.' | '-')) = tag.chars().next() {
            return Err(ImageRefError::InvalidTagStart(first));
        }

        Ok(Self {
            repository: repository.to_string(),
            tag: tag.to_string(),
        })
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)
    }
}
