// ABOUTME: Diagnostics accumulator for non-fatal warnings during a command.
// ABOUTME: Records substituted defaults so they are never silently surprising.

/// Collects non-fatal warnings during resolution and deployment.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(kind = ?warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Whether a warning of the given kind was recorded.
    pub fn has(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }
}

/// A non-fatal warning collected during a command.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// The deploy identifier was derived from the app name.
    pub fn default_identifier(value: &str) -> Self {
        Self {
            kind: WarningKind::DefaultIdentifier,
            message: format!("deploy identifier not provided, using default: {value}"),
        }
    }

    /// The image repository fell back to the built-in default.
    pub fn default_image_repository(value: &str) -> Self {
        Self {
            kind: WarningKind::DefaultImageRepository,
            message: format!("image repository not provided, using default: {value}"),
        }
    }

    /// The image tag was derived from the deploy identifier.
    pub fn default_image_tag(value: &str) -> Self {
        Self {
            kind: WarningKind::DefaultImageTag,
            message: format!("image tag not provided, using default: {value}"),
        }
    }
}

/// Categories of warnings that can occur during a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    DefaultIdentifier,
    DefaultImageRepository,
    DefaultImageTag,
}
