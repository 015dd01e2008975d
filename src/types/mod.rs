// ABOUTME: Validated domain types shared by config, deploy, and engine.
// ABOUTME: Construction fails early instead of handing bad values to external tools.

mod app_name;
mod deploy_identifier;
mod image_ref;

pub use app_name::{AppName, AppNameError};
pub use deploy_identifier::{DeployIdentifier, DeployIdentifierError, IMAGE_TAG_PREFIX};
pub use image_ref::{ImageRef, ImageRefError};
