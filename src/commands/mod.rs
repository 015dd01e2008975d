// ABOUTME: Command module aggregator for the og CLI.
// ABOUTME: Re-exports the create and deploy command handlers.

mod create;
mod deploy;

pub use create::create;
pub use deploy::deploy;
