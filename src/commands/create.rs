// ABOUTME: Create command implementation.
// ABOUTME: Validates the license, then asks the core engine to scaffold the app.

use crate::cli::CreateArgs;
use ongoku::engine::{CoreEngine, CreateOptions, CreateRequest, default_license_path};
use ongoku::error::{Error, Result};
use ongoku::output::Output;
use ongoku::runner::ProcessRunner;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

pub async fn create(
    app_dir: &Path,
    args: CreateArgs,
    verbose: bool,
    cancel: CancellationToken,
    mut output: Output,
) -> Result<()> {
    output.start_timer();
    let log_level = args.engine_log_level(verbose);
    let license = args.license.clone();
    let license_file = args.license_file.clone();
    let request = CreateRequest::from_options(CreateOptions::from(args))?;

    let engine = match (license, license_file) {
        (Some(key), _) => CoreEngine::from_license(key)?,
        (None, Some(path)) => CoreEngine::from_license_file(path)?,
        (None, None) => CoreEngine::from_license_file(default_license_path(&home_dir()?))?,
    };
    let runner = ProcessRunner::default();

    output.progress("  → Validating license...");
    engine.validate(&runner, &cancel).await?;

    output.progress(&format!("  → Creating {}...", request.app_name));
    let invocation = engine
        .command(request.engine_args(&log_level))
        .current_dir(app_dir);
    engine.execute(&runner, invocation, &cancel).await?;

    output.success(&format!("Created {}", request.app_name));
    Ok(())
}

fn home_dir() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .ok_or(Error::MissingHome)
}
