// ABOUTME: Deploy command implementation.
// ABOUTME: Loads the app config and drives one operation through the orchestrator.

use ongoku::config::AppConfig;
use ongoku::deploy::{DeployRequest, EnvOverrides, Orchestrator};
use ongoku::diagnostics::Diagnostics;
use ongoku::error::Result;
use ongoku::output::Output;
use ongoku::runner::ProcessRunner;
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Run one deploy operation for the app rooted at `app_dir`.
pub async fn deploy(
    app_dir: &Path,
    request: DeployRequest,
    cancel: CancellationToken,
    mut output: Output,
) -> Result<()> {
    output.start_timer();
    let config = AppConfig::discover(app_dir)?;
    let env = EnvOverrides::from_process();
    let mut diag = Diagnostics::default();

    output.progress(&format!(
        "Running {} for {}",
        request.operation.name(),
        config.app_name.as_deref().unwrap_or("<unnamed app>")
    ));

    let orchestrator = Orchestrator::new(ProcessRunner::default(), cancel);
    let outcome = orchestrator
        .execute(&config, &request, &env, &mut diag)
        .await;

    // Defaults are reported even when a later stage failed.
    output.warnings(&diag);

    let completed = outcome.into_result()?;
    for stage in &completed {
        output.progress(&format!("  ✓ {stage}"));
    }
    output.success(&format!("{} complete!", request.operation.name()));
    Ok(())
}
