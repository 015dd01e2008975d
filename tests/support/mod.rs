// ABOUTME: Test support utilities.
// ABOUTME: Provides the recording fake runner and app fixtures for integration tests.

use std::path::Path;
use std::sync::Once;

// Each test binary only uses some of these modules, so allow dead_code.
#[allow(dead_code)]
pub mod fake_runner;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("ongoku=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Write a goku.yaml with the given body into `dir`.
#[allow(dead_code)]
pub fn write_config(dir: &Path, body: &str) {
    std::fs::write(dir.join("goku.yaml"), body).unwrap();
}
