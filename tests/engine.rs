// ABOUTME: Integration tests for the core engine wrapper and create requests.
// ABOUTME: Uses the fake runner to check license handling and engine calls.

mod support;

use ongoku::engine::*;
use std::path::Path;
use support::fake_runner::{FakeRunner, Reply};
use tokio_util::sync::CancellationToken;

fn licensed_engine(dir: &Path) -> CoreEngine {
    let path = dir.join(LICENSE_FILENAME);
    std::fs::write(&path, "lic-123\n").unwrap();
    CoreEngine::from_license_file(&path).unwrap()
}

mod license {
    use super::*;

    #[test]
    fn missing_license_file_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");

        let err = CoreEngine::from_license_file(&path).unwrap_err();
        assert!(matches!(err, EngineError::LicenseUnreadable { .. }));
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn empty_license_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LICENSE_FILENAME);
        std::fs::write(&path, "\n").unwrap();

        assert!(matches!(
            CoreEngine::from_license_file(&path),
            Err(EngineError::EmptyLicense)
        ));
    }

    #[test]
    fn license_file_is_passed_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let engine = licensed_engine(dir.path());

        let invocation = engine.command(["version"]);
        assert_eq!(invocation.program(), ENGINE_BINARY);
        assert!(invocation.has_arg("--license-file"));
        assert!(!invocation.has_arg("lic-123"));
        assert_eq!(engine.license(), &License::File(dir.path().join(LICENSE_FILENAME)));
    }
}

mod calls {
    use super::*;

    #[tokio::test]
    async fn validate_runs_version() {
        let dir = tempfile::tempdir().unwrap();
        let engine = licensed_engine(dir.path());
        let runner = FakeRunner::new();

        engine
            .validate(&runner, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(runner.call_keys(), ["goku version"]);
    }

    #[tokio::test]
    async fn rejected_license_keeps_engine_output() {
        let dir = tempfile::tempdir().unwrap();
        let engine = licensed_engine(dir.path());
        let runner =
            FakeRunner::new().reply("goku version", Reply::exit_with_stderr(1, "license expired"));

        let err = engine
            .validate(&runner, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("exit code 1"));
        assert_eq!(err.output().unwrap().stderr, "license expired");
    }

    #[tokio::test]
    async fn create_call_carries_request_and_license() {
        let dir = tempfile::tempdir().unwrap();
        let engine = licensed_engine(dir.path());
        let runner = FakeRunner::new();
        let request = CreateRequest::from_options(CreateOptions {
            app_name: "shop".to_string(),
            description: Some("Online shop".to_string()),
            ..Default::default()
        })
        .unwrap();

        let invocation = engine
            .command(request.engine_args("debug"))
            .current_dir(dir.path());
        engine
            .execute(&runner, invocation, &CancellationToken::new())
            .await
            .unwrap();

        let call = runner.call("goku create");
        let args = call.arguments();
        assert_eq!(&args[..2], ["create", "shop"]);
        assert!(call.has_arg("backend,database,frontend,infra"));
        assert!(call.has_arg("--license-file"));
        let license_path = dir.path().join(LICENSE_FILENAME);
        assert_eq!(args.last().map(String::as_str), license_path.to_str());
        assert_eq!(call.working_dir(), Some(dir.path()));
    }

    #[tokio::test]
    async fn missing_engine_binary_is_runner_error() {
        let dir = tempfile::tempdir().unwrap();
        let engine = licensed_engine(dir.path());
        let runner = FakeRunner::new().reply("goku version", Reply::SpawnFailure);

        let err = engine
            .validate(&runner, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Runner(_)));
        assert!(err.output().is_none());
    }
}
