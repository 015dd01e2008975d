// ABOUTME: Integration tests for deployment context resolution.
// ABOUTME: Covers identifier/image precedence, defaults, and environment handling.

use ongoku::config::AppConfig;
use ongoku::deploy::{
    DEFAULT_IMAGE_REPOSITORY, DEPLOY_IDENTIFIER_ENV, DeployErrorKind, DeployRequest,
    DeploymentContext, EnvOverrides, IMAGE_REPO_ENV, IMAGE_TAG_ENV, ImageFlags, Operation,
    ReadinessFlags,
};
use ongoku::diagnostics::{Diagnostics, WarningKind};
use proptest::prelude::*;
use std::time::Duration;

fn demo_config() -> AppConfig {
    AppConfig::for_app("demo", "/srv/demo")
}

fn build_request(flags: ImageFlags) -> DeployRequest {
    DeployRequest::new(Operation::BuildImage(flags))
}

mod defaults {
    use super::*;

    #[test]
    fn nothing_set_uses_every_default() {
        let mut diag = Diagnostics::default();
        let context = DeploymentContext::resolve(
            &demo_config(),
            &build_request(ImageFlags::default()),
            &EnvOverrides::default(),
            &mut diag,
        )
        .unwrap();

        assert_eq!(context.identifier().as_str(), "demo");
        let image = context.image().unwrap();
        assert_eq!(image.image.repository(), DEFAULT_IMAGE_REPOSITORY);
        assert_eq!(image.image.tag(), "og-img-demo");
        assert!(image.push);

        assert!(diag.has(WarningKind::DefaultIdentifier));
        assert!(diag.has(WarningKind::DefaultImageRepository));
        assert!(diag.has(WarningKind::DefaultImageTag));
    }

    #[test]
    fn identifier_derived_from_compact_app_name() {
        let config = AppConfig::for_app("My Shop", "/srv/shop");
        let context = DeploymentContext::resolve(
            &config,
            &DeployRequest::new(Operation::Destroy),
            &EnvOverrides::default(),
            &mut Diagnostics::default(),
        )
        .unwrap();
        assert_eq!(context.identifier().as_str(), "myshop");
    }

    #[test]
    fn config_repository_beats_builtin_default() {
        let yaml = "app_name: demo\ndeploy:\n  image_repo: registry.local/demo\n";
        let config = AppConfig::from_yaml(yaml, "/srv/demo").unwrap();
        let mut diag = Diagnostics::default();
        let context = DeploymentContext::resolve(
            &config,
            &build_request(ImageFlags::default()),
            &EnvOverrides::default(),
            &mut diag,
        )
        .unwrap();

        assert_eq!(context.image().unwrap().image.repository(), "registry.local/demo");
        assert!(!diag.has(WarningKind::DefaultImageRepository));
    }

    #[test]
    fn readiness_flags_override_config() {
        let request = DeployRequest::new(Operation::ApplyAndWait(ReadinessFlags {
            namespace: Some("staging".to_string()),
            timeout: Some(Duration::from_secs(30)),
        }));
        let context = DeploymentContext::resolve(
            &demo_config(),
            &request,
            &EnvOverrides::default(),
            &mut Diagnostics::default(),
        )
        .unwrap();

        let readiness = context.readiness().unwrap();
        assert_eq!(readiness.namespace, "staging");
        assert_eq!(readiness.timeout, Duration::from_secs(30));
        assert!(context.image().is_none());
    }
}

mod errors {
    use super::*;

    #[test]
    fn missing_app_name_is_configuration_error() {
        let config = AppConfig::from_yaml("description: no name\n", "/srv/x").unwrap();
        let err = DeploymentContext::resolve(
            &config,
            &DeployRequest::new(Operation::Destroy),
            &EnvOverrides::default(),
            &mut Diagnostics::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), DeployErrorKind::Configuration);
    }

    #[test]
    fn invalid_identifier_is_configuration_error() {
        let err = DeploymentContext::resolve(
            &demo_config(),
            &DeployRequest::new(Operation::Destroy).with_identifier("not valid!"),
            &EnvOverrides::default(),
            &mut Diagnostics::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), DeployErrorKind::Configuration);
        assert!(err.to_string().contains("not valid!"));
    }

    #[test]
    fn invalid_tag_is_configuration_error() {
        let err = DeploymentContext::resolve(
            &demo_config(),
            &build_request(ImageFlags {
                image_tag: Some("-bad".to_string()),
                ..Default::default()
            }),
            &EnvOverrides::default(),
            &mut Diagnostics::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), DeployErrorKind::Configuration);
    }
}

mod isolation {
    use super::*;

    #[test]
    fn destroy_ignores_a_bad_image_tag_in_env() {
        let env = EnvOverrides {
            image_tag: Some("v1+build".to_string()),
            ..Default::default()
        };
        let context = DeploymentContext::resolve(
            &demo_config(),
            &DeployRequest::new(Operation::Destroy),
            &env,
            &mut Diagnostics::default(),
        )
        .unwrap();
        assert!(context.image().is_none());
    }

    #[test]
    fn k8s_apply_ignores_a_bad_image_tag_in_env() {
        let env = EnvOverrides {
            image_tag: Some("v1+build".to_string()),
            ..Default::default()
        };
        let context = DeploymentContext::resolve(
            &demo_config(),
            &DeployRequest::new(Operation::ApplyAndWait(ReadinessFlags::default())),
            &env,
            &mut Diagnostics::default(),
        )
        .unwrap();
        assert!(context.readiness().is_some());
    }

    #[test]
    fn docker_image_ignores_bad_readiness_settings() {
        let yaml = "app_name: demo\ndeploy:\n  readiness_timeout: 0s\n  namespace: \"\"\n";
        let config = AppConfig::from_yaml(yaml, "/srv/demo").unwrap();
        let context = DeploymentContext::resolve(
            &config,
            &build_request(ImageFlags::default()),
            &EnvOverrides::default(),
            &mut Diagnostics::default(),
        )
        .unwrap();

        assert!(context.readiness().is_none());
        assert!(context.image().is_some());
    }

    #[test]
    fn k8s_apply_still_rejects_bad_readiness_settings() {
        let yaml = "app_name: demo\ndeploy:\n  readiness_timeout: 0s\n";
        let config = AppConfig::from_yaml(yaml, "/srv/demo").unwrap();
        let err = DeploymentContext::resolve(
            &config,
            &DeployRequest::new(Operation::ApplyAndWait(ReadinessFlags::default())),
            &EnvOverrides::default(),
            &mut Diagnostics::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), DeployErrorKind::Configuration);
    }

    #[test]
    fn docker_image_still_rejects_a_bad_image_tag_in_env() {
        let env = EnvOverrides {
            image_tag: Some("v1+build".to_string()),
            ..Default::default()
        };
        let err = DeploymentContext::resolve(
            &demo_config(),
            &build_request(ImageFlags::default()),
            &env,
            &mut Diagnostics::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("v1+build"));
    }
}

mod environment {
    use super::*;

    #[test]
    fn from_process_reads_goku_variables() {
        temp_env::with_vars(
            [
                (DEPLOY_IDENTIFIER_ENV, Some("from-env")),
                (IMAGE_REPO_ENV, Some("ghcr.io/acme/demo")),
                (IMAGE_TAG_ENV, None),
            ],
            || {
                let env = EnvOverrides::from_process();
                assert_eq!(env.deploy_identifier.as_deref(), Some("from-env"));
                assert_eq!(env.image_repo.as_deref(), Some("ghcr.io/acme/demo"));
                assert_eq!(env.image_tag, None);
            },
        );
    }

    #[test]
    fn env_fills_in_for_missing_flags() {
        let env = EnvOverrides {
            deploy_identifier: Some("ci-42".to_string()),
            image_repo: Some("ghcr.io/acme/demo".to_string()),
            image_tag: Some("sha-abc".to_string()),
        };
        let mut diag = Diagnostics::default();
        let context = DeploymentContext::resolve(
            &demo_config(),
            &build_request(ImageFlags::default()),
            &env,
            &mut diag,
        )
        .unwrap();

        assert_eq!(context.identifier().as_str(), "ci-42");
        let image = &context.image().unwrap().image;
        assert_eq!(image.to_string(), "ghcr.io/acme/demo:sha-abc");
        assert!(!diag.has_warnings());
    }
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,12}[a-z0-9]"
}

proptest! {
    #[test]
    fn identifier_precedence_is_flag_then_env_then_derived(
        flag in proptest::option::of(identifier()),
        from_env in proptest::option::of(identifier()),
    ) {
        let mut request = DeployRequest::new(Operation::Destroy);
        request.deploy_identifier = flag.clone();
        let env = EnvOverrides {
            deploy_identifier: from_env.clone(),
            ..Default::default()
        };

        let mut diag = Diagnostics::default();
        let context =
            DeploymentContext::resolve(&demo_config(), &request, &env, &mut diag).unwrap();

        let expected = flag.or(from_env).unwrap_or_else(|| "demo".to_string());
        prop_assert_eq!(context.identifier().as_str(), expected.as_str());
        prop_assert_eq!(
            diag.has(WarningKind::DefaultIdentifier),
            request.deploy_identifier.is_none() && env.deploy_identifier.is_none()
        );
    }

    #[test]
    fn unset_tag_defaults_to_prefixed_identifier(
        flag in proptest::option::of(identifier()),
        from_env in proptest::option::of(identifier()),
        no_push in any::<bool>(),
    ) {
        let mut request = build_request(ImageFlags { no_push, ..Default::default() });
        request.deploy_identifier = flag;
        let env = EnvOverrides {
            deploy_identifier: from_env,
            ..Default::default()
        };

        let context = DeploymentContext::resolve(
            &demo_config(),
            &request,
            &env,
            &mut Diagnostics::default(),
        )
        .unwrap();

        prop_assert_eq!(
            context.image().unwrap().image.tag(),
            format!("og-img-{}", context.identifier())
        );
    }
}
