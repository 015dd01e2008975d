// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Maps the deploy subcommands onto library deploy requests.

use clap::{Args, Parser, Subcommand};
use ongoku::deploy::{DeployRequest, ImageFlags, Operation, ReadinessFlags};
use ongoku::engine::CreateOptions;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "og")]
#[command(about = "Scaffold, build and deploy apps on goku")]
#[command(version)]
pub struct Cli {
    /// Application root directory
    #[arg(short = 'd', long, global = true, default_value = ".")]
    pub app_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print results and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new app through the core engine
    Create(CreateArgs),

    /// Build, deploy or remove the app
    Deploy(DeployArgs),
}

#[derive(Args)]
pub struct CreateArgs {
    /// Name of the new app
    pub app_name: String,

    /// Short description of the app
    #[arg(long)]
    pub description: Option<String>,

    /// Components to generate, comma separated
    #[arg(long = "generate-components", value_delimiter = ',')]
    pub components: Vec<String>,

    #[arg(long)]
    pub skip_generate: bool,

    #[arg(long)]
    pub skip_git_init: bool,

    #[arg(long)]
    pub skip_dev_migrate: bool,

    /// Keep partially created files on failure
    #[arg(long)]
    pub no_rollback: bool,

    /// License file (defaults to ~/.ongoku/license.txt)
    #[arg(long)]
    pub license_file: Option<PathBuf>,

    /// License key, instead of a license file
    #[arg(long, conflicts_with = "license_file")]
    pub license: Option<String>,

    /// Log level passed to the core engine [default: info, debug with --verbose]
    #[arg(long)]
    pub log_level: Option<String>,
}

impl CreateArgs {
    /// Log level for the core engine, following our own unless overridden.
    pub fn engine_log_level(&self, verbose: bool) -> String {
        match (&self.log_level, verbose) {
            (Some(level), _) => level.clone(),
            (None, true) => "debug".to_string(),
            (None, false) => "info".to_string(),
        }
    }
}

impl From<CreateArgs> for CreateOptions {
    fn from(args: CreateArgs) -> Self {
        CreateOptions {
            app_name: args.app_name,
            description: args.description,
            components: args.components,
            skip_generate: args.skip_generate,
            skip_git_init: args.skip_git_init,
            skip_dev_migrate: args.skip_dev_migrate,
            no_rollback: args.no_rollback,
        }
    }
}

#[derive(Args)]
pub struct DeployArgs {
    /// Deployment identifier [env: GOKU_DEPLOY_IDENTIFIER]
    #[arg(long, global = true)]
    pub deploy_identifier: Option<String>,

    #[command(subcommand)]
    pub command: DeployCommand,
}

#[derive(Subcommand)]
pub enum DeployCommand {
    /// Build the app image and push it
    DockerImage {
        /// Image repository [env: GOKU_DEPLOY_IMAGE_REPO]
        #[arg(long)]
        image_repo: Option<String>,

        /// Image tag [env: GOKU_DEPLOY_IMAGE_TAG]
        #[arg(long)]
        image_tag: Option<String>,

        /// Build without pushing
        #[arg(long)]
        no_push: bool,
    },

    /// Apply the app manifest and wait for its pods
    K8sApply {
        /// Namespace to wait in
        #[arg(long)]
        namespace: Option<String>,

        /// How long to wait for readiness (e.g. 90s, 5m)
        #[arg(long, value_parser = parse_duration)]
        timeout: Option<Duration>,
    },

    /// Delete the app manifest from the cluster
    Destroy,
}

impl From<DeployArgs> for DeployRequest {
    fn from(args: DeployArgs) -> Self {
        let operation = match args.command {
            DeployCommand::DockerImage {
                image_repo,
                image_tag,
                no_push,
            } => Operation::BuildImage(ImageFlags {
                image_repo,
                image_tag,
                no_push,
            }),
            DeployCommand::K8sApply { namespace, timeout } => {
                Operation::ApplyAndWait(ReadinessFlags { namespace, timeout })
            }
            DeployCommand::Destroy => Operation::Destroy,
        };
        DeployRequest {
            deploy_identifier: args.deploy_identifier,
            operation,
        }
    }
}

fn parse_duration(value: &str) -> Result<Duration, String> {
    humantime_serde::re::humantime::parse_duration(value).map_err(|e| e.to_string())
}
