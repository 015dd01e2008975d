// ABOUTME: Entry point for the og CLI application.
// ABOUTME: Sets up logging and cancellation, then dispatches to command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use ongoku::error::Result;
use ongoku::output::{Output, OutputMode};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling");
            on_interrupt.cancel();
        }
    });

    let mode = OutputMode::from_flags(cli.quiet, cli.json);
    if let Err(e) = run(cli, cancel).await {
        Output::new(mode).error(&e.to_string(), e.diagnostic_output());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, cancel: CancellationToken) -> Result<()> {
    let output = Output::new(OutputMode::from_flags(cli.quiet, cli.json));
    match cli.command {
        Commands::Create(args) => {
            commands::create(&cli.app_dir, args, cli.verbose, cancel, output).await
        }
        Commands::Deploy(args) => {
            commands::deploy(&cli.app_dir, args.into(), cancel, output).await
        }
    }
}
