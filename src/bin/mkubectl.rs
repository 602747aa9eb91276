//! mkubectl CLI Binary
//!
//! Runs one kubectl command in every context matching a pattern.

use clap::Parser;
use mkubectl::cancel::{cancel_pair, CancelHandle};
use mkubectl::cli::{map_error, Cli, RunContext};
use mkubectl::config::{ConfigLoader, MkubectlConfig};
use mkubectl::logging::{init_logging, parse_level, LoggingConfig};
use std::process;
use tracing::{error, info, warn};

fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    // An unknown --log-level is a startup error, before anything runs.
    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = parse_level(&logging_config.level).and_then(|_| init_logging(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("mkubectl starting");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create async runtime: {}", e);
            eprintln!("mkubectl: failed to create async runtime: {}", e);
            process::exit(1);
        }
    };

    let context = RunContext::new(config, &cli);
    let (handle, signal) = cancel_pair();
    runtime.spawn(cancel_on_shutdown_signal(handle));

    let mut stdout = std::io::stdout();
    match runtime.block_on(context.execute(&mut stdout, &signal)) {
        Ok(summary) => {
            info!(contexts = summary.contexts.len(), "Command completed successfully");
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration: CLI flags override the loaded config.
fn build_logging_config(cli: &Cli, config: &MkubectlConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    logging
}

async fn cancel_on_shutdown_signal(handle: CancelHandle) {
    wait_for_shutdown_signal().await;
    warn!("shutdown signal received, cancelling");
    handle.cancel();
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("could not register signal handlers");
                std::future::pending::<()>().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
