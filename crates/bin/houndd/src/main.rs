//! # houndd: hound console daemon
//!
//! Composition root that wires the process runner and the HTTP adapter
//! together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (CLI args, env vars, config file)
//! - Initialize `tracing` from the configured filter
//! - Build the row/action catalog from the configured services
//! - Construct application services, injecting the command runner via the port trait
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve, or run one-shot `status` / `action` commands
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod cli;
mod config;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hound_adapter_http_axum::state::AppState;
use hound_adapter_process_tokio::TokioCommandRunner;
use hound_app::services::action_service::{ActionService, FailurePolicy};
use hound_app::services::status_service::StatusService;
use hound_domain::action::{ActionOutcome, ActionRequest, ActionStatus};
use hound_domain::report::StatusReport;

use crate::cli::{Cli, Command};
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let command = cli.subcommand();
    let catalog = Arc::new(config.catalog()?);
    let runner = Arc::new(TokioCommandRunner::new());
    let environment = config.environment();

    let mut action_settings = config.action_settings();
    if matches!(command, Command::Action { .. }) {
        // the process exits right after, which would kill detached commands
        action_settings.policy = FailurePolicy::Report;
    }

    let status_service = StatusService::new(
        Arc::clone(&runner),
        Arc::clone(&catalog),
        environment.clone(),
        config.probe_timeout(),
    );
    let action_service = ActionService::new(runner, catalog, environment, action_settings);

    match command {
        Command::Serve => {
            serve(&config, status_service, action_service).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Status { json } => {
            let report = status_service.collect().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Action { params } => {
            for param in &params {
                // reject typos instead of silently running nothing
                if let Err(err) = ActionRequest::single(action_service.catalog(), param) {
                    eprintln!("houndd: {err}");
                    return Ok(ExitCode::from(2));
                }
            }
            let request = ActionRequest::from_params(
                action_service.catalog(),
                params.iter().map(|param| (param.as_str(), "true")),
            );
            let outcomes = action_service.dispatch(&request).await;
            for outcome in &outcomes {
                print_outcome(outcome);
            }
            if outcomes.iter().any(|outcome| outcome.status.is_failure()) {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

async fn serve(
    config: &Config,
    status_service: StatusService<TokioCommandRunner>,
    action_service: ActionService<TokioCommandRunner>,
) -> Result<(), Box<dyn std::error::Error>> {
    if config.token().is_none() {
        tracing::warn!("no action token configured, restart and edit-lock actions are disabled");
    }
    if config.security.allow_query_actions {
        tracing::warn!("query-string actions are enabled");
    }

    let state = AppState::new(status_service, action_service, config.dashboard_settings());
    let app = hound_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        %bind_addr,
        environment = %config.environment.name,
        script_dir = %config.environment.script_dir.display(),
        "houndd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("houndd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

fn print_report(report: &StatusReport) {
    println!(
        "[hound] {}  {}",
        report.environment.to_uppercase(),
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let width = report
        .rows
        .iter()
        .filter(|row| !row.is_preformatted())
        .map(|row| row.label.len())
        .max()
        .unwrap_or(0);
    for row in report.rows.iter().filter(|row| !row.is_preformatted()) {
        println!("{:<width$}  {}", row.label, row.text);
    }
    for row in report.rows.iter().filter(|row| row.is_preformatted()) {
        println!("\n== {} ==\n{}", row.label, row.text.trim_end());
    }
}

fn print_outcome(outcome: &ActionOutcome) {
    match &outcome.status {
        ActionStatus::Failed { reason } => {
            println!("{}: failed ({reason})", outcome.param);
        }
        status => println!("{}: {} in {}ms", outcome.param, status.label(), outcome.duration_ms),
    }
}
