//! org-health server binary.
//!
//! Loads configuration, mounts the cycle scope and serves the cycle API until
//! interrupted.

use std::net::SocketAddr;
use std::process::ExitCode;
use std::time::Duration;

use org_health::adapters::http::{app_router, CycleAppState};
use org_health::application::cycle::{cycle_context, CycleScope};
use org_health::{bootstrap, config::AppConfig, telemetry};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = telemetry::init(&config.server) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let components = bootstrap::build(&config)?;
    let addr = config.server.socket_addr()?;

    let scope = CycleScope::mount(components.controller);
    let identity = components.identity;
    let timeout = Duration::from_secs(config.server.request_timeout_secs);

    let served = scope
        .provide(async move {
            let state = CycleAppState::new(cycle_context(), identity);
            serve(addr, state, timeout).await
        })
        .await;

    scope.unmount();
    tracing::info!("Cycle scope unmounted");

    served.map_err(Into::into)
}

async fn serve(
    addr: SocketAddr,
    state: CycleAppState,
    timeout: Duration,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Serving cycle API on {}", addr);
    axum::serve(listener, app_router(state, timeout))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
