//! leadchat CLI and HTTP API entry point.
//!
//! Binary name: `leadchat`
//!
//! Parses CLI arguments, loads configuration, initializes logging, the
//! database and the chat pipeline, then dispatches to the command handler or
//! starts the HTTP server.

mod cli;
mod http;
mod state;

use clap::Parser;

use leadchat_infra::config::load_config;
use leadchat_observe::tracing_setup::{LogLevel, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).await?;

    init_tracing(LogLevel::from_flags(cli.verbose, config.is_debug()), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    tracing::debug!(environment = %config.environment, "Configuration loaded");

    let state = AppState::init(&config).await?;

    let result = match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            serve(state, &host, port).await
        }
        Commands::Ask { message, session } => {
            cli::chat::ask(&state, &session, &message, cli.json).await
        }
        Commands::History { session } => cli::session::history(&state, &session, cli.json).await,
        Commands::Leads { session } => cli::session::leads(&state, &session, cli.json).await,
    };

    shutdown_tracing();
    result
}

async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} leadchat listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
