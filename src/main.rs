use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tokendesk::cli::{self, Commands};
use tokendesk::{api, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "tokendesk=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load()?;
    let args = cli::Cli::parse();

    let result = match args.command {
        Some(Commands::Serve { port }) => {
            let port = port.unwrap_or(cfg.port);
            run_server(cfg, port).await
        }
        Some(Commands::Workspace { command }) => {
            cli::handle_workspace_command(command, &AppState::new(cfg), &mut std::io::stdout())
        }
        Some(Commands::Token { command }) => {
            cli::handle_token_command(command, &AppState::new(cfg), &mut std::io::stdout())
        }
        Some(Commands::HashPassword { passwords, cost }) => {
            cli::hash_passwords(&passwords, cost, &mut std::io::stdout())
        }
        None => {
            let port = cfg.port;
            run_server(cfg, port).await
        }
    };

    if let Err(ref e) = result {
        eprintln!("Error: {:?}", e);
    }
    result
}

async fn run_server(cfg: config::Config, port: u16) -> anyhow::Result<()> {
    std::fs::create_dir_all(&cfg.data_dir)
        .with_context(|| format!("creating data dir {}", cfg.data_dir.display()))?;
    tracing::info!(data_dir = %cfg.data_dir.display(), "Using flat-file storage");

    if !cfg.users_path().exists() {
        tracing::warn!(
            "{} does not exist — nobody can log in until it is provisioned",
            cfg.users_path().display()
        );
    }

    let state = Arc::new(AppState::new(cfg));
    let app = api::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("tokendesk listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
