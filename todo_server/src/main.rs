//! Todo server: loads config, opens the SQLite pool, ensures the `todo` table and serves `/v1/todo`.
//!
//! Run from repo root: `cargo run -p todo-server`
//! Config test only: `cargo run -p todo-server -- -t`

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use todo_service::{app, config, connect_pool, ensure_todo_table, AppState, SqliteTodoStore, TodoService};
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(name = "todo-server", version, about = "Todo task HTTP API")]
struct Cli {
    /// Load and validate config, then exit
    #[arg(short = 't', long = "test-config")]
    test_config: bool,

    /// Config file to use instead of files/etc/config/<APP_ENV>/todo-main.json
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("todo_service=info,todo_server=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;
    tracing::info!(env = %config.server.env, "configuration loaded");
    if cli.test_config {
        tracing::info!(?config, "config test passed");
        return Ok(());
    }

    let pool = connect_pool(&config.database.path, config.database.max_connections).await?;
    ensure_todo_table(&pool).await?;
    tracing::info!(path = %config.database.path, "database ready");

    let store = Arc::new(SqliteTodoStore::new(pool.clone()));
    let state = AppState::new(TodoService::new(store), &config);

    let listener = TcpListener::bind(config.socket_addr()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
