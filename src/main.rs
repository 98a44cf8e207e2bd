mod config;
mod db;
mod graphql;
mod models;
mod seed;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::StorageBackend;
use crate::db::Store;
use crate::graphql::QueryLimits;

/// GraphQL API for tracking clients and their projects
#[derive(Parser, Debug)]
#[command(name = "project-tracker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Port to listen on (overrides PORT)
    #[arg(short = 'p', long = "port", value_name = "PORT", global = true)]
    port: Option<u16>,

    /// Keep all data in memory instead of Postgres
    #[arg(long = "memory", global = true)]
    memory: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the API server (default if no command specified)
    Serve {
        /// Insert sample data before serving
        #[arg(long)]
        seed: bool,
    },

    /// Insert sample clients and projects
    Seed,

    /// Print the GraphQL schema (SDL) and exit
    Schema,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env early so RUST_LOG from it applies
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve { seed: false }) {
        Commands::Schema => {
            print!("{}", graphql::sdl());
            Ok(())
        }
        Commands::Seed => {
            let config = config::init(cli.port, cli.memory)?;
            if config.storage == StorageBackend::Memory {
                warn!("seeding an in-memory store; the data is dropped on exit");
            }

            let store = db::init(&config).await?;
            let result = seed::seed(store.as_ref()).await;
            store.close().await;
            result.map(|_| ())
        }
        Commands::Serve { seed: with_samples } => {
            let config = config::init(cli.port, cli.memory)?;
            let store = db::init(&config).await?;
            info!(storage = ?config.storage, "store initialized");

            if with_samples {
                seed::seed(store.as_ref()).await?;
            }

            let result = serve(&config, store.clone()).await;
            store.close().await;

            if let Err(err) = &result {
                error!(error = ?err, "server stopped with an error");
            }
            result
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,project_tracker=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn serve(config: &config::Config, store: Arc<dyn Store>) -> Result<()> {
    let schema = graphql::create_schema(store, QueryLimits::from(config));
    let app = graphql::create_router(schema, config.graphiql);

    let listener = TcpListener::bind(config.bind_address()).await?;
    let address = listener.local_addr()?;
    info!(graphiql = config.graphiql, "listening on http://{}/graphql", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
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

    info!("shutdown signal received");
}
