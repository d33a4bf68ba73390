//! Secret message service entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use secret_message::api::{create_router, AppState, COLLECTION_PATH, ITEM_PATH};
use secret_message::config::Config;
use secret_message::metrics;
use secret_message::store::{MemoryMessageStore, MessageStore, PgMessageStore};
use secret_message::utils::shutdown_signal;

/// Secret message HTTP service.
#[derive(Parser, Debug)]
#[command(name = "secret-message")]
#[command(about = "Stores and serves secret messages over HTTP")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP port.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Keep messages in memory instead of Postgres.
    #[arg(long)]
    in_memory: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP port.
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Keep messages in memory instead of Postgres.
        #[arg(long)]
        in_memory: bool,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Create the secret_message table if it does not exist.
    InitDb,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments, reading .env first so clap sees PORT from it
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("secret_message=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::InitDb) => cmd_init_db().await,
        Some(Command::Serve { port, in_memory }) => cmd_serve(port, in_memory).await,
        None => cmd_serve(args.port, args.in_memory).await,
    }
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("SECRET MESSAGE SERVICE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Database: {}@{}:{}/{}", config.db_user, config.db_host, config.db_port, config.db_name);
    println!("  Password: {}", if config.db_pass.is_empty() { "not set" } else { "present" });
    println!("  Pool Size: {}", config.db_max_connections);
    println!("  Acquire Timeout: {}s", config.db_acquire_timeout_secs);
    println!("  Port: {}", config.port);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Create the backing table.
async fn cmd_init_db() -> anyhow::Result<()> {
    let config = load_config()?;

    let store = PgMessageStore::connect(&config).await?;
    store.ensure_schema().await?;
    store.close().await;

    info!("Database initialized");
    Ok(())
}

/// Run the HTTP server.
async fn cmd_serve(port_override: Option<u16>, in_memory: bool) -> anyhow::Result<()> {
    let metrics_handle = metrics::init_metrics()?;

    let (store, port): (Arc<dyn MessageStore>, u16) = if in_memory {
        warn!("Using in-memory store; messages are lost on exit");
        let port = match Config::load() {
            Ok(config) => config.port,
            Err(e) => {
                warn!("Could not load configuration, using port 3000: {}", e);
                3000
            }
        };
        let store: Arc<dyn MessageStore> = Arc::new(MemoryMessageStore::new());
        (store, port)
    } else {
        let config = load_config()?;
        let store = PgMessageStore::connect(&config).await.map_err(|e| {
            error!("Failed to connect to database: {}", e);
            e
        })?;
        let store: Arc<dyn MessageStore> = Arc::new(store);
        (store, config.port)
    };
    let port = port_override.unwrap_or(port);

    let router = create_router(AppState::new(store, metrics_handle));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{} ...", addr);
    info!("Collection endpoint: {}", COLLECTION_PATH);
    info!("Item endpoint: {}?id=<id>", ITEM_PATH);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn load_config() -> anyhow::Result<Config> {
    info!("Loading configuration...");
    Config::load_validated().map_err(|e| {
        error!("{}", e);
        e.into()
    })
}
