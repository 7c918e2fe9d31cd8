use anyhow::Context;
use clap::{Parser, Subcommand};
use estate_config::{load as load_config, AppConfig};
use estate_gateway::{create_router, GatewayState};
use estate_runtime::{telemetry, BackendServices};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "estate-backend")]
#[command(about = "Estate listing backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;
    let config = load_config().context("failed to load configuration")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(config).await,
        Commands::Migrate => run_migrations(config).await,
    }
}

async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    config.validate().context("invalid configuration")?;
    info!("starting estate backend");

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let state = GatewayState::new(
        services.db_pool.clone(),
        services.tokens,
        services.hasher,
        &config,
    );
    let app = create_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(estate_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    services.db_pool.close().await;
    info!("backend shut down");
    Ok(())
}

async fn run_migrations(config: AppConfig) -> anyhow::Result<()> {
    info!(url = %config.database.url, "running database migrations");
    estate_runtime::migrate(&config)
        .await
        .context("failed to migrate database")
}
