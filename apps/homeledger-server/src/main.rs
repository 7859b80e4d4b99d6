use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ledgerkit::config::AppConfig;
use ledgerkit::logging::init_logging;
use ledgerkit::shutdown::shutdown_signal;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// HomeLedger Server - household asset catalog with insurance advice
#[derive(Parser)]
#[command(name = "homeledger-server")]
#[command(about = "HomeLedger Server - household asset catalog with insurance advice")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (JSON, secrets redacted) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv http trace, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // defaults -> YAML -> env (APP__*) -> CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.port);
    if cli.mock {
        config.database.dsn = "sqlite::memory:".to_owned();
        config.database.max_connections = 1;
    }
    if let Ok(key) = std::env::var(OPENAI_API_KEY_ENV)
        && !key.trim().is_empty()
    {
        config.set_module_default(
            insurance_advisor::module::MODULE_NAME,
            "api_key",
            serde_json::Value::String(key),
        );
    }

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config.redacted()?)?);
        return Ok(());
    }

    let _log_guard = init_logging(&config.logging, cli.verbose)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    let _: assets::AssetsConfig = config.module_config(assets::module::MODULE_NAME)?;
    let _: user_preferences::PreferencesConfig =
        config.module_config(user_preferences::module::MODULE_NAME)?;
    let _: insurance_advisor::AdvisorConfig =
        config.module_config(insurance_advisor::module::MODULE_NAME)?;
    config
        .server
        .bind_addr
        .parse::<std::net::SocketAddr>()
        .with_context(|| format!("invalid server.bind_addr '{}'", config.server.bind_addr))?;
    println!("Configuration is valid");
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "HomeLedger Server starting");

    let db = homeledger_server::connect_database(&config.database).await?;
    homeledger_server::migrate(&db).await?;

    tracing::info!("Initializing modules...");
    let modules = homeledger_server::init_modules(&config, &db).await?;
    let app = homeledger_server::build_app(&config, &modules);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await.context("failed to close database")?;
    tracing::info!("HomeLedger Server stopped");
    Ok(())
}
