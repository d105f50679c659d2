//! CLI command implementations
//!
//! `serve` follows a fixed startup sequence:
//! 1. Load `.env` and resolve configuration
//! 2. Initialize logging
//! 3. Open the store (PostgreSQL pool, or a JSON fixture)
//! 4. Bind and serve until Ctrl-C

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::catalog::{CatalogService, GameRecord, GameStore, InMemoryGameStore, PgGameStore};
use crate::http_server::{ConfigError, HttpServer, HttpServerConfig};
use crate::observability::{self, log_event, log_event_with_fields, Event};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a parsed command
pub fn run_command(cmd: Command) -> CliResult<()> {
    // A missing .env is normal outside development
    dotenvy::dotenv().ok();

    match cmd {
        Command::Serve {
            config,
            port,
            fixture,
        } => serve(config.as_deref(), port, fixture.as_deref()),
        Command::CheckConfig { config } => check_config(config.as_deref()),
    }
}

/// Resolve configuration: defaults, then `config_path`, then `lookup`
/// (environment), then the `--port` flag.
pub fn resolve_config<F>(
    config_path: Option<&Path>,
    port: Option<u16>,
    lookup: F,
) -> CliResult<HttpServerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match config_path {
        Some(path) => HttpServerConfig::load(path)?,
        None => HttpServerConfig::default(),
    };
    config.apply_env(lookup)?;
    if let Some(port) = port {
        config.port = port;
    }
    config.validate()?;
    Ok(config)
}

/// Read a JSON array of game records
pub fn load_fixture(path: &Path) -> CliResult<Vec<GameRecord>> {
    let fixture_error = |reason: String| CliError::Fixture {
        path: path.display().to_string(),
        reason,
    };
    let content = fs::read_to_string(path).map_err(|e| fixture_error(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| fixture_error(e.to_string()))
}

/// Execute the serve command
pub fn serve(config_path: Option<&Path>, port: Option<u16>, fixture: Option<&Path>) -> CliResult<()> {
    let config = resolve_config(config_path, port, |key| std::env::var(key).ok())?;
    observability::init(config.log_format);
    log_event(Event::BootStart);
    log_config(&config);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(open_store_and_serve(config, fixture))
}

async fn open_store_and_serve(config: HttpServerConfig, fixture: Option<&Path>) -> CliResult<()> {
    match fixture {
        Some(path) => {
            let games = load_fixture(path)?;
            let count = games.len().to_string();
            let path = path.display().to_string();
            log_event_with_fields(
                Event::FixtureLoaded,
                &[("path", path.as_str()), ("games", count.as_str())],
            );
            run_server(config, InMemoryGameStore::new(games)).await
        }
        None => {
            let url = config
                .database_url
                .clone()
                .ok_or(CliError::MissingDatabaseUrl)?;
            let store =
                PgGameStore::connect(&url, config.max_connections, config.query_timeout()).await?;
            let pool_size = config.max_connections.to_string();
            log_event_with_fields(Event::StoreConnected, &[("max_connections", pool_size.as_str())]);
            run_server(config, store).await
        }
    }
}

async fn run_server<S: GameStore + 'static>(config: HttpServerConfig, store: S) -> CliResult<()> {
    let service = CatalogService::with_deadline(Arc::new(store), config.query_timeout());
    HttpServer::new(config, service).start().await?;
    Ok(())
}

/// Execute the check-config command
pub fn check_config(config_path: Option<&Path>) -> CliResult<()> {
    let config = resolve_config(config_path, None, |key| std::env::var(key).ok())?;
    let mut display = config.clone();
    display.database_url = config.redacted_database_url();

    let json = serde_json::to_string_pretty(&display).map_err(ConfigError::from)?;
    println!("{}", json);
    Ok(())
}

fn log_config(config: &HttpServerConfig) {
    let addr = config.socket_addr();
    let timeout = config.query_timeout_ms.to_string();
    let origins = if config.cors_origins.is_empty() {
        "*".to_string()
    } else {
        config.cors_origins.join(",")
    };
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("addr", addr.as_str()),
            ("query_timeout_ms", timeout.as_str()),
            ("cors_origins", origins.as_str()),
        ],
    );
}
