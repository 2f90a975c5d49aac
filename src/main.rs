use anyhow::Result;
use clap::{builder::FalseyValueParser, Parser};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use top_music_api::config::{
    self, AppConfig, DEFAULT_CONTENT_CACHE_AGE_SEC, DEFAULT_DB_PATH, DEFAULT_PORT,
    DEFAULT_READ_POOL_SIZE,
};
use top_music_api::seed::{self, SeedOptions};
use top_music_api::server::{run_server, RequestsLoggingLevel, ServerConfig, StoreSlot};
use top_music_api::track_store::{SqliteTrackStore, TrackStore};

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(path_buf))
}

#[derive(Parser, Debug)]
#[command(version)]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite track database file, created if missing.
    #[clap(long, env = "DATABASE_PATH", default_value = DEFAULT_DB_PATH, value_parser = parse_path)]
    pub db_path: PathBuf,

    /// The port to listen on.
    #[clap(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Clear the database and load the dataset before serving. From the
    /// environment, any value except an empty string, `0`, `false`, `no`,
    /// `off` or `n` enables it.
    #[clap(long, env = "RESET_DB", value_parser = FalseyValueParser::new())]
    pub reset_db: bool,

    /// JSON dataset loaded on reset. The bundled dataset is used when omitted.
    #[clap(long, env = "DATASET_PATH", value_parser = parse_path)]
    pub dataset_path: Option<PathBuf>,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// The maximum age of listing responses in the cache in seconds.
    #[clap(long, default_value_t = DEFAULT_CONTENT_CACHE_AGE_SEC)]
    pub content_cache_age_sec: usize,

    /// Number of read-only database connections.
    #[clap(long, default_value_t = DEFAULT_READ_POOL_SIZE)]
    pub read_pool_size: usize,
}

impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            db_path: args.db_path.clone(),
            port: args.port,
            reset_db: args.reset_db,
            dataset_path: args.dataset_path.clone(),
            logging_level: args.logging_level.clone(),
            content_cache_age_sec: args.content_cache_age_sec,
            read_pool_size: args.read_pool_size,
        }
    }
}

/// Opens the store and, when asked to, replaces its content with the dataset.
fn open_track_store(config: &AppConfig) -> Result<Arc<dyn TrackStore>> {
    info!("Opening SQLite track database at {:?}...", config.db_path);
    let store = SqliteTrackStore::new(&config.db_path, config.read_pool_size)?;

    if config.reset_db {
        info!("Resetting track database");
        let records = seed::load_dataset(config.dataset_path.as_deref())?;
        seed::reseed(&store, records, &SeedOptions::default())?;
    }

    Ok(Arc::new(store))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    info!(
        "Starting top-music-server {}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH")
    );

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  db_path: {:?}", app_config.db_path);
    info!("  port: {}", app_config.port);
    info!("  reset_db: {}", app_config.reset_db);
    info!("  logging_level: {}", app_config.logging_level);

    // The listener comes up first and answers 503 until the slot is filled.
    let store_slot = StoreSlot::new();
    let loader_slot = store_slot.clone();
    let loader_config = app_config.clone();
    tokio::task::spawn_blocking(move || match open_track_store(&loader_config) {
        Ok(store) => {
            if loader_slot.fill(store) {
                info!("Track store ready");
            }
        }
        Err(err) => error!(
            "Failed to open track store, requests will keep failing: {:#}",
            err
        ),
    });

    let server_config = ServerConfig {
        requests_logging_level: app_config.logging_level,
        port: app_config.port,
        content_cache_age_sec: app_config.content_cache_age_sec,
    };

    run_server(server_config, store_slot).await
}
