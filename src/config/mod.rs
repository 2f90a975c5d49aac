mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "top-music.db";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CONTENT_CACHE_AGE_SEC: usize = 60;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

/// CLI arguments that can be used for config resolution.
/// Mirrors the flags that the TOML config can override.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub port: u16,
    pub reset_db: bool,
    pub dataset_path: Option<PathBuf>,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub read_pool_size: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            port: DEFAULT_PORT,
            reset_db: false,
            dataset_path: None,
            logging_level: RequestsLoggingLevel::default(),
            content_cache_age_sec: DEFAULT_CONTENT_CACHE_AGE_SEC,
            read_pool_size: DEFAULT_READ_POOL_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub port: u16,
    /// Clear the store and load the dataset before serving.
    pub reset_db: bool,
    /// `None` means the bundled dataset.
    pub dataset_path: Option<PathBuf>,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub read_pool_size: usize,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.db_path.clone());

        let port = file.port.unwrap_or(cli.port);
        if port == 0 {
            bail!("port must be non-zero");
        }

        let reset_db = file.reset_db.unwrap_or(cli.reset_db);

        let dataset_path = file
            .dataset_path
            .map(PathBuf::from)
            .or_else(|| cli.dataset_path.clone());
        if let Some(path) = &dataset_path {
            if !path.is_file() {
                bail!("Dataset file does not exist: {:?}", path);
            }
        }

        let logging_level = match file.logging_level {
            Some(s) => match parse_logging_level(&s) {
                Some(level) => level,
                None => bail!("Unknown logging_level in config file: {}", s),
            },
            None => cli.logging_level.clone(),
        };

        let content_cache_age_sec = file
            .content_cache_age_sec
            .unwrap_or(cli.content_cache_age_sec);

        let read_pool_size = file.read_pool_size.unwrap_or(cli.read_pool_size);
        if read_pool_size == 0 {
            bail!("read_pool_size must be at least 1");
        }

        Ok(Self {
            db_path,
            port,
            reset_db,
            dataset_path,
            logging_level,
            content_cache_age_sec,
            read_pool_size,
        })
    }
}

fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
