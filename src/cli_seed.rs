use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use top_music_api::config::DEFAULT_DB_PATH;
use top_music_api::seed::{self, SeedOptions};
use top_music_api::track_store::SqliteTrackStore;

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

/// Replaces the content of a track database with a JSON dataset.
#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite track database file, created if missing.
    #[clap(env = "DATABASE_PATH", default_value = DEFAULT_DB_PATH, value_parser = parse_path)]
    pub db_path: PathBuf,

    /// JSON dataset to load. The bundled dataset is used when omitted.
    #[clap(long, env = "DATASET_PATH", value_parser = parse_path)]
    pub dataset: Option<PathBuf>,

    /// Store track names, artists and genres as they appear in the dataset
    /// instead of lower-casing them.
    #[clap(long)]
    pub keep_case: bool,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let store = SqliteTrackStore::new(&cli_args.db_path, 1)
        .with_context(|| format!("Could not open track database {:?}", cli_args.db_path))?;
    let records = seed::load_dataset(cli_args.dataset.as_deref())?;
    let options = SeedOptions {
        lowercase_text: !cli_args.keep_case,
    };
    let inserted = seed::reseed(&store, records, &options)?;

    println!("Inserted {} tracks into {:?}", inserted, cli_args.db_path);
    Ok(())
}
