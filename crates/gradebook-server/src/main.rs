//! gradebook server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite student store, and serves the dashboard and JSON API over HTTP.
//!
//! # Loading data
//!
//! The HTTP surface is read-only. To fill the store from a CSV file:
//!
//! ```
//! cargo run -p gradebook-server -- --import students.csv
//! ```

use std::{
  fs::File,
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use gradebook_core::store::StudentStore;
use gradebook_server::{ServerConfig, import::import_students};
use gradebook_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Student performance dashboard server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Load student rows from a CSV file into the store and exit.
  #[arg(long, value_name = "CSV")]
  import: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut server_cfg =
    ServerConfig::load(cli.config).context("failed to load configuration")?;
  server_cfg.database_path = expand_tilde(&server_cfg.database_path);
  server_cfg.static_dir = expand_tilde(&server_cfg.static_dir);

  let store = SqliteStore::open(&server_cfg.database_path)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", server_cfg.database_path)
    })?;

  // Helper mode: import a CSV and exit.
  if let Some(path) = cli.import {
    let file =
      File::open(&path).with_context(|| format!("failed to open {path:?}"))?;
    import_students(&store, file)
      .await
      .with_context(|| format!("failed to import {path:?}"))?;
    return Ok(());
  }

  let count = store
    .count_students()
    .await
    .context("failed to count students")?;
  tracing::info!(
    path = ?server_cfg.database_path,
    "Found {count} students in 'students' table"
  );

  let app = gradebook_server::router(Arc::new(store), &server_cfg);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
