//! HTTP front for the gradebook.
//!
//! Serves the dashboard page at `/`, its assets under `/static`, and nests
//! the [`gradebook_api`] router under `/api`. Every response passes through
//! a permissive CORS layer and a request tracing layer.

pub mod import;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, response::Html, routing::get};
use gradebook_core::store::StudentStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// The dashboard page, embedded at build time.
pub const INDEX_HTML: &str = include_str!("../static/index.html");

/// Where the dashboard assets live unless `static_dir` is configured.
pub const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `GRADEBOOK_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub database_path: PathBuf,
  pub static_dir:    PathBuf,
}

impl ServerConfig {
  /// Layer the defaults below `file` (optional) and the environment.
  pub fn load(file: PathBuf) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 5000_i64)?
      .set_default("database_path", "students.db")?
      .set_default("static_dir", DEFAULT_STATIC_DIR)?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("GRADEBOOK").try_parsing(true))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the top-level router for `store`.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: StudentStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/", get(index))
    .nest("/api", gradebook_api::api_router(store))
    .nest_service("/static", ServeDir::new(&config.static_dir))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

async fn index() -> Html<&'static str> { Html(INDEX_HTML) }

// ─── Integration tests ────────────────────────────────────────────────────────
