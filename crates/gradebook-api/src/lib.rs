//! JSON API for the gradebook.
//!
//! Exposes an axum [`Router`] backed by any
//! [`gradebook_core::store::StudentStore`]. Static pages, CORS and transport
//! concerns are the caller's responsibility.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/students` | Every row, nulls replaced by listing defaults |
//! | `POST` | `/predict`  | Body: six numeric features; never fails once parsed |
//! | `GET`  | `/export`   | `.xlsx` attachment |
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", gradebook_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod export;
pub mod predict;
pub mod students;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use gradebook_core::store::StudentStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: StudentStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/students", get(students::list::<S>))
    .route("/predict", post(predict::handler::<S>))
    .route("/export", get(export::handler::<S>))
    .with_state(store)
}

// ─── Router tests ─────────────────────────────────────────────────────────────
