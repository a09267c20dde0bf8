//! `GET /students` — the full table, one flat object per row.

use std::sync::Arc;

use axum::{Json, extract::State};
use gradebook_core::{store::StudentStore, student::StudentListing};

use crate::error::ApiError;

/// `GET /students`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<StudentListing>>, ApiError>
where
  S: StudentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let students = store
    .list_students()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(students.iter().map(|s| s.listing()).collect()))
}
