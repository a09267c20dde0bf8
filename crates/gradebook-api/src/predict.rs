//! `POST /predict` — final-grade estimate for a submitted feature vector.
//!
//! Body: `{"age":17,"study":2,"g1":11,"g2":12,"failures":0,"absences":3}`.
//! Any failure after the body has been parsed as JSON (missing or
//! non-numeric fields, store errors, a degenerate fit) is logged and
//! answered with the fallback grade, never with an error status.

use std::sync::Arc;

use axum::{Json, extract::State};
use gradebook_core::{
  predict::{self, PredictError, Prediction},
  store::StudentStore,
};
use serde_json::Value;

/// `POST /predict`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<Value>,
) -> Json<Prediction>
where
  S: StudentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let estimate = match store.list_students().await {
    Ok(students) => predict::estimate(&students, &body),
    Err(e) => Err(PredictError::Store(Box::new(e))),
  };

  if let Err(e) = &estimate {
    tracing::warn!(error = %e, "prediction failed, answering with fallback grade");
  }

  Json(Prediction::from_estimate(&estimate))
}
