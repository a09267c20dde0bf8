//! Final-grade prediction.
//!
//! With more than [`FORMULA_MAX_RECORDS`] stored students a fresh
//! [`LinearModel`] is fitted on every call; otherwise a fixed formula is
//! evaluated. Nothing is cached between calls.
//!
//! [`estimate`] reports every failure as a [`PredictError`]. Callers that
//! must always answer substitute [`FALLBACK_GRADE`] via
//! [`Prediction::from_estimate`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{
  regression::LinearModel,
  student::{Features, Student},
};

pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 20.0;

/// Grade reported when the prediction cannot be computed.
pub const FALLBACK_GRADE: f64 = 12.5;

/// Up to this many stored records, the fixed formula is used.
pub const FORMULA_MAX_RECORDS: usize = 5;

#[derive(Debug, Error)]
pub enum PredictError {
  #[error("request body is not a JSON object")]
  NotAnObject,

  #[error("missing field {0:?}")]
  MissingField(&'static str),

  #[error("field {0:?} is not a number")]
  NotANumber(&'static str),

  #[error("model fit failed: {0}")]
  Model(#[from] crate::Error),

  #[error("could not read students: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("prediction is not a number")]
  NotANumberResult,
}

/// The submitted feature vector. `study` is already encoded as 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictInput {
  pub age:      f64,
  pub study:    f64,
  pub g1:       f64,
  pub g2:       f64,
  pub failures: f64,
  pub absences: f64,
}

impl PredictInput {
  /// Pull every field out of a JSON object. Any JSON number is accepted,
  /// and booleans count as `1` / `0`.
  pub fn from_json(body: &Value) -> Result<Self, PredictError> {
    let object = body.as_object().ok_or(PredictError::NotAnObject)?;
    let field = |name: &'static str| -> Result<f64, PredictError> {
      match object.get(name).ok_or(PredictError::MissingField(name))? {
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        value => value.as_f64().ok_or(PredictError::NotANumber(name)),
      }
    };

    Ok(Self {
      age:      field("age")?,
      study:    field("study")?,
      g1:       field("g1")?,
      g2:       field("g2")?,
      failures: field("failures")?,
      absences: field("absences")?,
    })
  }

  pub fn features(&self) -> Features {
    [self.age, self.study, self.g1, self.g2, self.failures, self.absences]
  }

  /// The fixed formula used when too few records exist to fit a model.
  pub fn formula(&self) -> f64 {
    self.g1 * 0.3 + self.g2 * 0.3 + self.study * 1.0 + 10.0
      - self.failures * 1.5
      - self.absences * 0.2
  }
}

/// Estimate a final grade for `body` against the stored `students`.
pub fn estimate(students: &[Student], body: &Value) -> Result<f64, PredictError> {
  let input = PredictInput::from_json(body)?;

  let grade = if students.len() > FORMULA_MAX_RECORDS {
    let x: Vec<Features> = students.iter().map(Student::features).collect();
    let y: Vec<f64> = students.iter().map(Student::target).collect();
    LinearModel::fit(&x, &y)?.predict(&input.features())
  } else {
    round_tenth(input.formula())
  };

  // Overflow to ±inf clamps like any other out-of-range grade.
  if grade.is_nan() {
    return Err(PredictError::NotANumberResult);
  }
  Ok(grade.clamp(MIN_GRADE, MAX_GRADE))
}

/// Coarse performance band for a grade out of 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
  Excellent,
  Good,
  Average,
}

impl Status {
  pub fn from_grade(grade: f64) -> Self {
    if grade >= 15.0 {
      Status::Excellent
    } else if grade >= 10.0 {
      Status::Good
    } else {
      Status::Average
    }
  }
}

/// Response body of `POST /api/predict`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
  pub predicted_grade: f64,
  pub status:          Status,
}

impl Prediction {
  /// The status band is taken from `grade` itself; only the reported number
  /// is rounded to one decimal.
  pub fn from_grade(grade: f64) -> Self {
    Self { predicted_grade: round_tenth(grade), status: Status::from_grade(grade) }
  }

  pub fn from_estimate(estimate: &Result<f64, PredictError>) -> Self {
    match estimate {
      Ok(grade) => Self::from_grade(*grade),
      Err(_) => Self::from_grade(FALLBACK_GRADE),
    }
  }
}

/// Round half away from zero to one decimal place.
pub fn round_tenth(value: f64) -> f64 { (value * 10.0).round() / 10.0 }
