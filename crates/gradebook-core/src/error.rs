//! Error types for `gradebook-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot fit a model to an empty training set")]
  EmptyTrainingSet,

  #[error("feature rows ({rows}) and targets ({targets}) differ in length")]
  LengthMismatch { rows: usize, targets: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
