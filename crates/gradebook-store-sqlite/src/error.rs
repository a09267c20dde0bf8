//! Error type for `gradebook-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("row count {0} does not fit in u64")]
  InvalidCount(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
