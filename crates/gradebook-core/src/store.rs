//! The `StudentStore` trait.
//!
//! Implemented by storage backends (e.g. `gradebook-store-sqlite`). The API
//! and server crates depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::student::{NewStudent, Student};

/// Abstraction over a student record store.
///
/// The HTTP surface only ever reads; inserts exist for bulk import and
/// tests. All methods return `Send` futures so the trait can be used from
/// axum handlers on a multi-threaded runtime.
pub trait StudentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every stored student, ordered by id.
  fn list_students(
    &self,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + '_;

  fn count_students(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Persist a new row and return it with its store-assigned id.
  fn insert_student(
    &self,
    student: NewStudent,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;
}
