//! Bulk import of student rows from CSV.
//!
//! Expected header: `school,gender,age,study,failures,absences,g1,g2,g3`.
//! Columns may appear in any order, unknown columns are ignored, and an
//! empty or absent field is stored as `NULL`.

use std::io::Read;

use gradebook_core::{store::StudentStore, student::NewStudent};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
  #[error("csv error on record {record}: {source}")]
  Csv {
    record: usize,
    #[source]
    source: csv::Error,
  },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Parse every row of `reader` before touching the store, so a malformed
/// file inserts nothing.
pub fn read_students<R: Read>(reader: R) -> Result<Vec<NewStudent>, ImportError> {
  let mut rdr = csv::ReaderBuilder::new()
    .trim(csv::Trim::All)
    .from_reader(reader);

  rdr
    .deserialize::<NewStudent>()
    .enumerate()
    .map(|(i, result)| {
      result.map_err(|source| ImportError::Csv { record: i + 1, source })
    })
    .collect()
}

/// Insert every row of `reader` into `store`. Returns the number of rows.
pub async fn import_students<S, R>(store: &S, reader: R) -> Result<usize, ImportError>
where
  S: StudentStore,
  R: Read,
{
  let rows = read_students(reader)?;
  let count = rows.len();
  for row in rows {
    store
      .insert_student(row)
      .await
      .map_err(|e| ImportError::Store(Box::new(e)))?;
  }
  tracing::info!(count, "imported students");
  Ok(count)
}

#[cfg(test)]
mod tests {
  use gradebook_store_sqlite::SqliteStore;

  use super::*;

  const CSV: &str = "\
school,gender,age,study,failures,absences,g1,g2,g3
GP,F,18,2-5h,0,6,5,6,6
MS, M ,17,,1,,12,13,
";

  #[test]
  fn empty_fields_become_none() {
    let rows = read_students(CSV.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], NewStudent {
      school:   Some("GP".into()),
      gender:   Some("F".into()),
      age:      Some(18),
      study:    Some("2-5h".into()),
      failures: Some(0),
      absences: Some(6),
      g1:       Some(5),
      g2:       Some(6),
      g3:       Some(6),
    });
    assert_eq!(rows[1].gender.as_deref(), Some("M"));
    assert_eq!(rows[1].study, None);
    assert_eq!(rows[1].absences, None);
    assert_eq!(rows[1].g3, None);
  }

  #[test]
  fn missing_and_extra_columns_are_tolerated() {
    let rows = read_students("id,g1,notes\n1,14,keen\n".as_bytes()).unwrap();
    assert_eq!(rows, vec![NewStudent { g1: Some(14), ..NewStudent::default() }]);
  }

  #[test]
  fn non_numeric_grade_is_rejected() {
    let err = read_students("g1\nten\n".as_bytes()).unwrap_err();
    assert!(matches!(err, ImportError::Csv { record: 1, .. }), "{err}");
  }

  #[tokio::test]
  async fn import_inserts_rows() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let count = import_students(&store, CSV.as_bytes()).await.unwrap();
    assert_eq!(count, 2);
    assert_eq!(store.count_students().await.unwrap(), 2);
  }

  #[tokio::test]
  async fn malformed_file_inserts_nothing() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let csv = "g1\n12\nbad\n";
    assert!(import_students(&store, csv.as_bytes()).await.is_err());
    assert_eq!(store.count_students().await.unwrap(), 0);
  }
}
