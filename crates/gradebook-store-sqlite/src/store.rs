//! [`SqliteStore`] — the SQLite implementation of [`StudentStore`].

use std::path::Path;

use gradebook_core::{
  store::StudentStore,
  student::{NewStudent, Student},
};

use crate::{Error, Result, schema::SCHEMA};

const SELECT_STUDENTS: &str = "
SELECT id, school, gender, age, study, failures, absences, g1, g2, g3
  FROM students
 ORDER BY id";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A student store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn student_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Student> {
  Ok(Student {
    id:       row.get(0)?,
    school:   row.get(1)?,
    gender:   row.get(2)?,
    age:      row.get(3)?,
    study:    row.get(4)?,
    failures: row.get(5)?,
    absences: row.get(6)?,
    g1:       row.get(7)?,
    g2:       row.get(8)?,
    g3:       row.get(9)?,
  })
}

// ─── StudentStore impl ───────────────────────────────────────────────────────

impl StudentStore for SqliteStore {
  type Error = Error;

  async fn list_students(&self) -> Result<Vec<Student>> {
    let students = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(SELECT_STUDENTS)?;
        let rows = stmt
          .query_map([], student_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    tracing::debug!(count = students.len(), "loaded students");
    Ok(students)
  }

  async fn count_students(&self) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM students", [], |r| r.get(0))?)
      })
      .await?;
    u64::try_from(count).map_err(|_| Error::InvalidCount(count))
  }

  async fn insert_student(&self, student: NewStudent) -> Result<Student> {
    let row = student.clone();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO students (
             school, gender, age, study, failures, absences, g1, g2, g3
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            row.school,
            row.gender,
            row.age,
            row.study,
            row.failures,
            row.absences,
            row.g1,
            row.g2,
            row.g3,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Student::from_new(id, student))
  }
}
