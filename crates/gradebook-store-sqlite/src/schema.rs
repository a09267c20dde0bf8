//! SQL schema for the gradebook SQLite store.

/// Table DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Every attribute column is nullable. Readers substitute defaults for
/// `NULL` (see `gradebook_core::student`).
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS students (
    id        INTEGER PRIMARY KEY,
    school    TEXT,              -- short school code, e.g. 'GP'
    gender    TEXT,              -- 'M' | 'F'
    age       INTEGER,
    study     TEXT,              -- study-time bucket, e.g. '2-5h'
    failures  INTEGER,
    absences  INTEGER,
    g1        INTEGER,
    g2        INTEGER,
    g3        INTEGER
);
";
