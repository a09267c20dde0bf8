//! `GET /export` — the student table as an `.xlsx` workbook.
//!
//! The sheet is assembled as a plain [`ExportTable`] first and rendered with
//! `rust_xlsxwriter` last, so its contents can be checked without parsing a
//! workbook.
//!
//! The export applies its own null defaults, which differ from the listing:
//! counts and grades become `0`, and every other missing attribute is left
//! as an empty cell.

use std::sync::Arc;

use axum::{
  extract::State,
  http::header,
  response::{IntoResponse, Response},
};
use chrono::{Local, NaiveDate};
use gradebook_core::{store::StudentStore, student::Student};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatPattern, Workbook, XlsxError};

use crate::error::ApiError;

pub const XLSX_CONTENT_TYPE: &str =
  "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const SHEET_NAME: &str = "Student Data";

pub const HEADERS: [&str; COLUMNS] = [
  "ID",
  "School",
  "Gender",
  "Age",
  "Study Time",
  "Failures",
  "Absences",
  "G1",
  "G2",
  "G3",
];

const COLUMNS: usize = 10;
const HEADER_FILL: u32 = 0x2563EB;
const WIDTH_PADDING: usize = 2;
const MAX_WIDTH: usize = 30;

/// Width an empty cell contributes when sizing its column, as if it held
/// the text `None`.
const EMPTY_CELL_LEN: usize = 4;

/// A single data cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
  Empty,
  Text(String),
  Number(i64),
}

impl Cell {
  fn text(value: &Option<String>) -> Self {
    value.clone().map_or(Cell::Empty, Cell::Text)
  }

  fn number(value: Option<i64>) -> Self { value.map_or(Cell::Empty, Cell::Number) }

  fn display_len(&self) -> usize {
    match self {
      Cell::Empty => EMPTY_CELL_LEN,
      Cell::Text(s) => s.chars().count(),
      Cell::Number(n) => n.to_string().len(),
    }
  }
}

pub type Row = [Cell; COLUMNS];

/// One export row, with the export's own null defaults.
pub fn export_row(student: &Student) -> Row {
  [
    Cell::Number(student.id),
    Cell::text(&student.school),
    Cell::text(&student.gender),
    Cell::number(student.age),
    Cell::text(&student.study),
    Cell::Number(student.failures.unwrap_or(0)),
    Cell::Number(student.absences.unwrap_or(0)),
    Cell::Number(student.g1.unwrap_or(0)),
    Cell::Number(student.g2.unwrap_or(0)),
    Cell::Number(student.g3.unwrap_or(0)),
  ]
}

/// The sheet contents before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
  pub rows: Vec<Row>,
}

impl ExportTable {
  pub fn from_students(students: &[Student]) -> Self {
    Self { rows: students.iter().map(export_row).collect() }
  }

  /// Width of each column: longest text (header included) plus padding,
  /// capped at [`MAX_WIDTH`].
  pub fn column_widths(&self) -> [usize; COLUMNS] {
    std::array::from_fn(|col| {
      let longest = self
        .rows
        .iter()
        .map(|row| row[col].display_len())
        .chain(std::iter::once(HEADERS[col].chars().count()))
        .max()
        .unwrap_or(0);
      (longest + WIDTH_PADDING).min(MAX_WIDTH)
    })
  }

  pub fn to_xlsx(&self) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header_format = Format::new()
      .set_bold()
      .set_font_color(Color::White)
      .set_background_color(Color::RGB(HEADER_FILL))
      .set_pattern(FormatPattern::Solid)
      .set_align(FormatAlign::Center);

    for (col, title) in HEADERS.iter().enumerate() {
      sheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }

    for (i, row) in self.rows.iter().enumerate() {
      let r = i as u32 + 1;
      for (col, cell) in row.iter().enumerate() {
        let c = col as u16;
        match cell {
          Cell::Empty => {}
          Cell::Text(s) => {
            sheet.write_string(r, c, s)?;
          }
          Cell::Number(n) => {
            sheet.write_number(r, c, *n as f64)?;
          }
        }
      }
    }

    for (col, width) in self.column_widths().into_iter().enumerate() {
      sheet.set_column_width(col as u16, width as f64)?;
    }

    workbook.save_to_buffer()
  }
}

/// `student_performance_<YYYYMMDD>.xlsx`
pub fn export_filename(date: NaiveDate) -> String {
  format!("student_performance_{}.xlsx", date.format("%Y%m%d"))
}

/// `GET /export`
pub async fn handler<S>(State(store): State<Arc<S>>) -> Result<Response, ApiError>
where
  S: StudentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let students = store
    .list_students()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let bytes = ExportTable::from_students(&students).to_xlsx()?;
  let filename = export_filename(Local::now().date_naive());
  tracing::info!(rows = students.len(), %filename, "exported students");

  Ok(
    (
      [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_owned()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename={filename}")),
      ],
      bytes,
    )
      .into_response(),
  )
}

#[cfg(test)]
mod tests {
  use gradebook_core::student::NewStudent;

  use super::*;

  fn blank(id: i64) -> Student { Student::from_new(id, NewStudent::default()) }

  #[test]
  fn nulls_use_export_defaults() {
    let row = export_row(&blank(4));
    assert_eq!(row, [
      Cell::Number(4),
      Cell::Empty,
      Cell::Empty,
      Cell::Empty,
      Cell::Empty,
      Cell::Number(0),
      Cell::Number(0),
      Cell::Number(0),
      Cell::Number(0),
      Cell::Number(0),
    ]);
  }

  #[test]
  fn export_and_listing_defaults_diverge() {
    let student = blank(1);
    assert_eq!(student.listing().g1, 10);
    assert_eq!(export_row(&student)[7], Cell::Number(0));
  }

  #[test]
  fn widths_cover_headers_when_table_is_empty() {
    let widths = ExportTable::from_students(&[]).column_widths();
    assert_eq!(widths, [4, 8, 8, 5, 12, 10, 10, 4, 4, 4]);
  }

  #[test]
  fn widths_follow_longest_value_and_are_capped() {
    let student = Student::from_new(123456, NewStudent {
      school: Some("A".repeat(40)),
      study: Some("5-10 hours per week".into()),
      ..NewStudent::default()
    });
    let widths = ExportTable::from_students(&[student]).column_widths();
    assert_eq!(widths[0], 8);
    assert_eq!(widths[1], 30);
    assert_eq!(widths[4], 21);
  }

  #[test]
  fn empty_cells_count_toward_width() {
    // "Age" is 3 wide; an empty age cell counts as 4.
    let widths = ExportTable::from_students(&[blank(1)]).column_widths();
    assert_eq!(widths[3], 6);
    assert_eq!(widths[2], 8);
  }

  #[test]
  fn renders_a_zip_container() {
    let table = ExportTable::from_students(&[blank(1), blank(2)]);
    let bytes = table.to_xlsx().unwrap();
    assert!(bytes.starts_with(b"PK"), "not a zip archive");
  }

  #[test]
  fn filename_embeds_the_date() {
    let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
    assert_eq!(export_filename(date), "student_performance_20250309.xlsx");
  }
}
