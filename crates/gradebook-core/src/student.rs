//! Student records and the null-substitution rules applied when reading them.
//!
//! Every attribute except the id is nullable in storage. The listing and
//! prediction paths treat `NULL`, `0` and the empty string alike as missing
//! and substitute the defaults below, so a stored `g3 = 0` is listed and
//! trained on as `10`. The spreadsheet export applies its own defaults (see
//! `gradebook-api::export`).

use serde::{Deserialize, Serialize};

use crate::study::{DEFAULT_STUDY_LABEL, StudyTime};

pub const DEFAULT_CODE: &str = "-";
pub const DEFAULT_AGE: i64 = 16;
pub const DEFAULT_COUNT: i64 = 0;
pub const DEFAULT_GRADE: i64 = 10;

/// Number of model features per student.
pub const FEATURE_COUNT: usize = 6;

/// Model input in column order `age, study, g1, g2, failures, absences`.
pub type Features = [f64; FEATURE_COUNT];

/// A stored student row, exactly as the store returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
  pub id:       i64,
  pub school:   Option<String>,
  pub gender:   Option<String>,
  pub age:      Option<i64>,
  pub study:    Option<String>,
  pub failures: Option<i64>,
  pub absences: Option<i64>,
  pub g1:       Option<i64>,
  pub g2:       Option<i64>,
  pub g3:       Option<i64>,
}

/// A student row that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
  pub school:   Option<String>,
  pub gender:   Option<String>,
  pub age:      Option<i64>,
  pub study:    Option<String>,
  pub failures: Option<i64>,
  pub absences: Option<i64>,
  pub g1:       Option<i64>,
  pub g2:       Option<i64>,
  pub g3:       Option<i64>,
}

/// The flat, fully-defaulted shape served by `GET /api/students`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentListing {
  pub id:       i64,
  pub school:   String,
  pub gender:   String,
  pub age:      i64,
  pub study:    String,
  pub failures: i64,
  pub absences: i64,
  pub g1:       i64,
  pub g2:       i64,
  pub g3:       i64,
}

impl Student {
  pub fn from_new(id: i64, new: NewStudent) -> Self {
    Self {
      id,
      school: new.school,
      gender: new.gender,
      age: new.age,
      study: new.study,
      failures: new.failures,
      absences: new.absences,
      g1: new.g1,
      g2: new.g2,
      g3: new.g3,
    }
  }

  pub fn listing(&self) -> StudentListing {
    StudentListing {
      id:       self.id,
      school:   text_or(&self.school, DEFAULT_CODE).to_owned(),
      gender:   text_or(&self.gender, DEFAULT_CODE).to_owned(),
      age:      number_or(self.age, DEFAULT_AGE),
      study:    self.study_label().to_owned(),
      failures: number_or(self.failures, DEFAULT_COUNT),
      absences: number_or(self.absences, DEFAULT_COUNT),
      g1:       number_or(self.g1, DEFAULT_GRADE),
      g2:       number_or(self.g2, DEFAULT_GRADE),
      g3:       number_or(self.g3, DEFAULT_GRADE),
    }
  }

  pub fn study_label(&self) -> &str { text_or(&self.study, DEFAULT_STUDY_LABEL) }

  /// Model features, defaulted the same way as the listing.
  pub fn features(&self) -> Features {
    let listing = self.listing();
    [
      listing.age as f64,
      f64::from(StudyTime::from_label(&listing.study).code()),
      listing.g1 as f64,
      listing.g2 as f64,
      listing.failures as f64,
      listing.absences as f64,
    ]
  }

  /// Regression target (`g3`).
  pub fn target(&self) -> f64 { number_or(self.g3, DEFAULT_GRADE) as f64 }
}

fn number_or(value: Option<i64>, default: i64) -> i64 {
  value.filter(|&v| v != 0).unwrap_or(default)
}

fn text_or<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
  value.as_deref().filter(|v| !v.is_empty()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn empty(id: i64) -> Student { Student::from_new(id, NewStudent::default()) }

  #[test]
  fn listing_defaults_nulls() {
    let listing = empty(7).listing();
    assert_eq!(listing, StudentListing {
      id:       7,
      school:   "-".into(),
      gender:   "-".into(),
      age:      16,
      study:    "2-5h".into(),
      failures: 0,
      absences: 0,
      g1:       10,
      g2:       10,
      g3:       10,
    });
  }

  #[test]
  fn listing_treats_zero_and_empty_as_missing() {
    let student = Student::from_new(1, NewStudent {
      school: Some(String::new()),
      study: Some(String::new()),
      age: Some(0),
      g1: Some(0),
      g3: Some(0),
      ..NewStudent::default()
    });
    let listing = student.listing();
    assert_eq!(listing.school, "-");
    assert_eq!(listing.study, "2-5h");
    assert_eq!(listing.age, 16);
    assert_eq!(listing.g1, 10);
    assert_eq!(listing.g3, 10);
  }

  #[test]
  fn zero_grades_train_as_defaults() {
    let student = Student::from_new(1, NewStudent {
      age: Some(0),
      g2: Some(0),
      g3: Some(0),
      ..NewStudent::default()
    });
    assert_eq!(student.features(), [16.0, 2.0, 10.0, 10.0, 0.0, 0.0]);
    assert_eq!(student.target(), 10.0);
  }

  #[test]
  fn features_use_listing_defaults() {
    assert_eq!(empty(1).features(), [16.0, 2.0, 10.0, 10.0, 0.0, 0.0]);
    assert_eq!(empty(1).target(), 10.0);
  }

  #[test]
  fn features_encode_study_time() {
    let student = Student::from_new(1, NewStudent {
      age: Some(18),
      study: Some("5-10h".into()),
      g1: Some(12),
      g2: Some(14),
      failures: Some(1),
      absences: Some(4),
      g3: Some(15),
      ..NewStudent::default()
    });
    assert_eq!(student.features(), [18.0, 3.0, 12.0, 14.0, 1.0, 4.0]);
    assert_eq!(student.target(), 15.0);
  }

  #[test]
  fn listing_serializes_in_column_order() {
    let json = serde_json::to_string(&empty(3).listing()).unwrap();
    assert!(
      json.starts_with(r#"{"id":3,"school":"-","gender":"-","age":16,"study":"2-5h""#),
      "json: {json}"
    );
  }
}
