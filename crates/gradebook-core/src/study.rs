//! Study-time buckets and their numeric encoding.

/// Label substituted when a record has no study-time bucket.
pub const DEFAULT_STUDY_LABEL: &str = "2-5h";

/// Weekly study time, as used by the prediction model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyTime {
  /// 1 to 2 hours.
  Low,
  /// 2 to 5 hours.
  Medium,
  /// 5 to 10 hours.
  High,
}

impl StudyTime {
  /// Classify a free-form bucket label by substring.
  ///
  /// Labels are checked in order `1-2`, `2-5`, `5-10`; anything that matches
  /// none of them is treated as [`StudyTime::Medium`].
  pub fn from_label(label: &str) -> Self {
    if label.contains("1-2") {
      StudyTime::Low
    } else if label.contains("2-5") {
      StudyTime::Medium
    } else if label.contains("5-10") {
      StudyTime::High
    } else {
      StudyTime::Medium
    }
  }

  pub fn code(self) -> u8 {
    match self {
      StudyTime::Low => 1,
      StudyTime::Medium => 2,
      StudyTime::High => 3,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_labels_map_to_codes() {
    assert_eq!(StudyTime::from_label("1-2h").code(), 1);
    assert_eq!(StudyTime::from_label("2-5h").code(), 2);
    assert_eq!(StudyTime::from_label("5-10h").code(), 3);
  }

  #[test]
  fn unknown_labels_fall_back_to_medium() {
    assert_eq!(StudyTime::from_label("").code(), 2);
    assert_eq!(StudyTime::from_label(">10h").code(), 2);
    assert_eq!(StudyTime::from_label("lots").code(), 2);
  }

  #[test]
  fn matching_is_by_substring() {
    assert_eq!(StudyTime::from_label("about 1-2 hours").code(), 1);
    assert_eq!(StudyTime::from_label("5-10 hrs/week").code(), 3);
  }
}
