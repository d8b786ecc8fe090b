//! Descriptive statistics over grade records.

use serde::{Deserialize, Serialize};

use crate::model::Grade;

/// Summary statistics for a set of grades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeSummary {
  pub count:   usize,
  /// Mean score, rounded to two decimal places.
  pub average: f64,
  pub max:     f64,
  pub min:     f64,
}

impl GradeSummary {
  /// The all-zero summary reported for an empty grade set.
  pub const EMPTY: GradeSummary = GradeSummary {
    count:   0,
    average: 0.0,
    max:     0.0,
    min:     0.0,
  };
}

/// Summarize `grades`, optionally restricted to one student.
///
/// An empty (or fully filtered-out) input yields [`GradeSummary::EMPTY`]
/// rather than an error. `max` and `min` are the unrounded extremes; only
/// the average is rounded. Pure function of its input.
pub fn summarize(grades: &[Grade], student_id: Option<&str>) -> GradeSummary {
  let scores: Vec<f64> = grades
    .iter()
    .filter(|g| student_id.is_none_or(|id| g.student_id == id))
    .map(|g| g.score)
    .collect();

  let Some((&first, rest)) = scores.split_first() else {
    return GradeSummary::EMPTY;
  };

  let (mut max, mut min) = (first, first);
  for &score in rest {
    max = max.max(score);
    min = min.min(score);
  }

  GradeSummary {
    count: scores.len(),
    average: round2(scores.iter().sum::<f64>() / scores.len() as f64),
    max,
    min,
  }
}

fn round2(value: f64) -> f64 {
  (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
  use super::{GradeSummary, summarize};
  use crate::model::Grade;

  fn grade(student_id: &str, score: f64) -> Grade {
    Grade {
      id:         None,
      student_id: student_id.into(),
      subject:    "数学".into(),
      score,
      exam_type:  None,
      exam_date:  None,
    }
  }

  #[test]
  fn empty_input_yields_the_zero_summary() {
    assert_eq!(summarize(&[], None), GradeSummary::EMPTY);
  }

  #[test]
  fn summary_over_three_scores() {
    let grades = [
      grade("2024001", 80.0),
      grade("2024001", 90.0),
      grade("2024002", 100.0),
    ];
    let summary = summarize(&grades, None);
    assert_eq!(summary.count, 3);
    assert_eq!(summary.average, 90.0);
    assert_eq!(summary.max, 100.0);
    assert_eq!(summary.min, 80.0);
  }

  #[test]
  fn average_rounds_to_two_decimals() {
    let grades = [
      grade("2024001", 80.0),
      grade("2024001", 85.0),
      grade("2024001", 92.0),
    ];
    // 257 / 3 = 85.666…
    assert_eq!(summarize(&grades, None).average, 85.67);
  }

  #[test]
  fn student_filter_restricts_the_set() {
    let grades = [
      grade("2024001", 80.0),
      grade("2024002", 60.0),
      grade("2024001", 90.0),
    ];
    let all = summarize(&grades, None);
    let one = summarize(&grades, Some("2024001"));
    assert_eq!(all.count, 3);
    assert_eq!(one.count, 2);
    assert_eq!(one.average, 85.0);
    assert_eq!(one.min, 80.0);
    // The filtered set is a subset of the full one.
    assert!(one.count < all.count);
  }

  #[test]
  fn filter_with_no_grades_yields_the_zero_summary() {
    let grades = [grade("2024001", 80.0)];
    assert_eq!(summarize(&grades, Some("9999")), GradeSummary::EMPTY);
  }
}
