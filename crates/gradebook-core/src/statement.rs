//! The fixed statement vocabulary and its pure row transforms.
//!
//! A [`Statement`] is a tagged operation descriptor — verb, collection
//! name, optional single-field equality predicate, payload — rather than
//! SQL text, so dispatch is exhaustively checkable. The vocabulary is
//! deliberately closed: no joins, no range predicates, no transactions.
//!
//! The transforms at the bottom of this module operate on in-memory
//! collections only. A backend composes them with durable load/save under
//! a per-collection lock.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{ID_FIELD, Row, field_eq, next_record_id, record_id};

// ─── Vocabulary ──────────────────────────────────────────────────────────────

/// A single-field equality predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
  pub field: String,
  pub value: Value,
}

impl Predicate {
  pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Predicate {
    Predicate {
      field: field.into(),
      value: value.into(),
    }
  }

  /// Exact match on the named field; see [`field_eq`] for coercion rules.
  pub fn matches(&self, row: &Row) -> bool {
    field_eq(row, &self.field, &self.value)
  }
}

/// One operation against a named collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verb", rename_all = "lowercase")]
pub enum Statement {
  /// Return the collection, filtered when a predicate is present.
  Select {
    collection: String,
    filter:     Option<Predicate>,
  },
  /// Append one record, assigning a surrogate id when the payload has none.
  Insert { collection: String, row: Row },
  /// Shallow-merge `changes` into every record matching `matching`.
  Update {
    collection: String,
    matching:   Predicate,
    changes:    Row,
  },
  /// Remove every record matching `matching`.
  Delete {
    collection: String,
    matching:   Predicate,
  },
}

impl Statement {
  pub fn select(collection: impl Into<String>, filter: Option<Predicate>) -> Statement {
    Statement::Select {
      collection: collection.into(),
      filter,
    }
  }

  pub fn insert(collection: impl Into<String>, row: Row) -> Statement {
    Statement::Insert {
      collection: collection.into(),
      row,
    }
  }

  pub fn update(collection: impl Into<String>, matching: Predicate, changes: Row) -> Statement {
    Statement::Update {
      collection: collection.into(),
      matching,
      changes,
    }
  }

  pub fn delete(collection: impl Into<String>, matching: Predicate) -> Statement {
    Statement::Delete {
      collection: collection.into(),
      matching,
    }
  }

  /// The collection this statement targets.
  pub fn collection(&self) -> &str {
    match self {
      Statement::Select { collection, .. }
      | Statement::Insert { collection, .. }
      | Statement::Update { collection, .. }
      | Statement::Delete { collection, .. } => collection,
    }
  }
}

/// Result of executing a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementOutcome {
  /// SELECT: the matching records, in insertion order.
  Rows(Vec<Row>),
  /// INSERT/UPDATE/DELETE: how many records were touched.
  Affected(usize),
}

impl StatementOutcome {
  /// The returned records; empty for mutation outcomes.
  pub fn rows(self) -> Vec<Row> {
    match self {
      StatementOutcome::Rows(rows) => rows,
      StatementOutcome::Affected(_) => Vec::new(),
    }
  }

  /// The affected-record count; zero for SELECT outcomes.
  pub fn affected(&self) -> usize {
    match self {
      StatementOutcome::Rows(_) => 0,
      StatementOutcome::Affected(count) => *count,
    }
  }
}

// ─── Transforms ──────────────────────────────────────────────────────────────

/// SELECT: the records matching `filter`, or all of them when it is absent.
pub fn select_rows(rows: &[Row], filter: Option<&Predicate>) -> Vec<Row> {
  match filter {
    Some(predicate) => rows.iter().filter(|r| predicate.matches(r)).cloned().collect(),
    None => rows.to_vec(),
  }
}

/// INSERT: assign a surrogate id when the payload carries none, then append.
///
/// Returns the record's numeric id — `None` only when the caller supplied
/// a non-numeric `id` of their own.
pub fn insert_row(rows: &mut Vec<Row>, mut row: Row) -> Option<i64> {
  if !row.contains_key(ID_FIELD) {
    row.insert(ID_FIELD.to_string(), Value::from(next_record_id(rows)));
  }
  let id = record_id(&row);
  rows.push(row);
  id
}

/// UPDATE: shallow-merge `changes` into every record matching `matching`.
///
/// Listed fields are overwritten, everything else is untouched. Returns the
/// number of matched records; zero means the collection is unchanged.
pub fn update_rows(rows: &mut [Row], matching: &Predicate, changes: &Row) -> usize {
  let mut matched = 0;
  for row in rows.iter_mut() {
    if matching.matches(row) {
      for (field, value) in changes {
        row.insert(field.clone(), value.clone());
      }
      matched += 1;
    }
  }
  matched
}

/// DELETE: remove every record matching `matching`, preserving the order of
/// the remainder. Returns the number removed.
pub fn delete_rows(rows: &mut Vec<Row>, matching: &Predicate) -> usize {
  let before = rows.len();
  rows.retain(|row| !matching.matches(row));
  before - rows.len()
}

#[cfg(test)]
mod tests {
  use serde_json::{Value, json};

  use super::{Predicate, delete_rows, insert_row, select_rows, update_rows};
  use crate::record::{Row, record_id};

  fn row(value: Value) -> Row {
    match value {
      Value::Object(map) => map,
      _ => panic!("test rows must be objects"),
    }
  }

  fn students() -> Vec<Row> {
    vec![
      row(json!({"id": 1, "student_id": "2024001", "name": "张三"})),
      row(json!({"id": 2, "student_id": "2024002", "name": "李四"})),
      row(json!({"id": 3, "student_id": "2024001", "name": "张三(转班)"})),
    ]
  }

  #[test]
  fn select_without_filter_returns_everything_in_order() {
    let rows = students();
    let out = select_rows(&rows, None);
    assert_eq!(out, rows);
  }

  #[test]
  fn select_filters_by_exact_equality() {
    let rows = students();
    let predicate = Predicate::new("student_id", "2024001");
    let out = select_rows(&rows, Some(&predicate));
    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|r| r["student_id"] == json!("2024001")));
  }

  #[test]
  fn select_with_unmatched_predicate_is_empty() {
    let rows = students();
    let predicate = Predicate::new("student_id", "9999");
    assert!(select_rows(&rows, Some(&predicate)).is_empty());
  }

  #[test]
  fn insert_assigns_the_next_id() {
    let mut rows = students();
    let id = insert_row(&mut rows, row(json!({"student_id": "2024004"})));
    assert_eq!(id, Some(4));
    assert_eq!(record_id(rows.last().unwrap()), Some(4));
  }

  #[test]
  fn insert_keeps_a_caller_supplied_id() {
    let mut rows = students();
    let id = insert_row(&mut rows, row(json!({"id": 99, "student_id": "x"})));
    assert_eq!(id, Some(99));
  }

  #[test]
  fn insert_into_empty_collection_starts_at_one() {
    let mut rows = Vec::new();
    assert_eq!(insert_row(&mut rows, row(json!({"name": "first"}))), Some(1));
  }

  #[test]
  fn update_merges_listed_fields_only() {
    let mut rows = students();
    let matched = update_rows(
      &mut rows,
      &Predicate::new("student_id", "2024002"),
      &row(json!({"name": "李四(改名)", "age": 16})),
    );
    assert_eq!(matched, 1);
    assert_eq!(rows[1]["name"], json!("李四(改名)"));
    assert_eq!(rows[1]["age"], json!(16));
    // Untouched fields and untouched rows survive.
    assert_eq!(rows[1]["id"], json!(2));
    assert_eq!(rows[0]["name"], json!("张三"));
  }

  #[test]
  fn update_touches_every_match() {
    let mut rows = students();
    let matched = update_rows(
      &mut rows,
      &Predicate::new("student_id", "2024001"),
      &row(json!({"class_name": "高一(3)班"})),
    );
    assert_eq!(matched, 2);
  }

  #[test]
  fn update_miss_reports_zero_and_changes_nothing() {
    let mut rows = students();
    let snapshot = rows.clone();
    let matched = update_rows(
      &mut rows,
      &Predicate::new("student_id", "9999"),
      &row(json!({"name": "nobody"})),
    );
    assert_eq!(matched, 0);
    assert_eq!(rows, snapshot);
  }

  #[test]
  fn delete_removes_all_and_only_matches() {
    let mut rows = students();
    let removed = delete_rows(&mut rows, &Predicate::new("student_id", "2024001"));
    assert_eq!(removed, 2);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["student_id"], json!("2024002"));
  }

  #[test]
  fn delete_miss_reports_zero() {
    let mut rows = students();
    assert_eq!(delete_rows(&mut rows, &Predicate::new("id", 42)), 0);
    assert_eq!(rows.len(), 3);
  }
}
