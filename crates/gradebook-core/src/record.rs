//! Records as attribute maps.
//!
//! The store is schemaless: a record is a JSON object carrying a numeric
//! surrogate `id` plus whatever fields its entity kind defines. Typed views
//! live in [`crate::model`]; everything in this module works on raw maps.

use serde_json::{Map, Value};

/// One record: an attribute map. Record order within a collection is the
/// enclosing sequence's; field order within a record carries no meaning.
pub type Row = Map<String, Value>;

/// Field name of the surrogate identifier.
pub const ID_FIELD: &str = "id";

/// The surrogate id of `row`, if present and numeric.
pub fn record_id(row: &Row) -> Option<i64> {
  row.get(ID_FIELD).and_then(Value::as_i64)
}

/// Next surrogate id for a collection: one past the current maximum.
///
/// Callers must hold the collection lock for the whole load-assign-save
/// cycle; ids are then monotonic and collision-free by construction.
pub fn next_record_id(rows: &[Row]) -> i64 {
  rows.iter().filter_map(record_id).max().unwrap_or(0) + 1
}

/// Exact-equality test on one field.
///
/// No type coercion: `95` does not match `"95"`, and an integer does not
/// match the float encoding of the same number.
pub fn field_eq(row: &Row, field: &str, value: &Value) -> bool {
  row.get(field).is_some_and(|v| v == value)
}

#[cfg(test)]
mod tests {
  use serde_json::{Value, json};

  use super::{Row, field_eq, next_record_id, record_id};

  fn row(value: Value) -> Row {
    match value {
      Value::Object(map) => map,
      _ => panic!("test rows must be objects"),
    }
  }

  #[test]
  fn record_id_reads_numeric_ids_only() {
    assert_eq!(record_id(&row(json!({"id": 7}))), Some(7));
    assert_eq!(record_id(&row(json!({"id": "7"}))), None);
    assert_eq!(record_id(&row(json!({"name": "x"}))), None);
  }

  #[test]
  fn next_id_is_one_past_the_maximum() {
    let rows = vec![
      row(json!({"id": 3})),
      row(json!({"id": 11})),
      row(json!({"id": 5})),
    ];
    assert_eq!(next_record_id(&rows), 12);
    assert_eq!(next_record_id(&[]), 1);
  }

  #[test]
  fn field_eq_does_not_coerce_types() {
    let r = row(json!({"score": 95}));
    assert!(field_eq(&r, "score", &json!(95)));
    assert!(!field_eq(&r, "score", &json!("95")));
    assert!(!field_eq(&r, "score", &json!(95.0)));
    assert!(!field_eq(&r, "missing", &json!(95)));
  }
}
