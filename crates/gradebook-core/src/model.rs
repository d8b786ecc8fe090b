//! Typed domain entities layered over schemaless rows.
//!
//! The store itself holds attribute maps; these structs are the service
//! layer's currency and define which fields it will ever write. Extra
//! fields already present in a stored row are preserved by the shallow
//! UPDATE merge and ignored on deserialization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{Error, Result, record::Row};

/// A student. `student_id` is the caller-facing business key — unique
/// across the collection, enforced by the service layer — distinct from
/// the numeric surrogate `id` the store assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:         Option<i64>,
  pub student_id: String,
  pub name:       String,
  pub class_name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub gender:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub age:        Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub address:    Option<String>,
}

/// One exam result. `student_id` references a [`Student`] by business key;
/// the store does not enforce the reference — the service layer does.
/// Multiple grades per (student, subject) are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:         Option<i64>,
  pub student_id: String,
  pub subject:    String,
  /// Must lie in [0, 100]; checked by the service layer before insertion.
  pub score:      f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub exam_type:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub exam_date:  Option<NaiveDate>,
}

/// A class (homeroom), identified by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolClass {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:   Option<i64>,
  pub name: String,
}

/// A course with a credit weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:     Option<i64>,
  pub name:   String,
  pub credit: f64,
}

/// Access role of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Admin,
  Teacher,
}

/// An account. Only the argon2 PHC hash of the password is ever stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:            Option<i64>,
  pub username:      String,
  pub password_hash: String,
  pub role:          Role,
}

// ─── Row conversions ─────────────────────────────────────────────────────────

/// Serialize a model into a row for the store.
pub fn to_row<T: Serialize>(value: &T) -> Result<Row> {
  match serde_json::to_value(value)? {
    Value::Object(map) => Ok(map),
    _ => Err(Error::NotARecord),
  }
}

/// Deserialize a row back into a typed model.
///
/// Fields the model does not name are ignored; the store is allowed to
/// carry more than the model knows about.
pub fn from_row<T: DeserializeOwned>(row: &Row) -> Result<T> {
  Ok(serde_json::from_value(Value::Object(row.clone()))?)
}
