//! Student services and `/api/students` handlers.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/api/students` | Optional `?q=<keyword>` over name and student number |
//! | `POST`   | `/api/students` | Body: full student record; 400 on duplicate number |
//! | `GET`    | `/api/students/{student_id}` | 404 if not found |
//! | `PUT`    | `/api/students/{student_id}` | Partial update; 404 if not found |
//! | `DELETE` | `/api/students/{student_id}` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use gradebook_core::{
  model::{self, Student},
  statement::{Predicate, Statement},
  store::RecordStore,
};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, reply::Reply};

// ─── Service ─────────────────────────────────────────────────────────────────

/// All students, in insertion order.
pub fn list_students<S: RecordStore>(store: &S) -> Result<Vec<Student>, ApiError> {
  let rows = store
    .execute(Statement::select("students", None))
    .map_err(ApiError::store)?
    .rows();
  rows
    .iter()
    .map(model::from_row)
    .collect::<Result<_, _>>()
    .map_err(ApiError::from)
}

/// Case-insensitive keyword search over name and student number.
/// A blank keyword returns everyone.
pub fn search_students<S: RecordStore>(store: &S, keyword: &str) -> Result<Vec<Student>, ApiError> {
  let students = list_students(store)?;
  let keyword = keyword.trim().to_lowercase();
  if keyword.is_empty() {
    return Ok(students);
  }
  Ok(
    students
      .into_iter()
      .filter(|s| {
        s.name.to_lowercase().contains(&keyword) || s.student_id.to_lowercase().contains(&keyword)
      })
      .collect(),
  )
}

/// Look up one student by student number.
pub fn get_student<S: RecordStore>(
  store: &S,
  student_id: &str,
) -> Result<Option<Student>, ApiError> {
  let rows = store
    .execute(Statement::select(
      "students",
      Some(Predicate::new("student_id", student_id)),
    ))
    .map_err(ApiError::store)?
    .rows();
  rows
    .first()
    .map(model::from_row)
    .transpose()
    .map_err(ApiError::from)
}

/// Register a new student. The student number must be unique.
pub fn add_student<S: RecordStore>(store: &S, student: &Student) -> Result<(), ApiError> {
  for (field, value) in [
    ("student_id", &student.student_id),
    ("name", &student.name),
    ("class_name", &student.class_name),
  ] {
    if value.trim().is_empty() {
      return Err(ApiError::Rejected(format!("missing required field: {field}")));
    }
  }
  if get_student(store, &student.student_id)?.is_some() {
    return Err(ApiError::Rejected("student number already exists".into()));
  }

  let mut row = model::to_row(student)?;
  row.remove("id"); // surrogate ids are the store's to assign
  store
    .execute(Statement::insert("students", row))
    .map_err(ApiError::store)?;
  Ok(())
}

/// Fields a student update may touch. The student number itself is
/// immutable; absent fields are left as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentUpdate {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:       Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub class_name: Option<String>,
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

/// Overwrite the given fields of one student.
pub fn update_student<S: RecordStore>(
  store: &S,
  student_id: &str,
  update: &StudentUpdate,
) -> Result<(), ApiError> {
  let changes = model::to_row(update)?;
  if changes.is_empty() {
    return Err(ApiError::Rejected("no fields to update".into()));
  }

  let matched = store
    .execute(Statement::update(
      "students",
      Predicate::new("student_id", student_id),
      changes,
    ))
    .map_err(ApiError::store)?
    .affected();
  if matched == 0 {
    return Err(ApiError::NotFound("student not found".into()));
  }
  Ok(())
}

/// Remove one student by student number. Grades are left in place; the
/// reference from grade to student is the caller's to manage.
pub fn delete_student<S: RecordStore>(store: &S, student_id: &str) -> Result<(), ApiError> {
  let removed = store
    .execute(Statement::delete(
      "students",
      Predicate::new("student_id", student_id),
    ))
    .map_err(ApiError::store)?
    .affected();
  if removed == 0 {
    return Err(ApiError::NotFound("student not found".into()));
  }
  Ok(())
}

// ─── Handlers ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Keyword filter over name and student number.
  pub q: Option<String>,
}

/// `GET /api/students[?q=<keyword>]`
pub async fn list<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Reply>, ApiError> {
  let students = match params.q.as_deref() {
    Some(keyword) => search_students(store.as_ref(), keyword)?,
    None => list_students(store.as_ref())?,
  };
  Ok(Json(Reply::data(students)?))
}

/// `POST /api/students` — body: a full student record.
pub async fn create<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
  Json(student): Json<Student>,
) -> Result<impl IntoResponse, ApiError> {
  add_student(store.as_ref(), &student)?;
  let created = get_student(store.as_ref(), &student.student_id)?;
  Ok((
    StatusCode::CREATED,
    Json(Reply::message_with_data("student added", created)?),
  ))
}

/// `GET /api/students/{student_id}`
pub async fn get_one<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
  Path(student_id): Path<String>,
) -> Result<Json<Reply>, ApiError> {
  let student = get_student(store.as_ref(), &student_id)?
    .ok_or_else(|| ApiError::NotFound("student not found".into()))?;
  Ok(Json(Reply::data(student)?))
}

/// `PUT /api/students/{student_id}`
pub async fn update_one<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
  Path(student_id): Path<String>,
  Json(update): Json<StudentUpdate>,
) -> Result<Json<Reply>, ApiError> {
  update_student(store.as_ref(), &student_id, &update)?;
  Ok(Json(Reply::message("student updated")))
}

/// `DELETE /api/students/{student_id}`
pub async fn delete_one<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
  Path(student_id): Path<String>,
) -> Result<Json<Reply>, ApiError> {
  delete_student(store.as_ref(), &student_id)?;
  Ok(Json(Reply::message("student deleted")))
}

#[cfg(test)]
mod tests {
  use gradebook_store_json::JsonStore;
  use tempfile::TempDir;

  use super::*;

  fn store() -> (TempDir, JsonStore) {
    let dir = TempDir::new().expect("temp data dir");
    let store = JsonStore::open(dir.path()).expect("open store");
    (dir, store)
  }

  fn student(student_id: &str, name: &str) -> Student {
    Student {
      id:         None,
      student_id: student_id.into(),
      name:       name.into(),
      class_name: "高一(1)班".into(),
      gender:     Some("male".into()),
      age:        Some(16),
      phone:      None,
      email:      None,
      address:    None,
    }
  }

  #[test]
  fn add_and_get_student() {
    let (_dir, s) = store();
    add_student(&s, &student("2024001", "张三")).unwrap();

    let fetched = get_student(&s, "2024001").unwrap().unwrap();
    assert_eq!(fetched.name, "张三");
    assert!(fetched.id.is_some());
  }

  #[test]
  fn duplicate_student_number_is_rejected() {
    let (_dir, s) = store();
    add_student(&s, &student("2024001", "张三")).unwrap();

    let err = add_student(&s, &student("2024001", "李四")).unwrap_err();
    assert!(matches!(err, ApiError::Rejected(_)));
    assert_eq!(list_students(&s).unwrap().len(), 1);
  }

  #[test]
  fn blank_required_fields_are_rejected() {
    let (_dir, s) = store();
    let err = add_student(&s, &student("", "张三")).unwrap_err();
    assert!(matches!(err, ApiError::Rejected(_)));

    let err = add_student(&s, &student("2024001", "  ")).unwrap_err();
    assert!(matches!(err, ApiError::Rejected(_)));
  }

  #[test]
  fn update_overwrites_only_listed_fields() {
    let (_dir, s) = store();
    add_student(&s, &student("2024001", "张三")).unwrap();

    let update = StudentUpdate {
      name: Some("张三丰".into()),
      age: Some(17),
      ..StudentUpdate::default()
    };
    update_student(&s, "2024001", &update).unwrap();

    let fetched = get_student(&s, "2024001").unwrap().unwrap();
    assert_eq!(fetched.name, "张三丰");
    assert_eq!(fetched.age, Some(17));
    assert_eq!(fetched.class_name, "高一(1)班");
    assert_eq!(fetched.gender.as_deref(), Some("male"));
  }

  #[test]
  fn update_of_unknown_student_is_not_found() {
    let (_dir, s) = store();
    let update = StudentUpdate {
      name: Some("nobody".into()),
      ..StudentUpdate::default()
    };
    let err = update_student(&s, "9999", &update).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
  }

  #[test]
  fn delete_student_then_miss() {
    let (_dir, s) = store();
    add_student(&s, &student("2024001", "张三")).unwrap();

    delete_student(&s, "2024001").unwrap();
    assert!(get_student(&s, "2024001").unwrap().is_none());

    let err = delete_student(&s, "2024001").unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
  }

  #[test]
  fn search_matches_name_and_number_case_insensitively() {
    let (_dir, s) = store();
    add_student(&s, &student("2024001", "张三")).unwrap();
    add_student(&s, &student("2024002", "李四")).unwrap();
    add_student(&s, &student("X2024003", "Alice")).unwrap();

    assert_eq!(search_students(&s, "张三").unwrap().len(), 1);
    assert_eq!(search_students(&s, "2024").unwrap().len(), 3);
    assert_eq!(search_students(&s, "alice").unwrap().len(), 1);
    assert_eq!(search_students(&s, "x2024").unwrap().len(), 1);
    assert_eq!(search_students(&s, "").unwrap().len(), 3);
    assert!(search_students(&s, "nobody").unwrap().is_empty());
  }
}
