//! Grade services and `/api/grades` handlers.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/api/grades` | Optional `?student_id=<number>` |
//! | `POST`   | `/api/grades` | 400 on unknown student or bad score |
//! | `PUT`    | `/api/grades/{id}` | Matched by surrogate id; 404 if not found |
//! | `DELETE` | `/api/grades/{id}` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use gradebook_core::{
  model::{self, Grade},
  statement::{Predicate, Statement},
  store::RecordStore,
};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, reply::Reply, students};

// ─── Service ─────────────────────────────────────────────────────────────────

fn check_score(score: f64) -> Result<(), ApiError> {
  if !(0.0..=100.0).contains(&score) {
    return Err(ApiError::Rejected("score must be between 0 and 100".into()));
  }
  Ok(())
}

/// All grades, in insertion order.
pub fn list_grades<S: RecordStore>(store: &S) -> Result<Vec<Grade>, ApiError> {
  let rows = store
    .execute(Statement::select("grades", None))
    .map_err(ApiError::store)?
    .rows();
  rows
    .iter()
    .map(model::from_row)
    .collect::<Result<_, _>>()
    .map_err(ApiError::from)
}

/// All grades for one student, in insertion order.
pub fn grades_for_student<S: RecordStore>(
  store: &S,
  student_id: &str,
) -> Result<Vec<Grade>, ApiError> {
  let rows = store
    .execute(Statement::select(
      "grades",
      Some(Predicate::new("student_id", student_id)),
    ))
    .map_err(ApiError::store)?
    .rows();
  rows
    .iter()
    .map(model::from_row)
    .collect::<Result<_, _>>()
    .map_err(ApiError::from)
}

/// Record a new grade. The referenced student must exist, and the score
/// must be in range; the store itself checks neither.
pub fn add_grade<S: RecordStore>(store: &S, grade: &Grade) -> Result<Grade, ApiError> {
  if grade.student_id.trim().is_empty() {
    return Err(ApiError::Rejected("missing required field: student_id".into()));
  }
  if grade.subject.trim().is_empty() {
    return Err(ApiError::Rejected("missing required field: subject".into()));
  }
  check_score(grade.score)?;
  if students::get_student(store, &grade.student_id)?.is_none() {
    return Err(ApiError::Rejected("student does not exist".into()));
  }

  let mut row = model::to_row(grade)?;
  row.remove("id");
  store
    .execute(Statement::insert("grades", row))
    .map_err(ApiError::store)?;

  // Insertion order is preserved, so the student's newest grade is the one
  // just appended.
  grades_for_student(store, &grade.student_id)?
    .into_iter()
    .next_back()
    .ok_or_else(|| ApiError::NotFound("grade record not found".into()))
}

/// Fields a grade update may touch; the student reference is immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradeUpdate {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub subject:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub score:     Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub exam_type: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub exam_date: Option<NaiveDate>,
}

/// Overwrite the given fields of one grade, matched by surrogate id.
pub fn update_grade<S: RecordStore>(
  store: &S,
  id: i64,
  update: &GradeUpdate,
) -> Result<(), ApiError> {
  if let Some(score) = update.score {
    check_score(score)?;
  }
  let changes = model::to_row(update)?;
  if changes.is_empty() {
    return Err(ApiError::Rejected("no fields to update".into()));
  }

  let matched = store
    .execute(Statement::update(
      "grades",
      Predicate::new("id", id),
      changes,
    ))
    .map_err(ApiError::store)?
    .affected();
  if matched == 0 {
    return Err(ApiError::NotFound("grade record not found".into()));
  }
  Ok(())
}

/// Remove one grade by surrogate id.
pub fn delete_grade<S: RecordStore>(store: &S, id: i64) -> Result<(), ApiError> {
  let removed = store
    .execute(Statement::delete("grades", Predicate::new("id", id)))
    .map_err(ApiError::store)?
    .affected();
  if removed == 0 {
    return Err(ApiError::NotFound("grade record not found".into()));
  }
  Ok(())
}

// ─── Handlers ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  pub student_id: Option<String>,
}

/// `GET /api/grades[?student_id=<number>]`
pub async fn list<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Reply>, ApiError> {
  let grades = match params.student_id.as_deref() {
    Some(student_id) => grades_for_student(store.as_ref(), student_id)?,
    None => list_grades(store.as_ref())?,
  };
  Ok(Json(Reply::data(grades)?))
}

/// `POST /api/grades` — body: a full grade record.
pub async fn create<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
  Json(grade): Json<Grade>,
) -> Result<impl IntoResponse, ApiError> {
  let created = add_grade(store.as_ref(), &grade)?;
  Ok((
    StatusCode::CREATED,
    Json(Reply::message_with_data("grade added", created)?),
  ))
}

/// `PUT /api/grades/{id}`
pub async fn update_one<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(update): Json<GradeUpdate>,
) -> Result<Json<Reply>, ApiError> {
  update_grade(store.as_ref(), id, &update)?;
  Ok(Json(Reply::message("grade updated")))
}

/// `DELETE /api/grades/{id}`
pub async fn delete_one<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Reply>, ApiError> {
  delete_grade(store.as_ref(), id)?;
  Ok(Json(Reply::message("grade deleted")))
}
