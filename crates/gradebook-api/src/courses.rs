//! Course services and `/api/courses` handlers.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use gradebook_core::{
  model::{self, Course},
  statement::{Predicate, Statement},
  store::RecordStore,
};
use serde::Deserialize;

use crate::{error::ApiError, reply::Reply};

// ─── Service ─────────────────────────────────────────────────────────────────

/// All courses, in insertion order.
pub fn list_courses<S: RecordStore>(store: &S) -> Result<Vec<Course>, ApiError> {
  let rows = store
    .execute(Statement::select("courses", None))
    .map_err(ApiError::store)?
    .rows();
  rows
    .iter()
    .map(model::from_row)
    .collect::<Result<_, _>>()
    .map_err(ApiError::from)
}

/// Register a new course; names are unique.
pub fn add_course<S: RecordStore>(store: &S, name: &str, credit: f64) -> Result<(), ApiError> {
  let name = name.trim();
  if name.is_empty() {
    return Err(ApiError::Rejected("course name must not be empty".into()));
  }
  if !credit.is_finite() || credit < 0.0 {
    return Err(ApiError::Rejected("credit must be a non-negative number".into()));
  }
  if list_courses(store)?.iter().any(|c| c.name == name) {
    return Err(ApiError::Rejected("course already exists".into()));
  }

  let course = Course {
    id: None,
    name: name.into(),
    credit,
  };
  store
    .execute(Statement::insert("courses", model::to_row(&course)?))
    .map_err(ApiError::store)?;
  Ok(())
}

/// Remove one course by surrogate id.
pub fn delete_course<S: RecordStore>(store: &S, id: i64) -> Result<(), ApiError> {
  let removed = store
    .execute(Statement::delete("courses", Predicate::new("id", id)))
    .map_err(ApiError::store)?
    .affected();
  if removed == 0 {
    return Err(ApiError::NotFound("course not found".into()));
  }
  Ok(())
}

// ─── Handlers ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NewCourse {
  pub name:   String,
  pub credit: f64,
}

/// `GET /api/courses`
pub async fn list<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
) -> Result<Json<Reply>, ApiError> {
  Ok(Json(Reply::data(list_courses(store.as_ref())?)?))
}

/// `POST /api/courses` — body: `{"name": "...", "credit": 4.0}`
pub async fn create<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewCourse>,
) -> Result<impl IntoResponse, ApiError> {
  add_course(store.as_ref(), &body.name, body.credit)?;
  Ok((StatusCode::CREATED, Json(Reply::message("course added"))))
}

/// `DELETE /api/courses/{id}`
pub async fn delete_one<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Reply>, ApiError> {
  delete_course(store.as_ref(), id)?;
  Ok(Json(Reply::message("course deleted")))
}
