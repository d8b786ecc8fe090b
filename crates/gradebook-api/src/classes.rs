//! Class services and `/api/classes` handlers.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use gradebook_core::{
  model::{self, SchoolClass},
  statement::{Predicate, Statement},
  store::RecordStore,
};
use serde::Deserialize;

use crate::{error::ApiError, reply::Reply};

// ─── Service ─────────────────────────────────────────────────────────────────

/// All classes, in insertion order.
pub fn list_classes<S: RecordStore>(store: &S) -> Result<Vec<SchoolClass>, ApiError> {
  let rows = store
    .execute(Statement::select("classes", None))
    .map_err(ApiError::store)?
    .rows();
  rows
    .iter()
    .map(model::from_row)
    .collect::<Result<_, _>>()
    .map_err(ApiError::from)
}

/// Register a new class; names are unique.
pub fn add_class<S: RecordStore>(store: &S, name: &str) -> Result<(), ApiError> {
  let name = name.trim();
  if name.is_empty() {
    return Err(ApiError::Rejected("class name must not be empty".into()));
  }
  if list_classes(store)?.iter().any(|c| c.name == name) {
    return Err(ApiError::Rejected("class already exists".into()));
  }

  let class = SchoolClass {
    id:   None,
    name: name.into(),
  };
  store
    .execute(Statement::insert("classes", model::to_row(&class)?))
    .map_err(ApiError::store)?;
  Ok(())
}

/// Remove one class by surrogate id.
pub fn delete_class<S: RecordStore>(store: &S, id: i64) -> Result<(), ApiError> {
  let removed = store
    .execute(Statement::delete("classes", Predicate::new("id", id)))
    .map_err(ApiError::store)?
    .affected();
  if removed == 0 {
    return Err(ApiError::NotFound("class not found".into()));
  }
  Ok(())
}

// ─── Handlers ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NewClass {
  pub name: String,
}

/// `GET /api/classes`
pub async fn list<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
) -> Result<Json<Reply>, ApiError> {
  Ok(Json(Reply::data(list_classes(store.as_ref())?)?))
}

/// `POST /api/classes` — body: `{"name": "..."}`
pub async fn create<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewClass>,
) -> Result<impl IntoResponse, ApiError> {
  add_class(store.as_ref(), &body.name)?;
  Ok((StatusCode::CREATED, Json(Reply::message("class added"))))
}

/// `DELETE /api/classes/{id}`
pub async fn delete_one<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Reply>, ApiError> {
  delete_class(store.as_ref(), id)?;
  Ok(Json(Reply::message("class deleted")))
}
