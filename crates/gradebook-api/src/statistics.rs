//! Statistics service and the `/api/statistics` handler.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use gradebook_core::{
  stats::{self, GradeSummary},
  store::RecordStore,
};
use serde::Deserialize;

use crate::{error::ApiError, grades, reply::Reply};

// ─── Service ─────────────────────────────────────────────────────────────────

/// Summarize all grades, or one student's when `student_id` is given.
pub fn grade_summary<S: RecordStore>(
  store: &S,
  student_id: Option<&str>,
) -> Result<GradeSummary, ApiError> {
  let grades = grades::list_grades(store)?;
  Ok(stats::summarize(&grades, student_id))
}

// ─── Handler ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct StatsParams {
  pub student_id: Option<String>,
}

/// `GET /api/statistics[?student_id=<number>]`
pub async fn summary<S: RecordStore + 'static>(
  State(store): State<Arc<S>>,
  Query(params): Query<StatsParams>,
) -> Result<Json<Reply>, ApiError> {
  let summary = grade_summary(store.as_ref(), params.student_id.as_deref())?;
  Ok(Json(Reply::data(summary)?))
}
