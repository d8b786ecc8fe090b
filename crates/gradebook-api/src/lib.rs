//! JSON REST API for the gradebook.
//!
//! Exposes an axum [`Router`] backed by any
//! [`gradebook_core::store::RecordStore`], plus the synchronous service
//! functions the handlers wrap. Every endpoint answers with a
//! `{success, message, data}` envelope. Sessions, cookies, and HTML are
//! out of scope — this layer is JSON glue over the services.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = gradebook_api::api_router(Arc::new(store));
//! ```

pub mod classes;
pub mod courses;
pub mod error;
pub mod grades;
pub mod reply;
pub mod statistics;
pub mod students;
pub mod users;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json, Router,
  routing::{delete, get, post, put},
};
use gradebook_core::store::RecordStore;
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `GRADEBOOK_*` environment overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:     String,
  pub port:     u16,
  pub data_dir: PathBuf,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// `GET /api/health`
async fn health() -> Json<serde_json::Value> {
  Json(serde_json::json!({ "status": "ok", "message": "gradebook api" }))
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    .route("/api/health", get(health))
    // Students
    .route(
      "/api/students",
      get(students::list::<S>).post(students::create::<S>),
    )
    .route(
      "/api/students/{student_id}",
      get(students::get_one::<S>)
        .put(students::update_one::<S>)
        .delete(students::delete_one::<S>),
    )
    // Grades
    .route("/api/grades", get(grades::list::<S>).post(grades::create::<S>))
    .route(
      "/api/grades/{id}",
      put(grades::update_one::<S>).delete(grades::delete_one::<S>),
    )
    // Statistics
    .route("/api/statistics", get(statistics::summary::<S>))
    // Classes and courses
    .route(
      "/api/classes",
      get(classes::list::<S>).post(classes::create::<S>),
    )
    .route("/api/classes/{id}", delete(classes::delete_one::<S>))
    .route(
      "/api/courses",
      get(courses::list::<S>).post(courses::create::<S>),
    )
    .route("/api/courses/{id}", delete(courses::delete_one::<S>))
    // Accounts
    .route("/api/login", post(users::login::<S>))
    .route("/api/users", get(users::list::<S>).post(users::create::<S>))
    .route("/api/users/{id}", delete(users::delete_one::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use gradebook_store_json::JsonStore;
  use serde_json::{Value, json};
  use tempfile::TempDir;
  use tower::ServiceExt as _;

  use super::*;

  fn app() -> (TempDir, Router<()>) {
    let dir = TempDir::new().expect("temp data dir");
    let store = JsonStore::open(dir.path()).expect("open store");
    (dir, api_router(Arc::new(store)))
  }

  async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
  }

  fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
      .method("POST")
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap()
  }

  #[tokio::test]
  async fn health_answers_ok() {
    let (_dir, app) = app();
    let response = app
      .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], json!("ok"));
  }

  #[tokio::test]
  async fn student_round_trip_over_http() {
    let (_dir, app) = app();

    let created = app
      .clone()
      .oneshot(post_json(
        "/api/students",
        json!({
          "student_id": "2024001",
          "name": "张三",
          "class_name": "高一(1)班",
          "age": 16,
        }),
      ))
      .await
      .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let body = body_json(created).await;
    assert_eq!(body["success"], json!(true));
    assert!(body["data"]["id"].is_i64());

    let fetched = app
      .clone()
      .oneshot(
        Request::get("/api/students/2024001")
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    let body = body_json(fetched).await;
    assert_eq!(body["data"]["name"], json!("张三"));

    let missing = app
      .oneshot(
        Request::get("/api/students/9999")
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn duplicate_student_answers_400_with_envelope() {
    let (_dir, app) = app();
    let student = json!({
      "student_id": "2024001",
      "name": "张三",
      "class_name": "高一(1)班",
    });

    let first = app
      .clone()
      .oneshot(post_json("/api/students", student.clone()))
      .await
      .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
      .oneshot(post_json("/api/students", student))
      .await
      .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body = body_json(second).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["message"].is_string());
  }

  #[tokio::test]
  async fn statistics_reflect_posted_grades() {
    let (_dir, app) = app();

    app
      .clone()
      .oneshot(post_json(
        "/api/students",
        json!({"student_id": "2024001", "name": "张三", "class_name": "高一(1)班"}),
      ))
      .await
      .unwrap();

    for score in [80.0, 90.0, 100.0] {
      let response = app
        .clone()
        .oneshot(post_json(
          "/api/grades",
          json!({"student_id": "2024001", "subject": "数学", "score": score}),
        ))
        .await
        .unwrap();
      assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
      .oneshot(
        Request::get("/api/statistics?student_id=2024001")
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["count"], json!(3));
    assert_eq!(body["data"]["average"], json!(90.0));
    assert_eq!(body["data"]["max"], json!(100.0));
    assert_eq!(body["data"]["min"], json!(80.0));
  }

  #[tokio::test]
  async fn login_round_trip() {
    let (_dir, app) = app();

    let created = app
      .clone()
      .oneshot(post_json(
        "/api/users",
        json!({"username": "admin", "password": "admin123", "role": "admin"}),
      ))
      .await
      .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let ok = app
      .clone()
      .oneshot(post_json(
        "/api/login",
        json!({"username": "admin", "password": "admin123"}),
      ))
      .await
      .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    let body = body_json(ok).await;
    assert_eq!(body["data"]["username"], json!("admin"));
    assert!(body["data"].get("password_hash").is_none());

    let bad = app
      .oneshot(post_json(
        "/api/login",
        json!({"username": "admin", "password": "wrong"}),
      ))
      .await
      .unwrap();
    assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);
  }
}
