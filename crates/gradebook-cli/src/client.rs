//! Async HTTP client wrapping the gradebook JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use gradebook_core::{
  model::{Grade, Student},
  stats::GradeSummary,
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

/// Connection settings for the gradebook API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// The `{success, message, data}` envelope every endpoint returns.
#[derive(Debug, Deserialize)]
pub struct Reply {
  pub success: bool,
  #[serde(default)]
  pub message: Option<String>,
  #[serde(default)]
  pub data:    Option<Value>,
}

/// Async HTTP client for the gradebook JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// `GET /api/health` — errors when the server is unreachable.
  pub async fn health(&self) -> Result<()> {
    let resp = self
      .client
      .get(self.url("/health"))
      .send()
      .await
      .context("GET /health failed")?;
    if !resp.status().is_success() {
      return Err(anyhow!("GET /health → {}", resp.status()));
    }
    Ok(())
  }

  /// `POST /api/students` — returns the reply envelope, success or not.
  pub async fn add_student(&self, student: &Student) -> Result<Reply> {
    let resp = self
      .client
      .post(self.url("/students"))
      .json(student)
      .send()
      .await
      .context("POST /students failed")?;
    resp.json().await.context("deserialising reply")
  }

  /// `POST /api/grades` — returns the reply envelope, success or not.
  pub async fn add_grade(&self, grade: &Grade) -> Result<Reply> {
    let resp = self
      .client
      .post(self.url("/grades"))
      .json(grade)
      .send()
      .await
      .context("POST /grades failed")?;
    resp.json().await.context("deserialising reply")
  }

  /// `GET /api/students`
  pub async fn list_students(&self) -> Result<Vec<Student>> {
    let resp = self
      .client
      .get(self.url("/students"))
      .send()
      .await
      .context("GET /students failed")?;
    if !resp.status().is_success() {
      return Err(anyhow!("GET /students → {}", resp.status()));
    }
    let reply: Reply = resp.json().await.context("deserialising students")?;
    serde_json::from_value(reply.data.unwrap_or(Value::Array(Vec::new())))
      .context("deserialising students")
  }

  /// `GET /api/grades`
  pub async fn list_grades(&self) -> Result<Vec<Grade>> {
    let resp = self
      .client
      .get(self.url("/grades"))
      .send()
      .await
      .context("GET /grades failed")?;
    if !resp.status().is_success() {
      return Err(anyhow!("GET /grades → {}", resp.status()));
    }
    let reply: Reply = resp.json().await.context("deserialising grades")?;
    serde_json::from_value(reply.data.unwrap_or(Value::Array(Vec::new())))
      .context("deserialising grades")
  }

  /// `GET /api/statistics[?student_id=<number>]`
  pub async fn statistics(&self, student_id: Option<&str>) -> Result<GradeSummary> {
    let mut req = self.client.get(self.url("/statistics"));
    if let Some(student_id) = student_id {
      req = req.query(&[("student_id", student_id)]);
    }
    let resp = req.send().await.context("GET /statistics failed")?;
    if !resp.status().is_success() {
      return Err(anyhow!("GET /statistics → {}", resp.status()));
    }
    let reply: Reply = resp.json().await.context("deserialising statistics")?;
    let data = reply.data.context("statistics reply carried no data")?;
    serde_json::from_value(data).context("deserialising statistics")
  }
}
