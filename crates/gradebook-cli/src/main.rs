//! `gradebook` — seeding and reporting CLI for the gradebook server.
//!
//! # Usage
//!
//! ```
//! gradebook seed
//! gradebook --url http://localhost:5001 seed-extra
//! gradebook stats --student-id 2024001
//! ```

mod client;
mod seed;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use serde::Deserialize;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "gradebook", about = "Seed and inspect a gradebook server")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the gradebook server (default: http://localhost:5001).
  #[arg(long, env = "GRADEBOOK_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Load the canonical sample dataset: 5 students, 25 grades.
  Seed,
  /// Add the extended dataset: 8 more students with generated grades.
  SeedExtra,
  /// Print grade statistics, optionally for one student.
  Stats {
    #[arg(long)]
    student_id: Option<String>,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| "http://localhost:5001".to_string());

  let client = ApiClient::new(ApiConfig { base_url })?;

  client
    .health()
    .await
    .context("gradebook server is not reachable; start it first")?;

  match args.command {
    Command::Seed => seed_sample(&client).await,
    Command::SeedExtra => seed_extra(&client).await,
    Command::Stats { student_id } => print_stats(&client, student_id.as_deref()).await,
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn seed_sample(client: &ApiClient) -> Result<()> {
  println!("seeding sample data");

  let mut added_students = 0;
  for student in seed::sample_students() {
    let reply = client.add_student(&student).await?;
    if reply.success {
      println!("  added student {} ({})", student.name, student.student_id);
      added_students += 1;
    } else {
      println!(
        "  skipped {}: {}",
        student.name,
        reply.message.unwrap_or_default()
      );
    }
  }

  let mut added_grades = 0;
  for grade in seed::sample_grades() {
    if client.add_grade(&grade).await?.success {
      added_grades += 1;
    }
  }

  println!("seed complete: {added_students} students, {added_grades} grades");
  print_stats(client, None).await
}

async fn seed_extra(client: &ApiClient) -> Result<()> {
  println!("adding extended data");

  let mut added = Vec::new();
  for student in seed::extra_students() {
    let reply = client.add_student(&student).await?;
    if reply.success {
      println!(
        "  added student {} ({}) - {}",
        student.name, student.student_id, student.class_name
      );
      added.push(student);
    } else {
      println!(
        "  skipped {}: {}",
        student.name,
        reply.message.unwrap_or_default()
      );
    }
  }

  let mut added_grades = 0;
  for (index, student) in added.iter().enumerate() {
    for grade in seed::generated_grades(&student.student_id, index) {
      if client.add_grade(&grade).await?.success {
        added_grades += 1;
      }
    }
  }
  println!("  added {added_grades} grade records");

  let students = client.list_students().await?;
  let grades = client.list_grades().await?;
  println!("totals: {} students, {} grades", students.len(), grades.len());

  print_stats(client, None).await
}

async fn print_stats(client: &ApiClient, student_id: Option<&str>) -> Result<()> {
  let summary = client.statistics(student_id).await?;
  match student_id {
    Some(student_id) => println!("grade statistics for {student_id}:"),
    None => println!("grade statistics:"),
  }
  println!("  count:   {}", summary.count);
  println!("  average: {}", summary.average);
  println!("  max:     {}", summary.max);
  println!("  min:     {}", summary.min);
  Ok(())
}
