//! Minimal end-to-end run: analyze a fixture resume against a fixture job
//! description. Requires GEMINI_API_KEY in the environment (or a .env file).
//!
//! ```sh
//! cargo run --example analyze
//! ```

use anyhow::Result;
use engine::{Config, GeminiClient};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const RESUME: &str = "Jordan Reyes — Backend Engineer\n\
    Experience: Initech (2020-2025). Built billing and reporting services in \
    Rust and Python. Led the migration from a cron-based pipeline to an \
    event-driven architecture. Maintained CI/CD tooling for a 12-person team.";

const JOB_DESCRIPTION: &str = "Staff Backend Engineer. Required: 5+ years \
    building distributed systems, Rust, Kubernetes, and a track record of \
    mentoring. Nice to have: Terraform, event streaming experience.";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.rust_log.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("HireReady engine demo (endpoint: {})", config.gemini_api_url);

    let client = GeminiClient::from_config(&config);
    let report = client.analyze_resume(RESUME, JOB_DESCRIPTION).await?;

    println!("ATS score: {}/100", report.ats_score);
    println!("Keyword gaps:");
    for gap in &report.feedback.keyword_gaps {
        println!("  - {gap}");
    }
    println!("Keyword strengths:");
    for strength in &report.feedback.keyword_strengths {
        println!("  - {strength}");
    }
    for advice in &report.feedback.content_improvements {
        println!("content [{:?}]: {}", advice.kind, advice.detail);
    }

    Ok(())
}
