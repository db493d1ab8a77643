mod config;
mod document;
mod errors;
mod llm_client;
mod parsing;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::parsing::{build_parser, parse_resume_file};

/// Extracts structured data from a resume and prints it to stdout as JSON.
#[derive(Parser)]
#[command(name = "parse_resume", version, about)]
struct Cli {
    /// Path to the resume (PDF, DOCX or plain text)
    resume_path: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env()?;

    // stdout carries the JSON result; logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let parser = build_parser(&config)?;
    info!(
        "Parsing {} with the {} backend",
        cli.resume_path.display(),
        parser.backend_name()
    );

    let data = parse_resume_file(&cli.resume_path, parser.as_ref())
        .await
        .with_context(|| format!("Failed to parse resume '{}'", cli.resume_path.display()))?;

    let json = serde_json::to_string(&data).context("Failed to serialize extracted data")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    stdout.flush()?;

    Ok(())
}
