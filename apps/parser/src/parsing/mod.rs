//! Resume parsing — the capability the binary calls into.
//!
//! Default: `HeuristicParser` (rule-based, deterministic, offline).
//! Opt-in: `LlmParser` (Claude), selected with `RESUME_PARSER_BACKEND=llm`.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use crate::config::{Backend, Config};
use crate::document::{extract_document, ExtractedDocument};
use crate::errors::ParseError;
use crate::llm_client::LlmClient;

pub mod dates;
pub mod heuristic;
pub mod llm;
pub mod models;
pub mod prompts;
pub mod sections;
pub mod skills;

use heuristic::HeuristicParser;
use llm::LlmParser;
use models::ResumeData;
use skills::SkillMatcher;

/// A backend that turns extracted document text into `ResumeData`.
/// Implement this to add a backend without touching the binary.
#[async_trait]
pub trait ResumeParser: Send + Sync {
    fn backend_name(&self) -> &'static str;

    async fn parse(&self, document: &ExtractedDocument) -> Result<ResumeData, ParseError>;
}

/// Builds the backend named by the configuration.
pub fn build_parser(config: &Config) -> Result<Box<dyn ResumeParser>> {
    match config.backend {
        Backend::Heuristic => {
            let skills = match config.load_skills()? {
                Some(list) => {
                    info!("Loaded {} custom skills", list.len());
                    SkillMatcher::from_list(list)
                }
                None => SkillMatcher::default(),
            };
            Ok(Box::new(HeuristicParser::new(skills)))
        }
        Backend::Llm => {
            let api_key = config
                .anthropic_api_key
                .clone()
                .context("ANTHROPIC_API_KEY is required for the llm backend")?;
            let llm = LlmClient::new(api_key).context("Failed to build LLM client")?;
            Ok(Box::new(LlmParser::new(llm)))
        }
    }
}

/// Extracts the document at `path` and runs `parser` on it.
pub async fn parse_resume_file(
    path: &Path,
    parser: &dyn ResumeParser,
) -> Result<ResumeData, ParseError> {
    let document = extract_document(path).await?;
    parser.parse(&document).await
}
