use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Which `ResumeParser` implementation handles the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    #[default]
    Heuristic,
    Llm,
}

impl Backend {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "heuristic" => Ok(Backend::Heuristic),
            "llm" => Ok(Backend::Llm),
            other => bail!("RESUME_PARSER_BACKEND must be 'heuristic' or 'llm', got '{other}'"),
        }
    }
}

/// Runtime configuration loaded from environment variables.
/// Every variable is optional; with none set the binary runs the heuristic backend.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: Backend,
    pub anthropic_api_key: Option<String>,
    pub skills_file: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let backend = match lookup("RESUME_PARSER_BACKEND") {
            Some(value) => Backend::parse(&value)?,
            None => Backend::default(),
        };

        let anthropic_api_key = lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty());
        if backend == Backend::Llm && anthropic_api_key.is_none() {
            bail!("ANTHROPIC_API_KEY is required when RESUME_PARSER_BACKEND=llm");
        }

        Ok(Config {
            backend,
            anthropic_api_key,
            skills_file: lookup("RESUME_SKILLS_FILE")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "warn".to_string()),
        })
    }

    /// Reads the custom skills vocabulary, if one is configured.
    pub fn load_skills(&self) -> Result<Option<Vec<String>>> {
        let Some(path) = &self.skills_file else {
            return Ok(None);
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skills file '{}'", path.display()))?;
        Ok(Some(parse_skills_list(&raw)))
    }
}

/// Splits a comma- or newline-separated vocabulary into lowercase entries.
pub fn parse_skills_list(raw: &str) -> Vec<String> {
    let mut skills: Vec<String> = raw
        .split(|c: char| c == ',' || c == '\n')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    skills.sort();
    skills.dedup();
    skills
}
