use async_trait::async_trait;
use tracing::{info, warn};

use crate::document::ExtractedDocument;
use crate::errors::ParseError;
use crate::llm_client::{LlmClient, MODEL};
use crate::parsing::models::ResumeData;
use crate::parsing::prompts::{RESUME_PARSE_PROMPT, RESUME_PARSE_SYSTEM};
use crate::parsing::ResumeParser;

/// Upper bound on resume text sent to the model, in characters.
const MAX_PROMPT_CHARS: usize = 30_000;

/// Semantic extraction via Claude. Opt-in with `RESUME_PARSER_BACKEND=llm`.
pub struct LlmParser {
    llm: LlmClient,
}

impl LlmParser {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeParser for LlmParser {
    fn backend_name(&self) -> &'static str {
        "llm"
    }

    async fn parse(&self, document: &ExtractedDocument) -> Result<ResumeData, ParseError> {
        if document.is_blank() {
            warn!("Document has no text; skipping LLM call");
            return Ok(ResumeData {
                no_of_pages: document.page_count,
                ..Default::default()
            });
        }

        info!("Requesting resume extraction from {MODEL}");
        let data: ResumeData = self
            .llm
            .call_json(&build_prompt(&document.text), RESUME_PARSE_SYSTEM)
            .await?;

        Ok(finish(data, document))
    }
}

/// The page count always comes from the document, never from the model.
fn finish(data: ResumeData, document: &ExtractedDocument) -> ResumeData {
    ResumeData {
        no_of_pages: document.page_count,
        ..data
    }
    .normalized()
}

fn build_prompt(text: &str) -> String {
    RESUME_PARSE_PROMPT.replace("{raw_text}", truncate_chars(text, MAX_PROMPT_CHARS))
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> LlmParser {
        LlmParser::new(LlmClient::new("sk-test".to_string()).unwrap())
    }

    #[test]
    fn test_prompt_embeds_text() {
        let prompt = build_prompt("Jane Roe\njane@example.com");
        assert!(prompt.contains(r#"Resume: """ Jane Roe"#));
        assert!(!prompt.contains("{raw_text}"));
        assert!(prompt.contains("\"mobile_number\""));
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[tokio::test]
    async fn test_blank_document_skips_llm_call() {
        let doc = ExtractedDocument {
            text: "   \n".to_string(),
            page_count: Some(1),
        };
        let data = parser().parse(&doc).await.unwrap();
        assert_eq!(data.no_of_pages, Some(1));
        assert!(data.name.is_none());
        assert!(data.skills.is_empty());
    }

    #[test]
    fn test_model_output_is_normalized() {
        let doc = ExtractedDocument {
            text: "Ada Lovelace".to_string(),
            page_count: Some(2),
        };
        let raw: ResumeData = serde_json::from_str(
            r#"{
                "name": " Ada Lovelace ",
                "skills": ["python", "SQL", "Python", ""],
                "degree": [],
                "company_names": [" "],
                "no_of_pages": 7,
                "total_experience": 3.456
            }"#,
        )
        .unwrap();

        let data = finish(raw, &doc);
        assert_eq!(data.no_of_pages, Some(2));
        assert_eq!(data.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(data.skills, vec!["Python", "Sql"]);
        assert_eq!(data.degree, None);
        assert_eq!(data.company_names, None);
        assert!((data.total_experience - 3.46).abs() < 1e-9);
    }

    #[test]
    fn test_page_count_dropped_for_text_documents() {
        let doc = ExtractedDocument::from_text("Ada Lovelace");
        let raw = ResumeData {
            no_of_pages: Some(3),
            ..Default::default()
        };
        assert_eq!(finish(raw, &doc).no_of_pages, None);
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(parser().backend_name(), "llm");
    }
}
