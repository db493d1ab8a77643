pub const RESUME_PARSE_SYSTEM: &str = crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Template for structured resume extraction. `{raw_text}` is replaced with the document text.
pub const RESUME_PARSE_PROMPT: &str = r#"You are a resume parsing assistant. Extract structured data from the resume below into a single JSON object with exactly these keys:

{
  "name": string or null,
  "email": string or null,
  "mobile_number": string or null,
  "skills": [string],
  "college_name": [string] or null,
  "degree": [string] or null,
  "designation": [string] or null,
  "experience": [string] or null,
  "company_names": [string] or null,
  "total_experience": number
}

Rules:
- Copy values from the resume text. Do NOT infer or invent details.
- "experience" holds the lines of the work experience section, one entry per line.
- "total_experience" is the total years of work experience, rounded to 2 decimals; 0 if none.
- Use null for anything the resume does not state.

Resume: """ {raw_text} """"#;
