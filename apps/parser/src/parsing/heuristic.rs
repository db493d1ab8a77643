//! HeuristicParser — rule-based field extraction. Pure Rust, deterministic, no network.
//!
//! Field rules:
//! - name: first 2–4 word capitalized segment in the opening lines
//! - email / mobile_number: first well-formed match anywhere in the text
//! - skills: vocabulary n-gram match over the whole text
//! - college_name / degree: keyword lines (education section preferred for degrees)
//! - experience / designation / company_names / total_experience: experience section only

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::document::ExtractedDocument;
use crate::errors::ParseError;
use crate::parsing::dates::{parse_year, total_experience_years};
use crate::parsing::models::ResumeData;
use crate::parsing::sections::{is_heading_word, Section, SectionedText};
use crate::parsing::skills::SkillMatcher;
use crate::parsing::ResumeParser;

const NAME_SCAN_LINES: usize = 5;
const MAX_DESIGNATION_WORDS: usize = 8;

const COLLEGE_KEYWORDS: &[&str] = &["university", "college", "institute", "school", "academy"];

/// Degree markers compared after uppercasing and removing dots.
/// Markers of two letters must also be written in capitals ("ME" vs "me").
const DEGREE_MARKERS: &[&str] = &[
    "BE", "BS", "BSC", "BA", "BTECH", "BCOM", "BCA", "BBA", "ME", "MS", "MSC", "MA", "MTECH",
    "MCA", "MBA", "PHD", "BACHELOR", "BACHELORS", "BACHELOR'S", "MASTER", "MASTERS",
    "MASTER'S", "DIPLOMA", "SSC", "HSC",
];

const TITLE_WORDS: &[&str] = &[
    "engineer", "developer", "manager", "analyst", "intern", "consultant", "designer",
    "scientist", "architect", "lead", "administrator", "specialist", "director", "officer",
    "associate", "programmer",
];

const COMPANY_SUFFIXES: &[&str] = &[
    "inc", "llc", "ltd", "limited", "corp", "corporation", "pvt", "gmbh", "technologies",
    "solutions", "systems", "labs", "software", "company", "co",
];

/// Phrases that split "Title at Company, City" style lines.
const CLAUSE_SEPARATORS: &[&str] = &[" at ", " @ ", " - ", " – ", " — ", " | ", ", "];

pub struct HeuristicParser {
    skills: SkillMatcher,
}

impl HeuristicParser {
    pub fn new(skills: SkillMatcher) -> Self {
        Self { skills }
    }

    /// Runs every field rule against `document`, resolving "Present" against `today`.
    pub fn extract(&self, document: &ExtractedDocument, today: NaiveDate) -> ResumeData {
        let text = &document.text;
        let sections = SectionedText::segment(text);
        let all_lines = sections.all_lines();

        let experience: Vec<String> = sections
            .lines(Section::Experience)
            .into_iter()
            .map(String::from)
            .collect();

        let degree_source = if sections.has(Section::Education) {
            sections.lines(Section::Education)
        } else {
            all_lines.clone()
        };

        debug!(
            "Heuristic extraction: {} lines, {} experience lines",
            all_lines.len(),
            experience.len()
        );

        ResumeData {
            name: find_name(&all_lines),
            email: find_email(text),
            mobile_number: find_mobile_number(text),
            skills: self.skills.find(text),
            college_name: Some(find_colleges(&all_lines)),
            degree: Some(find_degrees(&degree_source)),
            designation: Some(find_designations(&experience)),
            company_names: Some(find_companies(&experience)),
            total_experience: total_experience_years(
                experience.iter().map(String::as_str),
                today,
            ),
            experience: Some(experience),
            no_of_pages: document.page_count,
        }
        .normalized()
    }
}

impl Default for HeuristicParser {
    fn default() -> Self {
        Self::new(SkillMatcher::default())
    }
}

#[async_trait]
impl ResumeParser for HeuristicParser {
    fn backend_name(&self) -> &'static str {
        "heuristic"
    }

    async fn parse(&self, document: &ExtractedDocument) -> Result<ResumeData, ParseError> {
        Ok(self.extract(document, Utc::now().date_naive()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Contact fields
// ────────────────────────────────────────────────────────────────────────────

fn find_name(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .take(NAME_SCAN_LINES)
        .flat_map(|line| line.split([',', '|', '•', '\t']))
        .map(str::trim)
        .find(|segment| looks_like_name(segment))
        .map(String::from)
}

fn looks_like_name(segment: &str) -> bool {
    let words: Vec<&str> = segment.split_whitespace().collect();
    if !(2..=4).contains(&words.len()) {
        return false;
    }
    let lower = segment.to_lowercase();
    if lower.contains("resume") || lower.contains("curriculum") || is_heading_word(segment) {
        return false;
    }
    words.iter().all(|w| {
        w.chars().next().is_some_and(char::is_uppercase)
            && w.chars().all(|c| c.is_alphabetic() || matches!(c, '.' | '\'' | '-'))
            && !is_heading_word(w)
    })
}

fn find_email(text: &str) -> Option<String> {
    text.split(|c: char| {
        c.is_whitespace() || matches!(c, ',' | ';' | '<' | '>' | '(' | ')' | '|' | ':' | '"')
    })
    .map(|t| t.trim_end_matches(['.', '!', '?']))
    .find(|t| is_email(t))
    .map(String::from)
}

fn is_email(token: &str) -> bool {
    let Some((local, domain)) = token.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let labels: Vec<&str> = domain.split('.').collect();
    let domain_ok = labels.len() >= 2
        && labels
            .iter()
            .all(|l| !l.is_empty() && l.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));
    local_ok && domain_ok && tld_ok
}

fn find_mobile_number(text: &str) -> Option<String> {
    let mut run = String::new();

    for c in text.chars().chain(std::iter::once('\n')) {
        let continues = c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')');
        let starts = c.is_ascii_digit() || c == '+' || c == '(';
        if (run.is_empty() && starts) || (!run.is_empty() && continues) {
            run.push(c);
            continue;
        }
        if let Some(number) = phone_candidate(&run) {
            return Some(number);
        }
        run.clear();
        if starts {
            run.push(c);
        }
    }
    None
}

fn phone_candidate(run: &str) -> Option<String> {
    let trimmed = run.trim_end_matches([' ', '-', '.', '(']).trim();
    let digits = trimmed.chars().filter(char::is_ascii_digit).count();
    if !(10..=15).contains(&digits) || is_year_chain(trimmed) {
        return None;
    }
    Some(trimmed.to_string())
}

/// `2012 - 2016 - 2019` is a run of years, not a phone number.
fn is_year_chain(run: &str) -> bool {
    run.split(|c: char| c == '-' || c.is_whitespace())
        .filter(|g| !g.is_empty())
        .all(|g| parse_year(g).is_some())
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

fn find_colleges(lines: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    for line in lines {
        let lower = line.to_lowercase();
        if COLLEGE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            push_unique(&mut out, line);
        }
    }
    out
}

fn find_degrees(lines: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    for line in lines {
        let mut tokens = line.split(|c: char| c.is_whitespace() || matches!(c, ',' | '(' | ')'));
        if tokens.any(is_degree_token) {
            push_unique(&mut out, line);
        }
    }
    out
}

fn is_degree_token(token: &str) -> bool {
    let stripped: String = token.chars().filter(|c| *c != '.').collect();
    if stripped.is_empty() {
        return false;
    }
    let upper = stripped.to_uppercase();
    if !DEGREE_MARKERS.contains(&upper.as_str()) {
        return false;
    }
    upper.len() > 2 || stripped == upper
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

fn find_designations(experience: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    for line in experience {
        if line.split_whitespace().count() > MAX_DESIGNATION_WORDS {
            continue;
        }
        let title = first_clause(line);
        if contains_word(title, TITLE_WORDS) {
            push_unique(&mut out, title);
        }
    }
    out
}

fn find_companies(experience: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    for line in experience {
        for segment in split_clauses(line) {
            // "Foo Labs (May 2017" once the date range has been split off
            let segment = segment.split_once('(').map_or(segment, |(head, _)| head).trim();
            let last = segment
                .split_whitespace()
                .last()
                .map(|w| w.trim_end_matches(['.', ',']).to_lowercase());
            if last.is_some_and(|w| COMPANY_SUFFIXES.contains(&w.as_str())) {
                push_unique(&mut out, segment);
            }
        }
    }
    out
}

fn first_clause(line: &str) -> &str {
    CLAUSE_SEPARATORS
        .iter()
        .filter_map(|sep| line.find(*sep))
        .min()
        .map(|idx| line[..idx].trim())
        .unwrap_or(line.trim())
}

fn split_clauses(line: &str) -> Vec<&str> {
    let mut segments = vec![line];
    for sep in CLAUSE_SEPARATORS {
        segments = segments.into_iter().flat_map(|s| s.split(*sep)).collect();
    }
    segments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn contains_word(text: &str, words: &[&str]) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|w| words.contains(&w.to_lowercase().as_str()))
}

fn push_unique(out: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() && !out.iter().any(|v| v == value) {
        out.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESUME: &str = "\
Jane Roe
jane.roe@example.com | +1 (555) 123-4567 | Berlin

Summary
Backend engineer with a focus on data systems.

Experience
Senior Software Engineer at Acme Inc
Jan 2021 - Dec 2022
Built a Kafka pipeline in Rust and Python processing 2M events/day.
Data Analyst, Globex Corporation
2018 - 2020

Education
B.Sc. in Computer Science
State University, 2014 - 2018

Skills: Rust, Python, SQL, Docker, Kubernetes
";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn extract(text: &str) -> ResumeData {
        HeuristicParser::default().extract(&ExtractedDocument::from_text(text), today())
    }

    #[test]
    fn test_single_line_resume() {
        let data = extract("John Doe, john@example.com, Skills: Python, SQL");
        assert_eq!(data.name.as_deref(), Some("John Doe"));
        assert_eq!(data.email.as_deref(), Some("john@example.com"));
        assert_eq!(data.skills, vec!["Python", "Sql"]);
        assert_eq!(data.experience, None);
        assert_eq!(data.total_experience, 0.0);
    }

    #[test]
    fn test_full_resume_contact_fields() {
        let data = extract(FULL_RESUME);
        assert_eq!(data.name.as_deref(), Some("Jane Roe"));
        assert_eq!(data.email.as_deref(), Some("jane.roe@example.com"));
        assert_eq!(data.mobile_number.as_deref(), Some("+1 (555) 123-4567"));
    }

    #[test]
    fn test_full_resume_skills() {
        let data = extract(FULL_RESUME);
        assert_eq!(
            data.skills,
            vec!["Docker", "Kafka", "Kubernetes", "Python", "Rust", "Sql"]
        );
    }

    #[test]
    fn test_full_resume_experience_fields() {
        let data = extract(FULL_RESUME);
        assert_eq!(
            data.designation,
            Some(vec![
                "Senior Software Engineer".to_string(),
                "Data Analyst".to_string()
            ])
        );
        assert_eq!(
            data.company_names,
            Some(vec!["Acme Inc".to_string(), "Globex Corporation".to_string()])
        );
        assert_eq!(data.experience.as_ref().map(Vec::len), Some(5));
        // 24 months (2021-2022) + 24 months (2018-2020)
        assert!((data.total_experience - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_resume_education_fields() {
        let data = extract(FULL_RESUME);
        assert_eq!(
            data.college_name,
            Some(vec!["State University, 2014 - 2018".to_string()])
        );
        assert_eq!(data.degree, Some(vec!["B.Sc. in Computer Science".to_string()]));
    }

    #[test]
    fn test_education_dates_do_not_count_as_experience() {
        let data = extract("Education\nMIT, 2010 - 2014\n");
        assert_eq!(data.total_experience, 0.0);
    }

    #[test]
    fn test_page_count_carried_over() {
        let doc = ExtractedDocument {
            text: "Jane Roe".to_string(),
            page_count: Some(2),
        };
        let data = HeuristicParser::default().extract(&doc, today());
        assert_eq!(data.no_of_pages, Some(2));
    }

    #[test]
    fn test_blank_document_yields_empty_fields() {
        let data = extract("");
        assert_eq!(data, ResumeData::default());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        assert_eq!(extract(FULL_RESUME), extract(FULL_RESUME));
    }

    #[test]
    fn test_email_rejects_malformed() {
        assert!(is_email("a.b@c.io"));
        assert!(!is_email("@c.io"));
        assert!(!is_email("a@localhost"));
        assert!(!is_email("a@b.c"));
        assert!(!is_email("a@b..com"));
    }

    #[test]
    fn test_email_strips_trailing_punctuation() {
        assert_eq!(
            find_email("Contact me at mailto:dev@corp.org.").as_deref(),
            Some("dev@corp.org")
        );
    }

    #[test]
    fn test_mobile_number_digit_bounds() {
        assert_eq!(find_mobile_number("call 555-1234"), None);
        assert_eq!(
            find_mobile_number("Phone: 9876543210, Pune").as_deref(),
            Some("9876543210")
        );
        assert_eq!(find_mobile_number("2019 - 2021"), None);
    }

    #[test]
    fn test_year_chain_is_not_a_phone_number() {
        let data = extract("Education\nB.Tech 2012 - 2016 - 2019");
        assert_eq!(data.mobile_number, None);
        assert_eq!(
            find_mobile_number("2012 - 2016 - 2019, call +91 98765 43210").as_deref(),
            Some("+91 98765 43210")
        );
    }

    #[test]
    fn test_company_before_bracketed_dates() {
        let data = extract("Experience\nIntern at Foo Labs (May 2017 - Jul 2017)");
        assert_eq!(data.company_names, Some(vec!["Foo Labs".to_string()]));
        assert_eq!(data.designation, Some(vec!["Intern".to_string()]));
    }

    #[test]
    fn test_name_rejects_headings_and_lowercase() {
        assert!(!looks_like_name("Work Experience"));
        assert!(!looks_like_name("john doe"));
        assert!(!looks_like_name("Curriculum Vitae"));
        assert!(looks_like_name("Mary-Jane O'Neil"));
    }

    #[test]
    fn test_degree_short_markers_need_capitals() {
        assert!(is_degree_token("B.E."));
        assert!(is_degree_token("MBA"));
        assert!(is_degree_token("PhD"));
        assert!(!is_degree_token("me"));
        assert!(!is_degree_token("Ms"));
    }

    #[tokio::test]
    async fn test_trait_parse_uses_backend() {
        let parser = HeuristicParser::default();
        assert_eq!(parser.backend_name(), "heuristic");
        let data = parser
            .parse(&ExtractedDocument::from_text("Ada Lovelace\nada@example.com"))
            .await
            .unwrap();
        assert_eq!(data.name.as_deref(), Some("Ada Lovelace"));
    }
}
