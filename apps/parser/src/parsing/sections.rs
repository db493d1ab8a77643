//! Splits resume text into headed sections ("Experience", "Education", ...).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Everything before the first recognised heading (name, contact line).
    Header,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Accomplishments,
    Interests,
    Objective,
    Summary,
    Publications,
    Leadership,
}

const HEADINGS: &[(&str, Section)] = &[
    ("experience", Section::Experience),
    ("work experience", Section::Experience),
    ("professional experience", Section::Experience),
    ("employment history", Section::Experience),
    ("employment", Section::Experience),
    ("work history", Section::Experience),
    ("education", Section::Education),
    ("academic background", Section::Education),
    ("qualifications", Section::Education),
    ("skills", Section::Skills),
    ("technical skills", Section::Skills),
    ("key skills", Section::Skills),
    ("projects", Section::Projects),
    ("certifications", Section::Certifications),
    ("accomplishments", Section::Accomplishments),
    ("achievements", Section::Accomplishments),
    ("awards", Section::Accomplishments),
    ("interests", Section::Interests),
    ("hobbies", Section::Interests),
    ("objective", Section::Objective),
    ("career objective", Section::Objective),
    ("summary", Section::Summary),
    ("professional summary", Section::Summary),
    ("profile", Section::Summary),
    ("publications", Section::Publications),
    ("leadership", Section::Leadership),
];

/// Resume text grouped by section, in document order.
#[derive(Debug, Clone, Default)]
pub struct SectionedText {
    blocks: Vec<(Section, Vec<String>)>,
}

impl SectionedText {
    pub fn segment(text: &str) -> Self {
        let mut blocks: Vec<(Section, Vec<String>)> = vec![(Section::Header, Vec::new())];

        for raw in text.lines() {
            let line = clean_line(raw);
            if line.is_empty() {
                continue;
            }
            match match_heading(line) {
                Some((section, inline)) => {
                    let mut lines = Vec::new();
                    if let Some(content) = inline {
                        lines.push(content.to_string());
                    }
                    blocks.push((section, lines));
                }
                None => {
                    if let Some((_, lines)) = blocks.last_mut() {
                        lines.push(line.to_string());
                    }
                }
            }
        }

        Self { blocks }
    }

    /// Lines of every block with the given section, in order.
    pub fn lines(&self, section: Section) -> Vec<&str> {
        self.blocks
            .iter()
            .filter(|(s, _)| *s == section)
            .flat_map(|(_, lines)| lines.iter().map(String::as_str))
            .collect()
    }

    pub fn has(&self, section: Section) -> bool {
        self.blocks.iter().any(|(s, _)| *s == section)
    }

    /// Every non-heading line, in document order.
    pub fn all_lines(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .flat_map(|(_, lines)| lines.iter().map(String::as_str))
            .collect()
    }
}

/// Strips whitespace and leading bullet glyphs.
pub fn clean_line(line: &str) -> &str {
    line.trim()
        .trim_start_matches(['•', '●', '▪', '◦', '*', '-', '–', '·'])
        .trim()
}

pub fn is_heading_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    HEADINGS.iter().any(|(h, _)| *h == lower)
}

/// `"EXPERIENCE"`, `"Education:"` and `"Skills: Rust, Go"` are headings;
/// the last one also carries inline content.
fn match_heading(line: &str) -> Option<(Section, Option<&str>)> {
    let whole = line.trim_end_matches(':').trim();
    if let Some(section) = lookup(whole) {
        return Some((section, None));
    }

    let (head, rest) = line.split_once(':')?;
    let section = lookup(head.trim())?;
    let rest = rest.trim();
    Some((section, (!rest.is_empty()).then_some(rest)))
}

fn lookup(candidate: &str) -> Option<Section> {
    let lower = candidate.to_lowercase();
    HEADINGS
        .iter()
        .find(|(h, _)| *h == lower)
        .map(|(_, section)| *section)
}
