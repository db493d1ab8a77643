use serde::{Deserialize, Deserializer, Serialize};

/// Structured fields extracted from a resume.
///
/// Every key is always serialized; missing values are `null`. Optional list
/// fields are `None` rather than empty so the JSON shape matches what callers
/// of the Python `pyresparser` tool already consume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default)]
    pub college_name: Option<Vec<String>>,
    #[serde(default)]
    pub degree: Option<Vec<String>>,
    #[serde(default)]
    pub designation: Option<Vec<String>>,
    #[serde(default)]
    pub experience: Option<Vec<String>>,
    #[serde(default)]
    pub company_names: Option<Vec<String>>,
    #[serde(default)]
    pub no_of_pages: Option<usize>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_experience: f64,
}

impl ResumeData {
    /// Applies the output conventions shared by every backend:
    /// skills capitalized, sorted and unique; empty lists collapsed to `None`;
    /// blank strings collapsed to `None`.
    pub fn normalized(mut self) -> Self {
        self.skills = normalize_skills(self.skills);
        self.name = non_blank(self.name);
        self.email = non_blank(self.email);
        self.mobile_number = non_blank(self.mobile_number);
        self.college_name = non_empty(self.college_name);
        self.degree = non_empty(self.degree);
        self.designation = non_empty(self.designation);
        self.experience = non_empty(self.experience);
        self.company_names = non_empty(self.company_names);
        self.total_experience = round2(self.total_experience.max(0.0));
        self
    }
}

/// Model output sometimes sends `null` where a list or number is expected.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `"SQL"` -> `"Sql"`, `"machine learning"` -> `"Machine learning"`.
pub fn capitalize(skill: &str) -> String {
    let lower = skill.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn normalize_skills(skills: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = skills
        .iter()
        .map(|s| capitalize(s))
        .filter(|s| !s.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn non_empty(value: Option<Vec<String>>) -> Option<Vec<String>> {
    value
        .map(|v| {
            v.into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|v| !v.is_empty())
}
