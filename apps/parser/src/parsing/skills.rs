use std::collections::{BTreeSet, HashSet};

/// Built-in skills vocabulary. Lowercase; multi-word entries are matched as n-grams.
/// Entries that collide with common English words or section headings
/// ("go", "r", "c", "leadership") are left out.
const BUILTIN_SKILLS: &[&str] = &[
    // languages
    "python", "java", "javascript", "typescript", "rust", "golang", "c++", "c#",
    "ruby", "php", "scala", "kotlin", "swift", "perl", "haskell", "elixir", "matlab",
    "bash", "shell scripting", "sql", "html", "css", "objective-c", "dart", "lua",
    // data
    "mysql", "postgresql", "sqlite", "mongodb", "redis", "cassandra", "elasticsearch",
    "oracle", "dynamodb", "kafka", "spark", "hadoop", "airflow", "etl", "tableau",
    "power bi", "excel", "data analysis", "data visualization", "statistics",
    // ml
    "machine learning", "deep learning", "nlp", "natural language processing",
    "computer vision", "tensorflow", "pytorch", "keras", "scikit-learn", "pandas",
    "numpy", "opencv",
    // web
    "react", "angular", "vue", "node.js", "express.js", "django", "flask", "spring",
    "spring boot", "rails", "graphql", "rest api", "api", "jquery", "bootstrap", "next.js",
    // infra
    "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "ansible", "jenkins",
    "linux", "git", "ci/cd", "devops", "microservices", "nginx",
    // practice
    "agile", "scrum", "jira", "testing", "unit testing", "system design",
    "project management", "communication", "product management",
    "ui", "ux", "figma", "photoshop",
];

/// Matches resume text against a skills vocabulary using 1–3 word n-grams.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    vocab: HashSet<String>,
    max_ngram: usize,
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::from_list(BUILTIN_SKILLS.iter().map(|s| s.to_string()))
    }
}

impl SkillMatcher {
    pub fn from_list(skills: impl IntoIterator<Item = String>) -> Self {
        let vocab: HashSet<String> = skills
            .into_iter()
            .map(|s| tokenize(&s).join(" "))
            .filter(|s| !s.is_empty())
            .collect();
        let max_ngram = vocab
            .iter()
            .map(|s| s.split(' ').count())
            .max()
            .unwrap_or(1)
            .clamp(1, 3);
        Self { vocab, max_ngram }
    }

    /// Lowercase skills found in `text`, sorted and unique.
    pub fn find(&self, text: &str) -> Vec<String> {
        let tokens = tokenize(text);
        let mut found = BTreeSet::new();

        for n in 1..=self.max_ngram {
            for window in tokens.windows(n) {
                let candidate = window.join(" ");
                if self.vocab.contains(&candidate) {
                    found.insert(candidate);
                }
            }
        }

        found.into_iter().collect()
    }
}

/// Lowercase word tokens. `+`, `#`, `.`, `-` and `/` are kept inside a token
/// so `c++`, `c#`, `node.js`, `ci/cd` survive; trailing sentence dots are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || "+#.-/".contains(c)))
        .map(|t| t.trim_end_matches('.').trim_matches(['-', '/']))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_keeps_symbols() {
        assert_eq!(
            tokenize("C++, C#, Node.js and CI/CD."),
            vec!["c++", "c#", "node.js", "and", "ci/cd"]
        );
    }

    #[test]
    fn test_finds_unigrams_and_bigrams() {
        let matcher = SkillMatcher::default();
        let found = matcher.find("Skills: Python, SQL, Machine Learning and Docker.");
        assert_eq!(found, vec!["docker", "machine learning", "python", "sql"]);
    }

    #[test]
    fn test_no_false_positive_on_common_words() {
        let matcher = SkillMatcher::default();
        assert!(matcher.find("I like to go for a run, see you there").is_empty());
    }

    #[test]
    fn test_custom_vocabulary_replaces_builtin() {
        let matcher = SkillMatcher::from_list(vec!["Terraform".to_string(), "ansible".to_string()]);
        assert_eq!(
            matcher.find("Terraform, Ansible, Python"),
            vec!["ansible", "terraform"]
        );
    }

    #[test]
    fn test_results_are_deterministic() {
        let matcher = SkillMatcher::default();
        let text = "rust java python aws docker kubernetes";
        assert_eq!(matcher.find(text), matcher.find(text));
    }
}
