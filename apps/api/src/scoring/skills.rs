//! Fixed skill catalog and JD-vs-resume skill coverage.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scoring::text::ascii_word_boundaries;

/// A catalog entry: the label reported to users and its case-insensitive pattern.
pub struct SkillPattern {
    pub label: &'static str,
    pub re: Regex,
}

const CATALOG_SOURCE: &[(&str, &str)] = &[
    ("react", r"(?i)\breact(\.js)?\b"),
    ("typescript", r"(?i)\btypescript\b"),
    ("javascript", r"(?i)\bjavascript\b"),
    ("node", r"(?i)\bnode(\.js)?\b"),
    ("express", r"(?i)\bexpress(\.js)?\b"),
    ("mongodb", r"(?i)\bmongo(db)?\b"),
    ("sql", r"(?i)\bsql\b"),
    ("docker", r"(?i)\bdocker\b"),
    ("kubernetes", r"(?i)\bkubernetes\b|\bk8s\b"),
    ("aws", r"(?i)\baws\b|\bamazon web services\b"),
    ("gcp", r"(?i)\bgcp\b|\bgoogle cloud\b"),
    ("azure", r"(?i)\bazure\b"),
    ("git", r"(?i)\bgit\b"),
    ("ci/cd", r"(?i)\bci/?cd\b"),
    ("rest", r"(?i)\brest\b|\brestful\b"),
    ("graphql", r"(?i)\bgraphql\b"),
    ("testing", r"(?i)\bjest\b|\bvitest\b|\btesting\b|\bunit tests?\b"),
];

/// Compiled once; order is the reporting order for `jd_skills`, `matched` and `missing`.
pub static SKILL_CATALOG: LazyLock<Vec<SkillPattern>> = LazyLock::new(|| {
    CATALOG_SOURCE
        .iter()
        .map(|&(label, pattern)| SkillPattern {
            label,
            re: Regex::new(&ascii_word_boundaries(pattern)).expect("static skill regex"),
        })
        .collect()
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillCoverage {
    pub jd_skills: Vec<String>,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl SkillCoverage {
    /// Percentage of JD skills found in the resume; `None` when the JD names none.
    pub fn ratio(&self) -> Option<f64> {
        if self.jd_skills.is_empty() {
            None
        } else {
            Some(self.matched.len() as f64 / self.jd_skills.len() as f64 * 100.0)
        }
    }
}

pub fn skill_coverage(jd_text: &str, resume_text: &str) -> SkillCoverage {
    let mut coverage = SkillCoverage::default();

    for skill in SKILL_CATALOG.iter().filter(|s| s.re.is_match(jd_text)) {
        coverage.jd_skills.push(skill.label.to_string());
        if skill.re.is_match(resume_text) {
            coverage.matched.push(skill.label.to_string());
        } else {
            coverage.missing.push(skill.label.to_string());
        }
    }

    coverage
}
