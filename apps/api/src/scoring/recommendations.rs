//! Recommendation Generator — turns metric deficits into an explained action list.
//!
//! Rules run in a fixed order and each appends at most one recommendation, so
//! a run yields between zero and six. Nothing is merged or dropped; callers
//! that want priority order use `sort_by_priority`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::skills::SkillCoverage;
use crate::scoring::structure::{LengthBucket, LengthCheck, StructureCheck};

/// Missing-keyword count at which the keyword recommendation becomes high priority.
const MANY_MISSING_KEYWORDS: usize = 6;
/// Missing-skill count at which the skills recommendation becomes high priority.
const MANY_MISSING_SKILLS: usize = 3;
/// Tenure scores below this trigger the date range recommendation.
const TENURE_THRESHOLD: u32 = 45;

/// Ordered by rank: `High < Med < Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Med,
    Low,
}

/// Evidence attached to a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationData {
    MissingKeywords(Vec<String>),
    MissingSkills(Vec<String>),
    MissingSections(Vec<String>),
    MissingContact(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub rationale: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RecommendationData>,
}

impl Recommendation {
    fn new(
        title: impl Into<String>,
        rationale: impl Into<String>,
        priority: Priority,
        data: Option<RecommendationData>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            rationale: rationale.into(),
            priority,
            data,
        }
    }
}

/// Everything the rule list looks at.
pub struct RecommendationSignals<'a> {
    pub missing_keywords: &'a [String],
    pub skills: &'a SkillCoverage,
    pub sections: &'a StructureCheck,
    pub contact: &'a StructureCheck,
    pub length: &'a LengthCheck,
    pub tenure_clarity: u32,
}

pub fn build_recommendations(signals: &RecommendationSignals<'_>) -> Vec<Recommendation> {
    [
        keyword_rule(signals.missing_keywords),
        skills_rule(signals.skills),
        sections_rule(signals.sections),
        contact_rule(signals.contact),
        length_rule(signals.length),
        tenure_rule(signals.tenure_clarity),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Stable sort by priority rank; equal priorities keep generation order.
pub fn sort_by_priority(recommendations: &mut [Recommendation]) {
    recommendations.sort_by_key(|r| r.priority);
}

fn keyword_rule(missing: &[String]) -> Option<Recommendation> {
    let data = Some(RecommendationData::MissingKeywords(missing.to_vec()));
    match missing.len() {
        0 => None,
        n if n >= MANY_MISSING_KEYWORDS => Some(Recommendation::new(
            "Add missing keywords from the job description",
            format!(
                "You are missing {n} high-signal keywords found in the job description. \
                 Add the ones you genuinely have experience with."
            ),
            Priority::High,
            data,
        )),
        _ => Some(Recommendation::new(
            "Consider adding a few relevant keywords",
            "A small number of key terms are not present. Ensure your resume mirrors the job \
             description vocabulary where truthful.",
            Priority::Med,
            data,
        )),
    }
}

fn skills_rule(skills: &SkillCoverage) -> Option<Recommendation> {
    if skills.missing.is_empty() {
        return None;
    }
    let priority = if skills.missing.len() >= MANY_MISSING_SKILLS {
        Priority::High
    } else {
        Priority::Med
    };
    Some(Recommendation::new(
        "Reflect required skills explicitly",
        "Some explicitly mentioned technologies/skills are not detected in your resume. Add them \
         to Skills or relevant experience bullets if applicable.",
        priority,
        Some(RecommendationData::MissingSkills(skills.missing.clone())),
    ))
}

fn sections_rule(sections: &StructureCheck) -> Option<Recommendation> {
    if sections.missing.is_empty() {
        return None;
    }
    Some(Recommendation::new(
        "Strengthen section structure",
        format!(
            "ATS parsers perform better with standard section headers. Missing sections: {}.",
            sections.missing.join(", ")
        ),
        Priority::Med,
        Some(RecommendationData::MissingSections(sections.missing.clone())),
    ))
}

fn contact_rule(contact: &StructureCheck) -> Option<Recommendation> {
    if contact.missing.is_empty() {
        return None;
    }
    Some(Recommendation::new(
        "Ensure contact details are present and parseable",
        format!(
            "Missing: {}. Add them in plain text at the top (avoid headers/footers).",
            contact.missing.join(", ")
        ),
        Priority::High,
        Some(RecommendationData::MissingContact(contact.missing.clone())),
    ))
}

fn length_rule(length: &LengthCheck) -> Option<Recommendation> {
    let (title, rationale) = match length.bucket {
        LengthBucket::Ok => return None,
        LengthBucket::Low => (
            "Add more substantive detail",
            "Your resume text looks short for ATS evaluation. Add measurable outcomes and \
             relevant keywords in Experience.",
        ),
        LengthBucket::High => (
            "Reduce resume length",
            "Your resume text looks long, which can dilute keyword signals. Consider tightening \
             bullets and removing redundant sections.",
        ),
    };
    Some(Recommendation::new(title, rationale, Priority::Low, None))
}

fn tenure_rule(tenure_clarity: u32) -> Option<Recommendation> {
    if tenure_clarity >= TENURE_THRESHOLD {
        return None;
    }
    Some(Recommendation::new(
        "Make date ranges consistent",
        "Date ranges (e.g., 2021–2024 or Jan 2021–Present) help ATS infer tenure and continuity. \
         Use a consistent format across roles.",
        Priority::Low,
        None,
    ))
}
