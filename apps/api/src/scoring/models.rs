use serde::{Deserialize, Serialize};

use crate::scoring::metrics::MetricSet;
use crate::scoring::recommendations::Recommendation;

/// Plain-text inputs of one scoring run. Any field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringInput {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description_text: String,
    #[serde(default)]
    pub job_title: String,
}

/// Maximum number of missing keywords reported.
pub const MISSING_KEYWORD_CAP: usize = 12;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreDebug {
    pub jd_keyword_count: usize,
    pub matched_keyword_count: usize,
    /// JD keywords absent from the resume, in keyword rank order, capped at 12.
    pub missing_keywords: Vec<String>,
}

/// Full output of the engine for one resume / job description pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub overall_score: u32,
    pub metrics: MetricSet,
    pub recommendations: Vec<Recommendation>,
    pub debug: ScoreDebug,
}
