//! Resume scoring engine — a pure, synchronous pipeline from plain text to a
//! `ScoreResult`.
//!
//! Tokenizer → {keywords, skills, structure} → metrics → recommendations.
//! No I/O and no shared mutable state: concurrent callers need no locking.
//!
//! `AppState` holds an `Arc<dyn ResumeScorer>`; `HeuristicScorer` is the default.

pub mod handlers;
pub mod keywords;
pub mod metrics;
pub mod models;
pub mod recommendations;
pub mod skills;
pub mod structure;
pub mod text;

use std::collections::HashSet;

use tracing::debug;

use crate::scoring::keywords::{extract_top_keywords, JD_KEYWORD_LIMIT, TITLE_KEYWORD_LIMIT};
use crate::scoring::metrics::{formatting_score, ratio_or, MetricSet, RawMetrics, NEUTRAL_SCORE};
use crate::scoring::models::{ScoreDebug, ScoreResult, ScoringInput, MISSING_KEYWORD_CAP};
use crate::scoring::recommendations::{build_recommendations, RecommendationSignals};
use crate::scoring::skills::skill_coverage;
use crate::scoring::structure::{contact_check, length_check, section_check, tenure_score};
use crate::scoring::text::tokenize_words;

/// The scorer trait. Implement this to swap backends without touching handlers.
pub trait ResumeScorer: Send + Sync {
    fn score(&self, input: &ScoringInput) -> ScoreResult;

    /// Short backend label, logged with every run.
    fn backend(&self) -> &'static str;
}

/// Heuristic keyword/regex scorer. Deterministic apart from recommendation ids.
pub struct HeuristicScorer;

impl ResumeScorer for HeuristicScorer {
    fn score(&self, input: &ScoringInput) -> ScoreResult {
        score_resume(input)
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}

/// Scores a resume against a job description and title. Never fails: empty or
/// noisy input produces low but valid scores.
pub fn score_resume(input: &ScoringInput) -> ScoreResult {
    let resume_text = input.resume_text.as_str();
    let job_title = input.job_title.as_str();
    let jd_with_title = format!("{job_title}\n{}", input.job_description_text);

    // Keyword coverage
    let jd_keywords = extract_top_keywords(&jd_with_title, JD_KEYWORD_LIMIT);
    let resume_words: HashSet<String> = tokenize_words(resume_text).into_iter().collect();
    let (matched_keywords, missing_keywords): (Vec<&String>, Vec<&String>) =
        jd_keywords.iter().partition(|k| resume_words.contains(*k));
    let keyword_coverage = ratio_or(matched_keywords.len(), jd_keywords.len(), 0.0);

    // Skills
    let skills = skill_coverage(&jd_with_title, resume_text);
    let skills_match = skills.ratio().unwrap_or(NEUTRAL_SCORE);

    // Role alignment
    let title_keywords = extract_top_keywords(job_title, TITLE_KEYWORD_LIMIT);
    let title_matched = title_keywords
        .iter()
        .filter(|k| resume_words.contains(*k))
        .count();
    let role_alignment = ratio_or(title_matched, title_keywords.len(), NEUTRAL_SCORE);

    // Structure
    let sections = section_check(resume_text);
    let contact = contact_check(resume_text);
    let length = length_check(resume_text);
    let tenure = tenure_score(resume_text);

    let metrics = MetricSet::from_raw(RawMetrics {
        keyword_coverage,
        skills_match,
        role_alignment,
        formatting_risk: formatting_score(sections.score, contact.score, length.score),
        tenure_clarity: tenure as f64,
    });
    let overall_score = metrics.overall_score();

    let missing_keywords: Vec<String> = missing_keywords
        .into_iter()
        .take(MISSING_KEYWORD_CAP)
        .cloned()
        .collect();

    let recommendations = build_recommendations(&RecommendationSignals {
        missing_keywords: &missing_keywords,
        skills: &skills,
        sections: &sections,
        contact: &contact,
        length: &length,
        tenure_clarity: metrics.tenure_clarity,
    });

    debug!(
        overall_score,
        jd_keywords = jd_keywords.len(),
        matched_keywords = matched_keywords.len(),
        resume_words = length.word_count,
        recommendations = recommendations.len(),
        "Scored resume"
    );

    ScoreResult {
        overall_score,
        metrics,
        recommendations,
        debug: ScoreDebug {
            jd_keyword_count: jd_keywords.len(),
            matched_keyword_count: matched_keywords.len(),
            missing_keywords,
        },
    }
}
