//! Run comparison — score/metric deltas between two analysis runs and simple
//! A/B experiments. Works on snapshots only; storing them is the caller's job.

pub mod handlers;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::errors::AppError;
use crate::scoring::metrics::{MetricKey, MetricSet};
use crate::scoring::models::{ScoreResult, ScoringInput};
use crate::scoring::recommendations::Recommendation;

const MAX_EXPERIMENT_NAME_CHARS: usize = 120;

#[derive(Debug, Error, PartialEq)]
pub enum ComparisonError {
    #[error("experiment name must be 1-120 characters")]
    InvalidName,
}

impl From<ComparisonError> for AppError {
    fn from(e: ComparisonError) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Immutable snapshot of one scoring invocation and the text it scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRun {
    pub run_id: Uuid,
    pub job_title: String,
    pub resume_text_snapshot: String,
    pub jd_text_snapshot: String,
    pub overall_score: u32,
    pub metrics: MetricSet,
    pub recommendations: Vec<Recommendation>,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRun {
    pub fn record(input: ScoringInput, result: ScoreResult) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            job_title: input.job_title,
            resume_text_snapshot: input.resume_text,
            jd_text_snapshot: input.job_description_text,
            overall_score: result.overall_score,
            metrics: result.metrics,
            recommendations: result.recommendations,
            created_at: Utc::now(),
        }
    }
}

/// The scored part of a run. A full `AnalysisRun` JSON deserializes into this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub overall_score: u32,
    pub metrics: MetricSet,
}

/// `compare − base` for the overall score and every metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunDiff {
    pub base_run_id: Uuid,
    pub compare_run_id: Uuid,
    pub score_delta: i64,
    pub metric_deltas: BTreeMap<MetricKey, i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbComparison {
    pub experiment_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description_id: Option<String>,
    /// `b − a`; positive means variant B scored higher.
    pub score_delta: i64,
    pub a: RunSummary,
    pub b: RunSummary,
    pub compared_at: DateTime<Utc>,
}

pub fn diff_runs(base: &RunSummary, compare: &RunSummary) -> RunDiff {
    let metric_deltas = MetricKey::ALL
        .into_iter()
        .map(|key| (key, delta(base.metrics.get(key), compare.metrics.get(key))))
        .collect();

    RunDiff {
        base_run_id: base.run_id,
        compare_run_id: compare.run_id,
        score_delta: delta(base.overall_score, compare.overall_score),
        metric_deltas,
    }
}

pub fn compare_ab(
    name: &str,
    job_description_id: Option<String>,
    run_a: RunSummary,
    run_b: RunSummary,
) -> Result<AbComparison, ComparisonError> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_EXPERIMENT_NAME_CHARS {
        return Err(ComparisonError::InvalidName);
    }

    Ok(AbComparison {
        experiment_id: Uuid::new_v4(),
        name: name.to_string(),
        job_description_id,
        score_delta: delta(run_a.overall_score, run_b.overall_score),
        a: run_a,
        b: run_b,
        compared_at: Utc::now(),
    })
}

fn delta(from: u32, to: u32) -> i64 {
    i64::from(to) - i64::from(from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score_resume;

    fn summary(overall: u32, metrics: [u32; 5]) -> RunSummary {
        RunSummary {
            run_id: Uuid::new_v4(),
            overall_score: overall,
            metrics: MetricSet {
                keyword_coverage: metrics[0],
                skills_match: metrics[1],
                role_alignment: metrics[2],
                formatting_risk: metrics[3],
                tenure_clarity: metrics[4],
            },
        }
    }

    #[test]
    fn test_diff_is_compare_minus_base() {
        let base = summary(40, [30, 60, 60, 50, 10]);
        let compare = summary(55, [50, 60, 100, 45, 75]);
        let diff = diff_runs(&base, &compare);

        assert_eq!(diff.base_run_id, base.run_id);
        assert_eq!(diff.compare_run_id, compare.run_id);
        assert_eq!(diff.score_delta, 15);
        assert_eq!(diff.metric_deltas[&MetricKey::KeywordCoverage], 20);
        assert_eq!(diff.metric_deltas[&MetricKey::SkillsMatch], 0);
        assert_eq!(diff.metric_deltas[&MetricKey::RoleAlignment], 40);
        assert_eq!(diff.metric_deltas[&MetricKey::FormattingRisk], -5);
        assert_eq!(diff.metric_deltas[&MetricKey::TenureClarity], 65);
    }

    #[test]
    fn test_diff_serializes_all_keys_in_order() {
        let run = summary(10, [0; 5]);
        let json = serde_json::to_string(&diff_runs(&run, &run)).unwrap();
        let kc = json.find("keyword_coverage").unwrap();
        let tc = json.find("tenure_clarity").unwrap();
        assert!(kc < tc);
        assert!(json.contains(r#""score_delta":0"#));
    }

    #[test]
    fn test_compare_ab_delta_and_name() {
        let a = summary(70, [0; 5]);
        let b = summary(64, [0; 5]);
        let cmp = compare_ab("  Shorter summary  ", Some("jd-1".into()), a, b).unwrap();
        assert_eq!(cmp.name, "Shorter summary");
        assert_eq!(cmp.score_delta, -6);
        assert_eq!(cmp.a.run_id, a.run_id);
        assert_eq!(cmp.job_description_id.as_deref(), Some("jd-1"));
    }

    #[test]
    fn test_compare_ab_rejects_bad_names() {
        let a = summary(1, [0; 5]);
        assert_eq!(
            compare_ab("   ", None, a, a).unwrap_err(),
            ComparisonError::InvalidName
        );
        assert!(compare_ab(&"x".repeat(121), None, a, a).is_err());
        assert!(compare_ab(&"x".repeat(120), None, a, a).is_ok());
    }

    #[test]
    fn test_record_snapshots_inputs() {
        let input = ScoringInput {
            resume_text: "Summary\njane@example.com".to_string(),
            job_description_text: "Rust engineer".to_string(),
            job_title: "Engineer".to_string(),
        };
        let result = score_resume(&input);
        let run = AnalysisRun::record(input.clone(), result.clone());

        assert_eq!(run.resume_text_snapshot, input.resume_text);
        assert_eq!(run.jd_text_snapshot, input.job_description_text);
        assert_eq!(run.overall_score, result.overall_score);
        assert_eq!(run.metrics, result.metrics);
    }

    #[test]
    fn test_full_run_json_reads_as_summary() {
        let input = ScoringInput::default();
        let run = AnalysisRun::record(input.clone(), score_resume(&input));
        let json = serde_json::to_value(&run).unwrap();
        let summary: RunSummary = serde_json::from_value(json).unwrap();
        assert_eq!(summary.run_id, run.run_id);
        assert_eq!(summary.overall_score, run.overall_score);
        assert_eq!(summary.metrics, run.metrics);
    }
}
