//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::comparison::AnalysisRun;
use crate::errors::AppError;
use crate::scoring::models::{ScoreResult, ScoringInput};
use crate::scoring::recommendations::sort_by_priority;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(flatten)]
    pub input: ScoringInput,
    /// Re-sort recommendations high → med → low instead of rule order.
    #[serde(default)]
    pub sort_by_priority: bool,
}

/// POST /api/v1/analysis/score
///
/// Scores plain text as-is. Empty fields are allowed and yield low scores.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResult>, AppError> {
    check_text_limits(&request.input, state.config.max_text_bytes)?;

    let mut result = run_scorer(&state, request.input).await?;
    if request.sort_by_priority {
        sort_by_priority(&mut result.recommendations);
    }

    Ok(Json(result))
}

/// POST /api/v1/analysis/run
///
/// Scores and returns an immutable run snapshot for the caller to persist.
pub async fn handle_run(
    State(state): State<AppState>,
    Json(input): Json<ScoringInput>,
) -> Result<Json<AnalysisRun>, AppError> {
    if input.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }
    if input.job_description_text.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description_text cannot be empty".to_string(),
        ));
    }
    check_text_limits(&input, state.config.max_text_bytes)?;

    let result = run_scorer(&state, input.clone()).await?;
    let run = AnalysisRun::record(input, result);

    info!(
        "Analysis run {} scored {} ({} recommendations)",
        run.run_id,
        run.overall_score,
        run.recommendations.len()
    );

    Ok(Json(run))
}

/// Scoring is CPU-bound, so it runs off the async executor.
async fn run_scorer(state: &AppState, input: ScoringInput) -> Result<ScoreResult, AppError> {
    let scorer = state.scorer.clone();
    let backend = scorer.backend();
    let result = tokio::task::spawn_blocking(move || scorer.score(&input))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("scoring task failed: {e}")))?;

    tracing::debug!(backend, overall_score = result.overall_score, "Scorer finished");
    Ok(result)
}

fn check_text_limits(input: &ScoringInput, max_bytes: usize) -> Result<(), AppError> {
    let fields = [
        ("resume_text", &input.resume_text),
        ("job_description_text", &input.job_description_text),
        ("job_title", &input.job_title),
    ];
    for (name, value) in fields {
        if value.len() > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "{name} is {} bytes; the limit is {max_bytes}",
                value.len()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_limits() {
        let input = ScoringInput {
            resume_text: "x".repeat(11),
            ..Default::default()
        };
        assert!(check_text_limits(&input, 11).is_ok());
        assert!(matches!(
            check_text_limits(&input, 10),
            Err(AppError::PayloadTooLarge(msg)) if msg.contains("resume_text")
        ));
    }

    #[test]
    fn test_score_request_flattens_input() {
        let request: ScoreRequest = serde_json::from_str(
            r#"{"resume_text": "r", "job_description_text": "jd", "sort_by_priority": true}"#,
        )
        .unwrap();
        assert_eq!(request.input.resume_text, "r");
        assert_eq!(request.input.job_title, "");
        assert!(request.sort_by_priority);
    }
}
