use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::comparison::{compare_ab, diff_runs, AbComparison, RunDiff, RunSummary};
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct DiffRequest {
    pub base: RunSummary,
    pub compare: RunSummary,
}

#[derive(Debug, Deserialize)]
pub struct ExperimentRequest {
    pub name: String,
    #[serde(default)]
    pub job_description_id: Option<String>,
    pub run_a: RunSummary,
    pub run_b: RunSummary,
}

/// POST /api/v1/runs/diff
pub async fn handle_diff(Json(request): Json<DiffRequest>) -> Result<Json<RunDiff>, AppError> {
    let diff = diff_runs(&request.base, &request.compare);
    info!(
        "Diffed run {} against {}: score delta {}",
        diff.base_run_id, diff.compare_run_id, diff.score_delta
    );
    Ok(Json(diff))
}

/// POST /api/v1/experiments
pub async fn handle_experiment(
    Json(request): Json<ExperimentRequest>,
) -> Result<Json<AbComparison>, AppError> {
    let comparison = compare_ab(
        &request.name,
        request.job_description_id,
        request.run_a,
        request.run_b,
    )?;
    info!(
        "Experiment '{}' ({}): B - A = {}",
        comparison.name, comparison.experiment_id, comparison.score_delta
    );
    Ok(Json(comparison))
}
