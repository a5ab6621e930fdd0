use std::sync::Arc;

use crate::config::Config;
use crate::scoring::ResumeScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable scorer. Default: HeuristicScorer.
    pub scorer: Arc<dyn ResumeScorer>,
}

impl AppState {
    pub fn new(config: Config, scorer: Arc<dyn ResumeScorer>) -> Self {
        Self { config, scorer }
    }
}
