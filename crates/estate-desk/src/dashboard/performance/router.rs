use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::error::AppError;

use super::domain::Criterion;
use super::evaluation::{PerformanceCriteria, ScorecardEngine};

/// Request body for scoring one agent. `criteria` overrides the configured set.
#[derive(Debug, Deserialize)]
pub struct ScorecardRequest {
    pub metrics: BTreeMap<String, f64>,
    #[serde(default)]
    pub criteria: Option<Vec<Criterion>>,
}

/// Router builder exposing the agent performance endpoints.
pub fn performance_router(engine: Arc<ScorecardEngine>) -> Router {
    Router::new()
        .route("/api/v1/performance/criteria", get(criteria_handler))
        .route("/api/v1/performance/scorecard", post(scorecard_handler))
        .with_state(engine)
}

pub(crate) async fn criteria_handler(State(engine): State<Arc<ScorecardEngine>>) -> Response {
    (StatusCode::OK, Json(engine.criteria().clone())).into_response()
}

pub(crate) async fn scorecard_handler(
    State(engine): State<Arc<ScorecardEngine>>,
    payload: Result<Json<ScorecardRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(ScorecardRequest { metrics, criteria }) = payload?;

    let scorecard = match criteria {
        Some(criteria) => ScorecardEngine::new(PerformanceCriteria::new(criteria)).score(&metrics),
        None => engine.score(&metrics),
    };

    Ok((StatusCode::OK, Json(scorecard)).into_response())
}
