use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::dashboard::performance::domain::{Criterion, Target, TargetRule, Threshold};
use crate::dashboard::performance::{performance_router, PerformanceCriteria, ScorecardEngine};

pub(super) fn criterion(metric_name: &str, rule: &str, value: &str) -> Criterion {
    Criterion {
        metric_name: metric_name.to_string(),
        target: Target {
            rule: TargetRule::from(rule.to_string()),
            value: Threshold::new(value),
            value_min: None,
            value_max: None,
        },
    }
}

pub(super) fn range_criterion(metric_name: &str, min: Option<&str>, max: Option<&str>) -> Criterion {
    Criterion {
        metric_name: metric_name.to_string(),
        target: Target {
            rule: TargetRule::Range,
            value: Threshold::new("0"),
            value_min: min.map(Threshold::new),
            value_max: max.map(Threshold::new),
        },
    }
}

pub(super) fn criteria() -> PerformanceCriteria {
    PerformanceCriteria::new(vec![
        criterion("response_rate", "greater_than_or_equal", "80"),
        criterion("avg_response_hours", "less_than_or_equal", "2"),
        criterion("profile_verified", "binary", "1"),
        range_criterion("listing_quality_score", Some("70"), Some("100")),
    ])
}

pub(super) fn engine() -> ScorecardEngine {
    ScorecardEngine::new(criteria())
}

pub(super) fn metrics(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

pub(super) fn router() -> axum::Router {
    performance_router(Arc::new(engine()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
