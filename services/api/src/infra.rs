use estate_desk::dashboard::performance::ScorecardEngine;
use estate_desk::dashboard::promotion::PromotionResolver;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Decision engines shared by every request.
#[derive(Clone)]
pub(crate) struct Engines {
    pub(crate) scorecard: Arc<ScorecardEngine>,
    pub(crate) promotion: Arc<PromotionResolver>,
}

/// One `--metric name=value` argument.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MetricSample {
    pub(crate) name: String,
    pub(crate) value: f64,
}

pub(crate) fn parse_metric(raw: &str) -> Result<MetricSample, String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("metric name missing in '{raw}'"));
    }
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse '{}' as a number ({err})", value.trim()))?;

    Ok(MetricSample {
        name: name.to_string(),
        value,
    })
}
