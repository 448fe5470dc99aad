use super::super::domain::{Criterion, Threshold, TargetRule};
use tracing::warn;

/// Decide whether `value` meets `criterion`. Missing criteria, unknown rules and
/// thresholds that are not numbers all resolve to `false`.
pub fn evaluate(value: f64, criterion: Option<&Criterion>) -> bool {
    let Some(criterion) = criterion else {
        return false;
    };
    let target = &criterion.target;

    match &target.rule {
        TargetRule::Binary | TargetRule::GreaterThanOrEqual => {
            value >= threshold(criterion, "value", &target.value)
        }
        TargetRule::LessThanOrEqual => value <= threshold(criterion, "value", &target.value),
        TargetRule::Range => match (&target.value_min, &target.value_max) {
            (Some(min), Some(max)) => {
                let min = threshold(criterion, "valueMin", min);
                let max = threshold(criterion, "valueMax", max);
                min <= value && value <= max
            }
            _ => {
                warn!(
                    metric = %criterion.metric_name,
                    "range criterion is missing valueMin or valueMax"
                );
                false
            }
        },
        TargetRule::Unknown(rule) => {
            warn!(metric = %criterion.metric_name, %rule, "unsupported criterion rule");
            false
        }
    }
}

fn threshold(criterion: &Criterion, field: &'static str, raw: &Threshold) -> f64 {
    let parsed = raw.value();
    if parsed.is_nan() {
        warn!(
            metric = %criterion.metric_name,
            field,
            raw = %raw,
            "criterion threshold is not a number"
        );
    }
    parsed
}
