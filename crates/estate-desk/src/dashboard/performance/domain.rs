use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison applied between a measured value and its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetRule {
    Binary,
    LessThanOrEqual,
    GreaterThanOrEqual,
    Range,
    /// Rule name the evaluator does not recognise. Always fails.
    Unknown(String),
}

impl TargetRule {
    pub fn as_str(&self) -> &str {
        match self {
            TargetRule::Binary => "binary",
            TargetRule::LessThanOrEqual => "less_than_or_equal",
            TargetRule::GreaterThanOrEqual => "greater_than_or_equal",
            TargetRule::Range => "range",
            TargetRule::Unknown(raw) => raw,
        }
    }
}

impl From<String> for TargetRule {
    fn from(value: String) -> Self {
        match value.as_str() {
            "binary" => TargetRule::Binary,
            "less_than_or_equal" => TargetRule::LessThanOrEqual,
            "greater_than_or_equal" => TargetRule::GreaterThanOrEqual,
            "range" => TargetRule::Range,
            _ => TargetRule::Unknown(value),
        }
    }
}

impl From<TargetRule> for String {
    fn from(value: TargetRule) -> Self {
        match value {
            TargetRule::Unknown(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for TargetRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric threshold kept in the textual form the aggregation endpoint sends.
///
/// Parsing happens at evaluation time; text that is not a number yields NaN so
/// every comparison against it is false. Missing, null or boolean thresholds
/// load as such unparseable text instead of rejecting the whole criteria list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ThresholdRepr", into = "String")]
pub struct Threshold(String);

impl Threshold {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn raw(&self) -> &str {
        &self.0
    }

    pub fn value(&self) -> f64 {
        self.0.trim().parse::<f64>().unwrap_or(f64::NAN)
    }

    pub fn is_numeric(&self) -> bool {
        !self.value().is_nan()
    }
}

impl From<f64> for Threshold {
    fn from(value: f64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for Threshold {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<Threshold> for String {
    fn from(value: Threshold) -> Self {
        value.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ThresholdRepr {
    Text(String),
    Number(f64),
    Other(serde_json::Value),
}

impl From<ThresholdRepr> for Threshold {
    fn from(value: ThresholdRepr) -> Self {
        match value {
            ThresholdRepr::Text(raw) => Threshold(raw),
            ThresholdRepr::Number(number) => Threshold::from(number),
            ThresholdRepr::Other(other) => Threshold(other.to_string()),
        }
    }
}

/// Target portion of a criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub rule: TargetRule,
    #[serde(default)]
    pub value: Threshold,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_min: Option<Threshold>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_max: Option<Threshold>,
}

/// What counts as meeting target for one performance metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criterion {
    pub metric_name: String,
    pub target: Target,
}

impl Criterion {
    pub fn at_least(metric_name: impl Into<String>, value: impl Into<Threshold>) -> Self {
        Self::single(metric_name, TargetRule::GreaterThanOrEqual, value)
    }

    pub fn at_most(metric_name: impl Into<String>, value: impl Into<Threshold>) -> Self {
        Self::single(metric_name, TargetRule::LessThanOrEqual, value)
    }

    pub fn binary(metric_name: impl Into<String>, value: impl Into<Threshold>) -> Self {
        Self::single(metric_name, TargetRule::Binary, value)
    }

    pub fn between(
        metric_name: impl Into<String>,
        min: impl Into<Threshold>,
        max: impl Into<Threshold>,
    ) -> Self {
        let min = min.into();
        Self {
            metric_name: metric_name.into(),
            target: Target {
                rule: TargetRule::Range,
                value: min.clone(),
                value_min: Some(min),
                value_max: Some(max.into()),
            },
        }
    }

    fn single(metric_name: impl Into<String>, rule: TargetRule, value: impl Into<Threshold>) -> Self {
        Self {
            metric_name: metric_name.into(),
            target: Target {
                rule,
                value: value.into(),
                value_min: None,
                value_max: None,
            },
        }
    }

    /// Short label for the target, e.g. `>= 80` or `40 to 60`.
    pub fn describe(&self) -> String {
        let target = &self.target;
        match &target.rule {
            TargetRule::Binary | TargetRule::GreaterThanOrEqual => format!(">= {}", target.value),
            TargetRule::LessThanOrEqual => format!("<= {}", target.value),
            TargetRule::Range => match (&target.value_min, &target.value_max) {
                (Some(min), Some(max)) => format!("{min} to {max}"),
                _ => "range bounds missing".to_string(),
            },
            TargetRule::Unknown(raw) => format!("unsupported rule '{raw}'"),
        }
    }
}
