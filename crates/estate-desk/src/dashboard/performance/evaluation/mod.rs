mod config;
mod rules;

pub use config::PerformanceCriteria;
pub use rules::evaluate;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Applies an injected criteria set to an agent's measured metrics.
pub struct ScorecardEngine {
    criteria: PerformanceCriteria,
}

impl ScorecardEngine {
    pub fn new(criteria: PerformanceCriteria) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &PerformanceCriteria {
        &self.criteria
    }

    /// Whether `value` meets the criterion configured for `metric_name`.
    pub fn meets_target(&self, metric_name: &str, value: f64) -> bool {
        evaluate(value, self.criteria.find(metric_name))
    }

    pub fn score(&self, metrics: &BTreeMap<String, f64>) -> AgentScorecard {
        let verdicts: Vec<MetricVerdict> = metrics
            .iter()
            .map(|(metric_name, value)| {
                let criterion = self.criteria.find(metric_name);
                MetricVerdict {
                    metric_name: metric_name.clone(),
                    value: *value,
                    passed: evaluate(*value, criterion),
                    target: criterion
                        .map(|criterion| criterion.describe())
                        .unwrap_or_else(|| "no target configured".to_string()),
                }
            })
            .collect();

        let met = verdicts.iter().filter(|verdict| verdict.passed).count();
        let total = verdicts.len();

        tracing::debug!(met, total, "agent scorecard evaluated");

        AgentScorecard {
            meets_all_targets: total > 0 && met == total,
            met,
            total,
            verdicts,
        }
    }
}

/// Outcome for a single measured metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricVerdict {
    pub metric_name: String,
    pub value: f64,
    pub passed: bool,
    pub target: String,
}

/// Per-agent summary rendered by the performance insights panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentScorecard {
    pub verdicts: Vec<MetricVerdict>,
    pub met: usize,
    pub total: usize,
    pub meets_all_targets: bool,
}

impl AgentScorecard {
    pub fn verdict(&self, metric_name: &str) -> Option<&MetricVerdict> {
        self.verdicts
            .iter()
            .find(|verdict| verdict.metric_name == metric_name)
    }

    pub fn summary(&self) -> String {
        if self.total == 0 {
            "no metrics reported".to_string()
        } else {
            format!("{}/{} targets met", self.met, self.total)
        }
    }
}
