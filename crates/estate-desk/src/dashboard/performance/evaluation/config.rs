use super::super::domain::Criterion;
use serde::{Deserialize, Serialize};

/// Ordered criteria set as served by the aggregation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerformanceCriteria {
    criteria: Vec<Criterion>,
}

impl PerformanceCriteria {
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self { criteria }
    }

    /// First criterion governing `metric_name`, if any.
    pub fn find(&self, metric_name: &str) -> Option<&Criterion> {
        self.criteria
            .iter()
            .find(|criterion| criterion.metric_name == metric_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Criteria the back office ships with when no file is configured.
    pub fn standard() -> Self {
        Self::new(vec![
            Criterion::at_least("response_rate", 80.0),
            Criterion::at_most("avg_response_hours", 2.0),
            Criterion::binary("profile_verified", 1.0),
            Criterion::at_least("active_listings", 5.0),
            Criterion::between("listing_quality_score", 70.0, 100.0),
        ])
    }
}

impl From<Vec<Criterion>> for PerformanceCriteria {
    fn from(criteria: Vec<Criterion>) -> Self {
        Self::new(criteria)
    }
}
