use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{PromotionDuration, PromotionPlan};

/// Credit cost schedule per plan and duration.
///
/// A plan is offered for a duration only when it lists an explicit cost for
/// it. Costs for unlisted durations fall back to the plan's `1_month` price,
/// which every plan must define. Every plan must be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CostTable", into = "CostTable")]
pub struct PromotionCatalog {
    costs: CostTable,
}

pub type CostTable = BTreeMap<PromotionPlan, BTreeMap<PromotionDuration, u32>>;

impl PromotionCatalog {
    pub fn new(costs: CostTable) -> Result<Self, CatalogError> {
        for plan in PromotionPlan::ALL {
            let schedule = costs.get(&plan).ok_or(CatalogError::MissingPlan(plan))?;
            if !schedule.contains_key(&PromotionDuration::OneMonth) {
                return Err(CatalogError::MissingBaseCost(plan));
            }
        }
        Ok(Self { costs })
    }

    /// Price list published to agents.
    pub fn standard() -> Self {
        let costs = BTreeMap::from([
            (
                PromotionPlan::Standard,
                BTreeMap::from([(PromotionDuration::OneMonth, 18)]),
            ),
            (
                PromotionPlan::Featured,
                BTreeMap::from([
                    (PromotionDuration::FifteenDays, 99),
                    (PromotionDuration::OneMonth, 153),
                ]),
            ),
            (
                PromotionPlan::Premium,
                BTreeMap::from([
                    (PromotionDuration::FifteenDays, 252),
                    (PromotionDuration::OneMonth, 387),
                ]),
            ),
        ]);
        Self { costs }
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let costs: CostTable = serde_json::from_str(raw)?;
        Self::new(costs)
    }

    pub fn offers(&self, plan: PromotionPlan, duration: PromotionDuration) -> bool {
        self.costs
            .get(&plan)
            .map(|schedule| schedule.contains_key(&duration))
            .unwrap_or(false)
    }

    /// Explicit cost, else the plan's `1_month` cost.
    pub fn cost(&self, plan: PromotionPlan, duration: PromotionDuration) -> u32 {
        self.costs
            .get(&plan)
            .and_then(|schedule| {
                schedule
                    .get(&duration)
                    .or_else(|| schedule.get(&PromotionDuration::OneMonth))
            })
            .copied()
            .unwrap_or(u32::MAX)
    }
}

impl Default for PromotionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<CostTable> for PromotionCatalog {
    type Error = CatalogError;

    fn try_from(value: CostTable) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PromotionCatalog> for CostTable {
    fn from(value: PromotionCatalog) -> Self {
        value.costs
    }
}

/// Rejections raised while loading a cost table.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("plan '{0}' is missing from the promotion catalog")]
    MissingPlan(PromotionPlan),
    #[error("plan '{0}' has no 1_month base cost")]
    MissingBaseCost(PromotionPlan),
    #[error("promotion catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
