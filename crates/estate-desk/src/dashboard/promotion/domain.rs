use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Listing promotion tiers, cheapest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionPlan {
    Standard,
    Featured,
    Premium,
}

impl PromotionPlan {
    pub const ALL: [PromotionPlan; 3] = [
        PromotionPlan::Standard,
        PromotionPlan::Featured,
        PromotionPlan::Premium,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            PromotionPlan::Standard => "standard",
            PromotionPlan::Featured => "featured",
            PromotionPlan::Premium => "premium",
        }
    }

    /// The entry tier renews automatically and cannot opt out.
    pub const fn auto_renew_locked(self) -> bool {
        matches!(self, PromotionPlan::Standard)
    }
}

impl fmt::Display for PromotionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PromotionPlan {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(PromotionPlan::Standard),
            "featured" => Ok(PromotionPlan::Featured),
            "premium" => Ok(PromotionPlan::Premium),
            other => Err(format!(
                "unknown promotion plan '{other}' (expected standard, featured or premium)"
            )),
        }
    }
}

/// Promotion run lengths offered in the purchase dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PromotionDuration {
    #[serde(rename = "15_days")]
    FifteenDays,
    #[serde(rename = "1_month")]
    OneMonth,
}

impl PromotionDuration {
    pub const ALL: [PromotionDuration; 2] =
        [PromotionDuration::FifteenDays, PromotionDuration::OneMonth];

    pub const fn label(self) -> &'static str {
        match self {
            PromotionDuration::FifteenDays => "15_days",
            PromotionDuration::OneMonth => "1_month",
        }
    }
}

impl fmt::Display for PromotionDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PromotionDuration {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "15_days" | "15d" => Ok(PromotionDuration::FifteenDays),
            "1_month" | "1m" => Ok(PromotionDuration::OneMonth),
            other => Err(format!(
                "unknown promotion duration '{other}' (expected 15_days or 1_month)"
            )),
        }
    }
}
