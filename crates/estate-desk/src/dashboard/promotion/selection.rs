use serde::{Deserialize, Serialize};

use super::domain::{PromotionDuration, PromotionPlan};

/// Purchase dialog state. Lives only while the dialog is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionSelection {
    pub plan: PromotionPlan,
    pub duration: PromotionDuration,
    pub auto_renew: bool,
    pub available_credits: u32,
}

impl PromotionSelection {
    pub fn new(available_credits: u32) -> Self {
        Self {
            plan: PromotionPlan::Standard,
            duration: PromotionDuration::OneMonth,
            auto_renew: true,
            available_credits,
        }
    }
}

/// User interactions the dialog forwards to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionAction {
    ChangeDuration(PromotionDuration),
    SelectPlan(PromotionPlan),
    ToggleAutoRenew,
}

/// Emitted on confirmation; the caller submits it and refetches the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionPurchase {
    pub plan: PromotionPlan,
    pub duration: PromotionDuration,
    pub cost: u32,
    pub auto_renew: bool,
}

/// One plan card in the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanOption {
    pub plan: PromotionPlan,
    pub cost: u32,
    pub affordable: bool,
}

/// Everything a presentation layer needs to render the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionView {
    pub selection: PromotionSelection,
    pub cost: u32,
    pub affordable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deficit: Option<u32>,
    pub options: Vec<PlanOption>,
    pub auto_renew_togglable: bool,
    pub can_confirm: bool,
}

/// States the dialog can never reach through its own transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("plan '{plan}' is not offered for {duration}")]
    PlanNotOffered {
        plan: PromotionPlan,
        duration: PromotionDuration,
    },
    #[error("plan '{0}' always renews automatically")]
    AutoRenewLocked(PromotionPlan),
}
