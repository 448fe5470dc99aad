//! Listing promotion purchase flow: tier pricing, credit sufficiency, and the
//! purchase dialog's selection state.

mod catalog;
pub mod domain;
mod resolver;
pub mod router;
mod selection;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, CostTable, PromotionCatalog};
pub use domain::{PromotionDuration, PromotionPlan};
pub use resolver::PromotionResolver;
pub use router::{promotion_router, ConfirmRequest, SelectionRequest};
pub use selection::{
    PlanOption, PromotionPurchase, PromotionSelection, SelectionAction, SelectionError,
    SelectionView,
};
