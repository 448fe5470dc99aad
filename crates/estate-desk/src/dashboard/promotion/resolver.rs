use tracing::debug;

use super::catalog::PromotionCatalog;
use super::domain::{PromotionDuration, PromotionPlan};
use super::selection::{
    PlanOption, PromotionPurchase, PromotionSelection, SelectionAction, SelectionError,
    SelectionView,
};

/// Stateless pricing and eligibility rules over an injected catalog.
///
/// Transitions take the current selection by value and return the next one;
/// interactions that are not allowed return the selection unchanged.
#[derive(Debug, Clone, Default)]
pub struct PromotionResolver {
    catalog: PromotionCatalog,
}

impl PromotionResolver {
    pub fn new(catalog: PromotionCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PromotionCatalog {
        &self.catalog
    }

    pub fn resolve_cost(&self, plan: PromotionPlan, duration: PromotionDuration) -> u32 {
        self.catalog.cost(plan, duration)
    }

    pub fn can_afford(
        &self,
        plan: PromotionPlan,
        duration: PromotionDuration,
        available_credits: u32,
    ) -> bool {
        available_credits >= self.resolve_cost(plan, duration)
    }

    /// Plans offered for `duration`, cheapest tier first.
    pub fn selectable_plans(&self, duration: PromotionDuration) -> Vec<PromotionPlan> {
        PromotionPlan::ALL
            .into_iter()
            .filter(|plan| self.catalog.offers(*plan, duration))
            .collect()
    }

    /// Fresh dialog state for a caller holding `available_credits`.
    pub fn open(&self, available_credits: u32) -> PromotionSelection {
        PromotionSelection::new(available_credits)
    }

    pub fn apply(
        &self,
        selection: PromotionSelection,
        action: SelectionAction,
    ) -> PromotionSelection {
        match action {
            SelectionAction::ChangeDuration(duration) => self.change_duration(selection, duration),
            SelectionAction::SelectPlan(plan) => self.select_plan(selection, plan),
            SelectionAction::ToggleAutoRenew => self.toggle_auto_renew(selection),
        }
    }

    /// Keeps the plan when it is still offered; otherwise moves to the first
    /// plan offered for the new duration, or back to standard monthly.
    pub fn change_duration(
        &self,
        selection: PromotionSelection,
        duration: PromotionDuration,
    ) -> PromotionSelection {
        if self.catalog.offers(selection.plan, duration) {
            return PromotionSelection {
                duration,
                ..selection
            };
        }

        let (plan, duration) = match self.selectable_plans(duration).first() {
            Some(plan) => (*plan, duration),
            None => (PromotionPlan::Standard, PromotionDuration::OneMonth),
        };
        debug!(
            from = %selection.plan,
            to = %plan,
            %duration,
            "plan not offered for duration, reselected"
        );

        PromotionSelection {
            plan,
            duration,
            auto_renew: selection.auto_renew || plan.auto_renew_locked(),
            ..selection
        }
    }

    pub fn select_plan(
        &self,
        selection: PromotionSelection,
        plan: PromotionPlan,
    ) -> PromotionSelection {
        if !self.catalog.offers(plan, selection.duration) {
            debug!(%plan, duration = %selection.duration, "plan not offered, selection unchanged");
            return selection;
        }
        if !self.can_afford(plan, selection.duration, selection.available_credits) {
            debug!(
                %plan,
                available_credits = selection.available_credits,
                "plan not affordable, selection unchanged"
            );
            return selection;
        }

        PromotionSelection {
            plan,
            auto_renew: selection.auto_renew || plan.auto_renew_locked(),
            ..selection
        }
    }

    pub fn toggle_auto_renew(&self, selection: PromotionSelection) -> PromotionSelection {
        if !self.auto_renew_togglable(&selection) {
            return selection;
        }

        PromotionSelection {
            auto_renew: !selection.auto_renew,
            ..selection
        }
    }

    pub fn auto_renew_togglable(&self, selection: &PromotionSelection) -> bool {
        !selection.plan.auto_renew_locked() && self.affordable(selection)
    }

    pub fn affordable(&self, selection: &PromotionSelection) -> bool {
        self.can_afford(
            selection.plan,
            selection.duration,
            selection.available_credits,
        )
    }

    /// Rejects selections the transitions cannot produce, such as a plan
    /// outside its offered durations or the entry tier with auto-renew off.
    pub fn validate(&self, selection: &PromotionSelection) -> Result<(), SelectionError> {
        if !self.catalog.offers(selection.plan, selection.duration) {
            return Err(SelectionError::PlanNotOffered {
                plan: selection.plan,
                duration: selection.duration,
            });
        }
        if selection.plan.auto_renew_locked() && !selection.auto_renew {
            return Err(SelectionError::AutoRenewLocked(selection.plan));
        }
        Ok(())
    }

    pub fn confirmable(&self, selection: &PromotionSelection) -> bool {
        self.validate(selection).is_ok() && self.affordable(selection)
    }

    /// Credits still missing for the current plan; `None` when affordable.
    pub fn deficit(&self, selection: &PromotionSelection) -> Option<u32> {
        let cost = self.resolve_cost(selection.plan, selection.duration);
        cost.checked_sub(selection.available_credits)
            .filter(|missing| *missing > 0)
    }

    pub fn confirm(&self, selection: &PromotionSelection) -> Option<PromotionPurchase> {
        if let Err(err) = self.validate(selection) {
            debug!(%err, "confirmation blocked, selection not reachable");
            return None;
        }
        if !self.affordable(selection) {
            debug!(
                plan = %selection.plan,
                available_credits = selection.available_credits,
                "confirmation blocked, insufficient credits"
            );
            return None;
        }

        Some(PromotionPurchase {
            plan: selection.plan,
            duration: selection.duration,
            cost: self.resolve_cost(selection.plan, selection.duration),
            auto_renew: selection.auto_renew,
        })
    }

    pub fn view(&self, selection: &PromotionSelection) -> SelectionView {
        let affordable = self.affordable(selection);
        let options = self
            .selectable_plans(selection.duration)
            .into_iter()
            .map(|plan| PlanOption {
                plan,
                cost: self.resolve_cost(plan, selection.duration),
                affordable: self.can_afford(plan, selection.duration, selection.available_credits),
            })
            .collect();

        SelectionView {
            selection: *selection,
            cost: self.resolve_cost(selection.plan, selection.duration),
            affordable,
            deficit: self.deficit(selection),
            options,
            auto_renew_togglable: self.auto_renew_togglable(selection),
            can_confirm: self.confirmable(selection),
        }
    }
}
