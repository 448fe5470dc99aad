//! Properties the evaluator and resolver must hold for every input.

use estate_desk::dashboard::performance::{evaluate, Criterion};
use estate_desk::dashboard::promotion::{
    PromotionDuration, PromotionPlan, PromotionResolver, SelectionAction,
};
use proptest::prelude::*;

fn plan() -> impl Strategy<Value = PromotionPlan> {
    prop_oneof![
        Just(PromotionPlan::Standard),
        Just(PromotionPlan::Featured),
        Just(PromotionPlan::Premium),
    ]
}

fn duration() -> impl Strategy<Value = PromotionDuration> {
    prop_oneof![
        Just(PromotionDuration::FifteenDays),
        Just(PromotionDuration::OneMonth),
    ]
}

fn action() -> impl Strategy<Value = SelectionAction> {
    prop_oneof![
        duration().prop_map(SelectionAction::ChangeDuration),
        plan().prop_map(SelectionAction::SelectPlan),
        Just(SelectionAction::ToggleAutoRenew),
    ]
}

proptest! {
    #[test]
    fn missing_criterion_always_fails(value in proptest::num::f64::ANY) {
        prop_assert!(!evaluate(value, None));
    }

    #[test]
    fn at_least_matches_comparison(value in -1.0e6f64..1.0e6, threshold in -1.0e6f64..1.0e6) {
        let at_least = Criterion::at_least("response_rate", threshold);
        let binary = Criterion::binary("profile_verified", threshold);

        prop_assert_eq!(evaluate(value, Some(&at_least)), value >= threshold);
        prop_assert_eq!(evaluate(value, Some(&binary)), value >= threshold);
    }

    #[test]
    fn at_most_matches_comparison(value in -1.0e6f64..1.0e6, threshold in -1.0e6f64..1.0e6) {
        let at_most = Criterion::at_most("avg_response_hours", threshold);

        prop_assert_eq!(evaluate(value, Some(&at_most)), value <= threshold);
    }

    #[test]
    fn range_matches_inclusive_bounds(
        value in -1.0e3f64..1.0e3,
        lo in -1.0e3f64..1.0e3,
        hi in -1.0e3f64..1.0e3,
    ) {
        let range = Criterion::between("listing_quality_score", lo, hi);

        prop_assert_eq!(evaluate(value, Some(&range)), lo <= value && value <= hi);
    }

    #[test]
    fn malformed_thresholds_never_pass(value in proptest::num::f64::ANY, raw in "[g-m ]{0,12}") {
        let criterion = Criterion::at_least("response_rate", raw.as_str());
        let inverse = Criterion::at_most("response_rate", raw.as_str());

        prop_assert!(!evaluate(value, Some(&criterion)));
        prop_assert!(!evaluate(value, Some(&inverse)));
    }

    #[test]
    fn evaluation_and_pricing_are_repeatable(
        value in -1.0e6f64..1.0e6,
        threshold in -1.0e6f64..1.0e6,
        plan in plan(),
        duration in duration(),
    ) {
        let criterion = Criterion::at_least("response_rate", threshold);
        let resolver = PromotionResolver::default();

        prop_assert_eq!(evaluate(value, Some(&criterion)), evaluate(value, Some(&criterion)));
        prop_assert_eq!(resolver.resolve_cost(plan, duration), resolver.resolve_cost(plan, duration));
    }

    #[test]
    fn standard_cost_ignores_duration(duration in duration()) {
        let resolver = PromotionResolver::default();

        prop_assert_eq!(resolver.resolve_cost(PromotionPlan::Standard, duration), 18);
    }

    #[test]
    fn selections_stay_valid_under_any_interaction(
        credits in 0u32..600,
        actions in proptest::collection::vec(action(), 0..24),
    ) {
        let resolver = PromotionResolver::default();
        let mut selection = resolver.open(credits);

        for action in actions {
            let before = selection;
            selection = resolver.apply(selection, action);

            prop_assert!(resolver.selectable_plans(selection.duration).contains(&selection.plan));
            prop_assert!(resolver.validate(&selection).is_ok());
            prop_assert_eq!(selection.available_credits, credits);
            if selection.plan == PromotionPlan::Standard {
                prop_assert!(selection.auto_renew);
            }
            if let SelectionAction::SelectPlan(plan) = action {
                if !resolver.can_afford(plan, before.duration, credits) {
                    prop_assert_eq!(selection, before);
                }
            }
        }

        match resolver.confirm(&selection) {
            Some(purchase) => {
                prop_assert!(credits >= purchase.cost);
                prop_assert_eq!(resolver.deficit(&selection), None);
            }
            None => {
                let cost = resolver.resolve_cost(selection.plan, selection.duration);
                prop_assert_eq!(resolver.deficit(&selection), Some(cost - credits));
            }
        }
    }
}
