use crate::infra::{parse_metric, MetricSample};
use clap::Args;
use estate_desk::config::{AppConfig, DashboardConfig};
use estate_desk::dashboard::performance::{AgentScorecard, ScorecardEngine};
use estate_desk::dashboard::promotion::{
    PromotionDuration, PromotionPlan, PromotionResolver, SelectionAction, SelectionView,
};
use estate_desk::error::AppError;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct PromotionQuoteArgs {
    /// Available credit balance
    #[arg(long)]
    pub(crate) credits: u32,
    /// Plan to select (standard, featured, premium)
    #[arg(long)]
    pub(crate) plan: Option<PromotionPlan>,
    /// Promotion duration (15_days, 1_month)
    #[arg(long)]
    pub(crate) duration: Option<PromotionDuration>,
    /// Turn auto-renew off when the plan allows it
    #[arg(long)]
    pub(crate) no_auto_renew: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScorecardArgs {
    /// JSON criteria file (defaults to APP_PERFORMANCE_CRITERIA or the built-in set)
    #[arg(long)]
    pub(crate) criteria: Option<PathBuf>,
    /// Measured metric as name=value; repeatable
    #[arg(long = "metric", value_parser = parse_metric, required = true)]
    pub(crate) metrics: Vec<MetricSample>,
}

pub(crate) fn run_promotion_quote(args: PromotionQuoteArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let resolver = PromotionResolver::new(config.dashboard.promotion_catalog()?);

    let view = quote(&resolver, &args);
    render_quote(&view);
    Ok(())
}

pub(crate) fn quote(resolver: &PromotionResolver, args: &PromotionQuoteArgs) -> SelectionView {
    let mut selection = resolver.open(args.credits);
    if let Some(duration) = args.duration {
        selection = resolver.apply(selection, SelectionAction::ChangeDuration(duration));
    }
    if let Some(plan) = args.plan {
        selection = resolver.apply(selection, SelectionAction::SelectPlan(plan));
        if selection.plan != plan {
            println!(
                "Plan {} is not available for {} with {} credits; keeping {}",
                plan, selection.duration, args.credits, selection.plan
            );
        }
    }
    if args.no_auto_renew && selection.auto_renew {
        selection = resolver.apply(selection, SelectionAction::ToggleAutoRenew);
    }

    resolver.view(&selection)
}

fn render_quote(view: &SelectionView) {
    let selection = &view.selection;
    println!("Promotion quote");
    println!(
        "- {} for {}: {} credits (balance {})",
        selection.plan, selection.duration, view.cost, selection.available_credits
    );
    println!(
        "- Auto-renew: {}{}",
        if selection.auto_renew { "on" } else { "off" },
        if view.auto_renew_togglable {
            ""
        } else {
            " (locked)"
        }
    );
    match view.deficit {
        Some(deficit) => println!("- Insufficient credits: {} more needed", deficit),
        None => println!("- Ready to confirm"),
    }

    println!("\nPlans for {}", selection.duration);
    for option in &view.options {
        println!(
            "- {}: {} credits{}",
            option.plan,
            option.cost,
            if option.affordable { "" } else { " (unaffordable)" }
        );
    }
}

pub(crate) fn run_scorecard(args: ScorecardArgs) -> Result<(), AppError> {
    let dashboard = match args.criteria {
        Some(path) => DashboardConfig {
            performance_criteria: Some(path),
            ..DashboardConfig::default()
        },
        None => AppConfig::load()?.dashboard,
    };
    let engine = ScorecardEngine::new(dashboard.performance_criteria()?);

    let metrics = collect_metrics(args.metrics)?;
    let scorecard = engine.score(&metrics);
    render_scorecard(&scorecard);
    Ok(())
}

pub(crate) fn collect_metrics(
    samples: Vec<MetricSample>,
) -> Result<BTreeMap<String, f64>, AppError> {
    let mut metrics = BTreeMap::new();
    for sample in samples {
        if metrics.insert(sample.name.clone(), sample.value).is_some() {
            return Err(AppError::Input(format!(
                "metric '{}' given more than once",
                sample.name
            )));
        }
    }
    Ok(metrics)
}

fn render_scorecard(scorecard: &AgentScorecard) {
    println!("Agent scorecard: {}", scorecard.summary());
    for verdict in &scorecard.verdicts {
        println!(
            "- [{}] {} = {} (target {})",
            if verdict.passed { "met" } else { "missed" },
            verdict.metric_name,
            verdict.value,
            verdict.target
        );
    }
}
