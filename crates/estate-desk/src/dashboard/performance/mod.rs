//! Agent performance insights: criterion evaluation and per-agent scorecards.
//!
//! Criteria arrive from the aggregation endpoint as loosely typed JSON. The
//! evaluator never fails on them; anything it cannot interpret counts as a
//! missed target.

pub mod domain;
mod evaluation;
pub mod router;

#[cfg(test)]
mod tests;

pub use domain::{Criterion, Target, TargetRule, Threshold};
pub use evaluation::{evaluate, AgentScorecard, MetricVerdict, PerformanceCriteria, ScorecardEngine};
pub use router::{performance_router, ScorecardRequest};
