//! Decision core for the estate-desk back office: agent performance criteria
//! and listing promotion pricing.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod telemetry;
