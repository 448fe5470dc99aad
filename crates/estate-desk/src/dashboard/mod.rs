pub mod performance;
pub mod promotion;
