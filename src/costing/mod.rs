// src/costing/mod.rs

pub mod model;
pub mod tier;

pub use model::{cost, CostBreakdown};
pub use tier::{classify, CostTier, TierTable};
