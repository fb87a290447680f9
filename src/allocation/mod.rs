// src/allocation/mod.rs

pub mod distance;
pub mod engine;
pub mod ledger;
pub mod summary;

pub use distance::distance;
pub use engine::{assign, assign_with_ledger, Assignment};
pub use ledger::CapacityLedger;
pub use summary::{summarize, unserved_count, FacilitySummary};
