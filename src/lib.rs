//! Store-to-distribution-center allocation and costing.
//!
//! Stores are assigned greedily, in input order, to the cheapest active
//! distribution center that still has capacity. Each center that ends up
//! serving stores is then classified into a size tier and costed
//! (transport, fixed, variable, capital, amortized investment).
//!
//! The two core entry points are [`assign`] and [`summarize`];
//! [`RunContext`] runs both as one atomic step.

pub mod allocation;
pub mod config;
pub mod costing;
pub mod error;
pub mod io;
pub mod model;
pub mod planner;

pub use allocation::{assign, distance, summarize, Assignment, CapacityLedger, FacilitySummary};
pub use config::RunParams;
pub use costing::{classify, cost, CostBreakdown, CostTier, TierTable};
pub use error::{AllocationError, ConfigError, DataError, ParamsFileError};
pub use model::{Facility, Store};
pub use planner::{RunContext, RunReport};
