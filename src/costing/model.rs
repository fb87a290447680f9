// src/costing/model.rs

use crate::config::RunParams;
use crate::costing::tier::CostTier;
use crate::error::ConfigError;
use serde::Serialize;

/// Cost components of one facility for the run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CostBreakdown {
    pub transport: f64,
    pub fixed: f64,
    pub variable: f64,
    pub operational: f64,
    pub capital: f64,
    pub investment: f64,
    pub total: f64,
}

/// Costs a facility serving `store_count` stores in `tier`.
///
/// # Formula
/// With `flow = store_count * pieces_per_store_per_day * avg_product_cost`:
/// - fixed       = flow * fixed_fraction
/// - variable    = flow * variable_fraction
/// - operational = fixed + variable
/// - capital     = flow * coverage_days * opportunity_cost_rate
/// - investment  = total_investment / payback_years
/// - total       = transport + operational + capital + investment
///
/// Fails when `params` is invalid, e.g. `payback_years <= 0`.
pub fn cost(
    tier: &CostTier,
    store_count: u32,
    transport_cost: f64,
    params: &RunParams,
) -> Result<CostBreakdown, ConfigError> {
    params.validate()?;

    let flow = store_count as f64 * params.pieces_per_store_per_day * params.avg_product_cost;

    let fixed = flow * tier.fixed_fraction;
    let variable = flow * tier.variable_fraction;
    let operational = fixed + variable;
    let capital = flow * tier.coverage_days as f64 * params.opportunity_cost_rate;
    let investment = tier.total_investment / params.payback_years;

    Ok(CostBreakdown {
        transport: transport_cost,
        fixed,
        variable,
        operational,
        capital,
        investment,
        total: transport_cost + operational + capital + investment,
    })
}
