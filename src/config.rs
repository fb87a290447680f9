// src/config.rs

use crate::error::{ConfigError, ParamsFileError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Global parameters, constant for a whole run.
///
/// Every field can be supplied from a JSON file; missing fields fall back to
/// [`RunParams::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParams {
    /// Stores per vehicle. Carried for the report header, not used in costing.
    pub vehicle_capacity: u32,
    /// Transport cost per kilometre (R$/km).
    pub cost_per_km: f64,
    /// Average unit cost of a product (R$).
    pub avg_product_cost: f64,
    pub pieces_per_store_per_day: f64,
    /// Annual opportunity cost of capital, as a fraction (0.01 = 1% a.a.).
    pub opportunity_cost_rate: f64,
    pub payback_years: f64,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            vehicle_capacity: 5,
            cost_per_km: 4.5,
            avg_product_cost: 12.6,
            pieces_per_store_per_day: 1961.0,
            opportunity_cost_rate: 0.01,
            payback_years: 10.0,
        }
    }
}

impl RunParams {
    /// Reads parameters from a JSON file such as `{"cost_per_km": 3.2}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ParamsFileError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Rejects parameter sets that would make costing meaningless.
    ///
    /// `payback_years` divides the investment, so it must be strictly
    /// positive. Everything else must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.payback_years.is_finite() && self.payback_years > 0.0) {
            return Err(ConfigError::NonPositivePayback(self.payback_years));
        }

        let checks = [
            ("cost_per_km", self.cost_per_km),
            ("avg_product_cost", self.avg_product_cost),
            ("pieces_per_store_per_day", self.pieces_per_store_per_day),
            ("opportunity_cost_rate", self.opportunity_cost_rate),
        ];
        for (name, value) in checks {
            check_non_negative(name, value)?;
        }
        Ok(())
    }
}

pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}
