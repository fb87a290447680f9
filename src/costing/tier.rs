// src/costing/tier.rs

use crate::config::check_non_negative;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// One size bucket of the cost table.
///
/// A facility serving `n` stores falls in the first tier whose `max_stores`
/// is at least `n`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostTier {
    #[serde(rename = "Tamanho")]
    pub name: String,
    #[serde(rename = "Max Lojas")]
    pub max_stores: u32,
    #[serde(rename = "% Fixo")]
    pub fixed_fraction: f64,
    #[serde(rename = "Variável")]
    pub variable_fraction: f64,
    #[serde(rename = "Dias Cobertura")]
    pub coverage_days: u32,
    #[serde(rename = "Investimento (R$)")]
    pub total_investment: f64,
}

impl CostTier {
    pub fn new(
        name: impl Into<String>,
        max_stores: u32,
        fixed_fraction: f64,
        variable_fraction: f64,
        coverage_days: u32,
        total_investment: f64,
    ) -> Self {
        Self {
            name: name.into(),
            max_stores,
            fixed_fraction,
            variable_fraction,
            coverage_days,
            total_investment,
        }
    }
}

/// An ordered, validated tier table.
///
/// Invariants: non-empty, bounds non-decreasing, coefficients finite and
/// non-negative. The last tier is the catch-all.
#[derive(Debug, Clone, PartialEq)]
pub struct TierTable {
    tiers: Vec<CostTier>,
}

impl TierTable {
    pub fn new(tiers: Vec<CostTier>) -> Result<Self, ConfigError> {
        if tiers.is_empty() {
            return Err(ConfigError::EmptyTierTable);
        }

        let mut previous: Option<u32> = None;
        for tier in &tiers {
            if let Some(prev) = previous {
                if tier.max_stores < prev {
                    return Err(ConfigError::UnsortedTierBounds {
                        name: tier.name.clone(),
                        bound: tier.max_stores,
                        previous: prev,
                    });
                }
            }
            previous = Some(tier.max_stores);

            let coefficients = [
                ("fixed_fraction", tier.fixed_fraction),
                ("variable_fraction", tier.variable_fraction),
                ("total_investment", tier.total_investment),
            ];
            for (field, value) in coefficients {
                check_non_negative(field, value).map_err(|_| {
                    ConfigError::InvalidTierCoefficient {
                        name: tier.name.clone(),
                        field,
                        value,
                    }
                })?;
            }
        }

        Ok(Self { tiers })
    }

    /// Returns the tier a facility serving `store_count` stores belongs to.
    ///
    /// Scans in table order and falls back to the last tier when every bound
    /// is exceeded.
    pub fn classify(&self, store_count: u32) -> &CostTier {
        self.tiers
            .iter()
            .find(|tier| tier.max_stores >= store_count)
            .unwrap_or_else(|| self.catch_all())
    }

    /// Position of the tier `classify` would pick. Larger means a bigger facility.
    pub fn rank(&self, store_count: u32) -> usize {
        self.tiers
            .iter()
            .position(|tier| tier.max_stores >= store_count)
            .unwrap_or(self.tiers.len().saturating_sub(1))
    }

    /// The last tier. `new` rejects empty tables and the default has four.
    fn catch_all(&self) -> &CostTier {
        match self.tiers.last() {
            Some(tier) => tier,
            None => unreachable!("tier table is never empty"),
        }
    }

    pub fn tiers(&self) -> &[CostTier] {
        &self.tiers
    }
}

/// Name of the tier for `store_count`.
pub fn classify(store_count: u32, tiers: &TierTable) -> &str {
    &tiers.classify(store_count).name
}

impl Default for TierTable {
    /// The four standard sizes: Minimo, Pequeno, Medio, Grande.
    fn default() -> Self {
        Self {
            tiers: vec![
                CostTier::new("Minimo", 30, 0.30, 0.45, 15, 4_000_000.0),
                CostTier::new("Pequeno", 60, 0.25, 0.35, 12, 6_000_000.0),
                CostTier::new("Medio", 90, 0.20, 0.30, 10, 8_000_000.0),
                CostTier::new("Grande", u32::MAX, 0.15, 0.25, 7, 10_000_000.0),
            ],
        }
    }
}
