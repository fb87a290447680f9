// src/allocation/summary.rs

use crate::allocation::engine::Assignment;
use crate::config::RunParams;
use crate::costing::{cost, CostBreakdown, TierTable};
use crate::error::ConfigError;
use serde::Serialize;
use std::collections::BTreeMap;

/// One report row: a facility that received at least one store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilitySummary {
    pub facility_id: String,
    pub store_count: u32,
    pub tier: String,
    pub costs: CostBreakdown,
}

/// Groups assignments by facility and costs each group.
///
/// Unassigned stores are left out of the rows. Facilities that received no
/// store produce no row. Rows come out sorted by facility id.
pub fn summarize(
    assignments: &[Assignment],
    tiers: &TierTable,
    params: &RunParams,
) -> Result<Vec<FacilitySummary>, ConfigError> {
    params.validate()?;

    // facility id -> (store count, transport cost)
    let mut groups: BTreeMap<&str, (u32, f64)> = BTreeMap::new();
    for assignment in assignments {
        if let (Some(facility_id), Some(transport)) =
            (&assignment.facility_id, assignment.transport_cost)
        {
            let entry = groups.entry(facility_id.as_str()).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += transport;
        }
    }

    groups
        .into_iter()
        .map(|(facility_id, (store_count, transport))| -> Result<_, ConfigError> {
            let tier = tiers.classify(store_count);
            Ok(FacilitySummary {
                facility_id: facility_id.to_string(),
                store_count,
                tier: tier.name.clone(),
                costs: cost(tier, store_count, transport, params)?,
            })
        })
        .collect()
}

/// Number of stores that could not be served.
pub fn unserved_count(assignments: &[Assignment]) -> usize {
    assignments.iter().filter(|a| !a.is_assigned()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::CostTier;

    fn assigned(store: &str, facility: &str, cost: f64) -> Assignment {
        Assignment {
            store_id: store.to_string(),
            facility_id: Some(facility.to_string()),
            transport_cost: Some(cost),
        }
    }

    fn unassigned(store: &str) -> Assignment {
        Assignment {
            store_id: store.to_string(),
            facility_id: None,
            transport_cost: None,
        }
    }

    #[test]
    fn groups_by_facility_sorted_by_id() {
        let assignments = vec![
            assigned("1", "B", 10.0),
            assigned("2", "A", 1.0),
            assigned("3", "B", 5.0),
            unassigned("4"),
        ];

        let rows = summarize(&assignments, &TierTable::default(), &RunParams::default()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].facility_id, "A");
        assert_eq!(rows[0].store_count, 1);
        assert_eq!(rows[0].costs.transport, 1.0);
        assert_eq!(rows[1].facility_id, "B");
        assert_eq!(rows[1].store_count, 2);
        assert_eq!(rows[1].costs.transport, 15.0);
        assert_eq!(unserved_count(&assignments), 1);
    }

    #[test]
    fn single_tier_table_classifies_everything() {
        let tiers =
            TierTable::new(vec![CostTier::new("Minimo", 30, 0.3, 0.45, 15, 4_000_000.0)]).unwrap();
        let assignments = vec![assigned("1", "A", 0.0), assigned("2", "B", 1492.56)];

        let rows = summarize(&assignments, &tiers, &RunParams::default()).unwrap();
        assert!(rows.iter().all(|r| r.tier == "Minimo"));
    }

    #[test]
    fn tier_follows_store_count() {
        let assignments: Vec<Assignment> =
            (0..31).map(|i| assigned(&i.to_string(), "A", 1.0)).collect();
        let rows = summarize(&assignments, &TierTable::default(), &RunParams::default()).unwrap();
        assert_eq!(rows[0].tier, "Pequeno");
    }

    #[test]
    fn invalid_payback_fails_before_costing() {
        let params = RunParams {
            payback_years: -1.0,
            ..RunParams::default()
        };
        let err = summarize(&[assigned("1", "A", 1.0)], &TierTable::default(), &params).unwrap_err();
        assert_eq!(err, ConfigError::NonPositivePayback(-1.0));
    }

    #[test]
    fn nothing_assigned_gives_empty_report() {
        let rows = summarize(&[unassigned("1")], &TierTable::default(), &RunParams::default()).unwrap();
        assert!(rows.is_empty());
    }
}
