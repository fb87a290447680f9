// src/allocation/engine.rs

use crate::allocation::distance::distance;
use crate::allocation::ledger::CapacityLedger;
use crate::config::check_non_negative;
use crate::error::{AllocationError, DataError};
use crate::model::{Facility, Store};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, warn};

/// The outcome for one store. Produced once and never changed.
///
/// `facility_id` is `None` when no active facility had a free slot at the
/// moment the store was processed; `transport_cost` is then `None` as well.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub store_id: String,
    pub facility_id: Option<String>,
    pub transport_cost: Option<f64>,
}

impl Assignment {
    pub fn is_assigned(&self) -> bool {
        self.facility_id.is_some()
    }
}

/// An active facility priced for one store.
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    facility: &'a Facility,
    transport_cost: f64,
}

/// Assigns every store to the cheapest active facility that still has room.
///
/// Stores are processed in input order and earlier stores get first claim on
/// cheap facilities. Capacity is consumed on a fresh run-local ledger; the
/// facility records are not modified.
pub fn assign(
    stores: &[Store],
    facilities: &[Facility],
    cost_per_km: f64,
) -> Result<Vec<Assignment>, AllocationError> {
    let ledger = CapacityLedger::from_facilities(facilities);
    let (assignments, _) = assign_with_ledger(stores, facilities, cost_per_km, ledger)?;
    Ok(assignments)
}

/// Greedy assignment as an explicit fold over stores.
///
/// Takes the capacity ledger by value and hands back its final state along
/// with one [`Assignment`] per store, in store order.
///
/// # Algorithm
/// For each store:
/// 1. price every active facility at `distance * cost_per_km`
/// 2. stable-sort ascending by that cost (ties keep facility input order)
/// 3. take the first facility with a free slot, or mark the store unassigned
pub fn assign_with_ledger(
    stores: &[Store],
    facilities: &[Facility],
    cost_per_km: f64,
    mut ledger: CapacityLedger,
) -> Result<(Vec<Assignment>, CapacityLedger), AllocationError> {
    validate_inputs(stores, facilities, cost_per_km)?;

    let active: Vec<&Facility> = facilities.iter().filter(|f| f.active).collect();

    let assignments = stores
        .iter()
        .map(|store| assign_store(store, &active, cost_per_km, &mut ledger))
        .collect();

    Ok((assignments, ledger))
}

fn assign_store(
    store: &Store,
    active: &[&Facility],
    cost_per_km: f64,
    ledger: &mut CapacityLedger,
) -> Assignment {
    let mut candidates: Vec<Candidate> = active
        .iter()
        .map(|&facility| Candidate {
            facility,
            transport_cost: distance(
                store.latitude,
                store.longitude,
                facility.latitude,
                facility.longitude,
            ) * cost_per_km,
        })
        .collect();

    // sort_by is stable
    candidates.sort_by(|a, b| a.transport_cost.total_cmp(&b.transport_cost));

    for candidate in candidates {
        if ledger.try_take(&candidate.facility.id) {
            debug!(
                store = %store.id,
                facility = %candidate.facility.id,
                cost = candidate.transport_cost,
                "store assigned"
            );
            return Assignment {
                store_id: store.id.clone(),
                facility_id: Some(candidate.facility.id.clone()),
                transport_cost: Some(candidate.transport_cost),
            };
        }
    }

    warn!(store = %store.id, "no active facility with free capacity");
    Assignment {
        store_id: store.id.clone(),
        facility_id: None,
        transport_cost: None,
    }
}

fn validate_inputs(
    stores: &[Store],
    facilities: &[Facility],
    cost_per_km: f64,
) -> Result<(), AllocationError> {
    check_non_negative("cost_per_km", cost_per_km)?;

    let mut seen = HashSet::with_capacity(stores.len());
    for store in stores {
        store.check_coordinates()?;
        if !seen.insert(store.id.as_str()) {
            return Err(DataError::DuplicateStore(store.id.clone()).into());
        }
    }

    let mut seen = HashSet::with_capacity(facilities.len());
    for facility in facilities {
        facility.check_coordinates()?;
        if !seen.insert(facility.id.as_str()) {
            return Err(DataError::DuplicateFacility(facility.id.clone()).into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn facility(id: &str, lat: f64, lon: f64, capacity: u32) -> Facility {
        Facility::new(id, lat, lon, true, capacity)
    }

    #[test]
    fn full_facility_forces_the_next_cheapest() {
        let stores = vec![Store::new("1", 0.0, 0.0), Store::new("2", 0.0, 1.0)];
        let facilities = vec![facility("A", 0.0, 0.0, 1), facility("B", 10.0, 10.0, 5)];

        let result = assign(&stores, &facilities, 1.0).unwrap();

        assert_eq!(result[0].facility_id.as_deref(), Some("A"));
        assert_eq!(result[0].transport_cost, Some(0.0));
        assert_eq!(result[1].facility_id.as_deref(), Some("B"));
        let cost = result[1].transport_cost.unwrap();
        assert!((cost - distance(0.0, 1.0, 10.0, 10.0)).abs() < 1e-9);
    }

    #[test]
    fn inactive_and_zero_capacity_facilities_are_skipped() {
        let stores = vec![Store::new("1", 0.0, 0.0)];
        let facilities = vec![
            Facility::new("closed", 0.0, 0.0, false, 10),
            facility("empty", 0.0, 0.0, 0),
            facility("far", 5.0, 5.0, 1),
        ];

        let result = assign(&stores, &facilities, 2.0).unwrap();
        assert_eq!(result[0].facility_id.as_deref(), Some("far"));
    }

    #[test]
    fn exhausted_capacity_leaves_store_unassigned() {
        let stores = vec![Store::new("1", 0.0, 0.0), Store::new("2", 0.0, 0.0)];
        let facilities = vec![facility("A", 0.0, 0.0, 1)];

        let result = assign(&stores, &facilities, 1.0).unwrap();
        assert!(result[0].is_assigned());
        assert_eq!(
            result[1],
            Assignment {
                store_id: "2".to_string(),
                facility_id: None,
                transport_cost: None
            }
        );
    }

    #[test]
    fn ties_go_to_the_facility_listed_first() {
        let stores = vec![Store::new("1", 0.0, 0.0)];
        // Both one degree away.
        let facilities = vec![facility("north", 1.0, 0.0, 1), facility("south", -1.0, 0.0, 1)];
        let result = assign(&stores, &facilities, 1.0).unwrap();
        assert_eq!(result[0].facility_id.as_deref(), Some("north"));

        let reversed = vec![facility("south", -1.0, 0.0, 1), facility("north", 1.0, 0.0, 1)];
        let result = assign(&stores, &reversed, 1.0).unwrap();
        assert_eq!(result[0].facility_id.as_deref(), Some("south"));
    }

    #[test]
    fn ledger_is_returned_with_consumed_slots() {
        let stores = vec![Store::new("1", 0.0, 0.0)];
        let facilities = vec![facility("A", 0.0, 0.0, 3)];
        let ledger = CapacityLedger::from_facilities(&facilities);

        let (_, ledger) = assign_with_ledger(&stores, &facilities, 1.0, ledger).unwrap();
        assert_eq!(ledger.remaining("A"), 2);
        assert_eq!(facilities[0].capacity, 3);
    }

    #[test]
    fn duplicate_store_aborts_the_run() {
        let stores = vec![Store::new("1", 0.0, 0.0), Store::new("1", 1.0, 1.0)];
        let facilities = vec![facility("A", 0.0, 0.0, 3)];
        let err = assign(&stores, &facilities, 1.0).unwrap_err();
        assert!(matches!(err, AllocationError::Data(DataError::DuplicateStore(id)) if id == "1"));
    }

    #[test]
    fn nan_facility_latitude_aborts_the_run() {
        let stores = vec![Store::new("1", 0.0, 0.0)];
        let facilities = vec![facility("A", 0.0, 0.0, 3), facility("B", f64::NAN, 1.0, 3)];
        let err = assign(&stores, &facilities, 1.0).unwrap_err();
        assert!(matches!(
            err,
            AllocationError::Data(DataError::InvalidCoordinate {
                kind: "facility",
                ref id,
                ..
            }) if id == "B"
        ));
    }

    #[test]
    fn duplicate_facility_aborts_the_run() {
        let stores = vec![Store::new("1", 0.0, 0.0)];
        let facilities = vec![facility("A", 0.0, 0.0, 3), facility("A", 1.0, 1.0, 3)];
        let err = assign(&stores, &facilities, 1.0).unwrap_err();
        assert!(matches!(err, AllocationError::Data(DataError::DuplicateFacility(_))));
    }

    #[test]
    fn negative_cost_per_km_is_a_config_error() {
        let err = assign(&[], &[], -0.5).unwrap_err();
        assert!(matches!(
            err,
            AllocationError::Config(ConfigError::InvalidParameter {
                name: "cost_per_km",
                ..
            })
        ));
    }

    #[test]
    fn no_stores_no_assignments() {
        let facilities = vec![facility("A", 0.0, 0.0, 3)];
        assert!(assign(&[], &facilities, 1.0).unwrap().is_empty());
    }
}
