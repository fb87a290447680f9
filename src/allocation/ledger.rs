// src/allocation/ledger.rs

use crate::model::Facility;
use std::collections::BTreeMap;

/// Remaining capacity per facility for a single run.
///
/// Built from the facility records at the start of a run and threaded
/// through the assignment fold. Never shared between runs: every run builds
/// its own copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapacityLedger {
    remaining: BTreeMap<String, u32>,
}

impl CapacityLedger {
    pub fn from_facilities(facilities: &[Facility]) -> Self {
        let remaining = facilities
            .iter()
            .map(|f| (f.id.clone(), f.capacity))
            .collect();
        Self { remaining }
    }

    /// Remaining slots for `facility_id`. Unknown facilities have none.
    pub fn remaining(&self, facility_id: &str) -> u32 {
        self.remaining.get(facility_id).copied().unwrap_or(0)
    }

    /// Consumes one slot if any is left. Returns whether a slot was taken.
    pub fn try_take(&mut self, facility_id: &str) -> bool {
        match self.remaining.get_mut(facility_id) {
            Some(slots) if *slots > 0 => {
                *slots -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn total_remaining(&self) -> u64 {
        self.remaining.values().map(|&v| v as u64).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.remaining.iter().map(|(id, &slots)| (id.as_str(), slots))
    }
}
