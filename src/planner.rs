// src/planner.rs

use crate::allocation::{
    assign_with_ledger, summarize, unserved_count, Assignment, CapacityLedger, FacilitySummary,
};
use crate::config::RunParams;
use crate::costing::TierTable;
use crate::error::AllocationError;
use crate::model::{Facility, Store};
use tracing::info;

/// Everything one allocation run needs, passed explicitly by the caller.
///
/// The context holds inputs only. Running it never changes it, so the same
/// context can be run any number of times (or from several threads) with
/// identical results.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub stores: Vec<Store>,
    pub facilities: Vec<Facility>,
    pub tiers: TierTable,
    pub params: RunParams,
}

/// Result of a complete run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// One record per input store, in store order.
    pub assignments: Vec<Assignment>,
    /// One row per facility that serves at least one store, by facility id.
    pub summaries: Vec<FacilitySummary>,
    /// Capacity left on each facility after the run.
    pub remaining_capacity: CapacityLedger,
    pub unserved_stores: usize,
}

impl RunContext {
    pub fn new(
        stores: Vec<Store>,
        facilities: Vec<Facility>,
        tiers: TierTable,
        params: RunParams,
    ) -> Self {
        Self {
            stores,
            facilities,
            tiers,
            params,
        }
    }

    /// Assigns and costs in one go.
    ///
    /// Parameters are validated before any store is processed; any error
    /// aborts the run and no partial report is returned.
    pub fn run(&self) -> Result<RunReport, AllocationError> {
        self.params.validate()?;

        info!(
            stores = self.stores.len(),
            facilities = self.facilities.len(),
            active = self.facilities.iter().filter(|f| f.active).count(),
            "starting allocation run"
        );

        let ledger = CapacityLedger::from_facilities(&self.facilities);
        let (assignments, remaining_capacity) = assign_with_ledger(
            &self.stores,
            &self.facilities,
            self.params.cost_per_km,
            ledger,
        )?;

        let summaries = summarize(&assignments, &self.tiers, &self.params)?;
        let unserved_stores = unserved_count(&assignments);

        info!(
            facilities_used = summaries.len(),
            unserved = unserved_stores,
            "allocation run complete"
        );

        Ok(RunReport {
            assignments,
            summaries,
            remaining_capacity,
            unserved_stores,
        })
    }
}

impl RunReport {
    pub fn served_stores(&self) -> usize {
        self.assignments.len() - self.unserved_stores
    }

    /// Sum of every facility's total cost.
    pub fn total_network_cost(&self) -> f64 {
        self.summaries.iter().map(|s| s.costs.total).sum()
    }

    pub fn total_transport_cost(&self) -> f64 {
        self.summaries.iter().map(|s| s.costs.transport).sum()
    }

    /// Total cost per facility, in report order.
    pub fn cost_breakdown(&self) -> Vec<(String, f64)> {
        self.summaries
            .iter()
            .map(|s| (s.facility_id.clone(), s.costs.total))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn context() -> RunContext {
        RunContext::new(
            vec![
                Store::new("1", 0.0, 0.0),
                Store::new("2", 0.0, 1.0),
                Store::new("3", 0.0, 2.0),
            ],
            vec![
                Facility::new("A", 0.0, 0.0, true, 1),
                Facility::new("B", 10.0, 10.0, true, 1),
            ],
            TierTable::default(),
            RunParams {
                cost_per_km: 1.0,
                ..RunParams::default()
            },
        )
    }

    #[test]
    fn report_totals() {
        let report = context().run().unwrap();

        assert_eq!(report.assignments.len(), 3);
        assert_eq!(report.unserved_stores, 1);
        assert_eq!(report.served_stores(), 2);
        assert_eq!(report.remaining_capacity.total_remaining(), 0);

        let transport: f64 = report
            .assignments
            .iter()
            .filter_map(|a| a.transport_cost)
            .sum();
        assert!((report.total_transport_cost() - transport).abs() < 1e-6);
        assert!(report.total_transport_cost() > 0.0);

        let sum: f64 = report.cost_breakdown().iter().map(|(_, c)| c).sum();
        assert!((sum - report.total_network_cost()).abs() < 1e-6);
    }

    #[test]
    fn running_twice_gives_the_same_report() {
        let ctx = context();
        assert_eq!(ctx.run().unwrap(), ctx.run().unwrap());
        assert_eq!(ctx.facilities[0].capacity, 1);
    }

    #[test]
    fn bad_payback_aborts_before_assignment() {
        let mut ctx = context();
        ctx.params.payback_years = 0.0;
        let err = ctx.run().unwrap_err();
        assert!(matches!(
            err,
            AllocationError::Config(ConfigError::NonPositivePayback(_))
        ));
    }
}
