// src/io/reporting.rs

use crate::allocation::{Assignment, FacilitySummary};
use crate::planner::RunReport;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Label written in place of a facility id for stores nobody could serve.
pub const UNASSIGNED: &str = "unassigned";

/// A summary row as exported: currency rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub deposito: String,
    pub lojas: u32,
    pub tamanho: String,
    pub transporte: f64,
    pub fixo: f64,
    pub variavel: f64,
    pub operacional: f64,
    pub capital: f64,
    pub investimento: f64,
    pub total: f64,
}

impl From<&FacilitySummary> for SummaryRow {
    fn from(summary: &FacilitySummary) -> Self {
        let c = &summary.costs;
        Self {
            deposito: summary.facility_id.clone(),
            lojas: summary.store_count,
            tamanho: summary.tier.clone(),
            transporte: round_cents(c.transport),
            fixo: round_cents(c.fixed),
            variavel: round_cents(c.variable),
            operacional: round_cents(c.operational),
            capital: round_cents(c.capital),
            investimento: round_cents(c.investment),
            total: round_cents(c.total),
        }
    }
}

/// A per-store allocation row as exported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationRow {
    pub id_loja: String,
    pub deposito: String,
    pub custo_transporte: Option<f64>,
}

impl From<&Assignment> for AllocationRow {
    fn from(assignment: &Assignment) -> Self {
        Self {
            id_loja: assignment.store_id.clone(),
            deposito: assignment
                .facility_id
                .clone()
                .unwrap_or_else(|| UNASSIGNED.to_string()),
            custo_transporte: assignment.transport_cost.map(round_cents),
        }
    }
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Writes one row per facility summary as CSV.
pub fn write_summary<W: Write>(writer: W, summaries: &[FacilitySummary]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for summary in summaries {
        wtr.serialize(SummaryRow::from(summary))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes one row per store as CSV. Unserved stores have an empty cost.
pub fn write_allocation<W: Write>(writer: W, assignments: &[Assignment]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for assignment in assignments {
        wtr.serialize(AllocationRow::from(assignment))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the facility summary to a CSV file.
///
/// # Arguments
/// * `file_path` - Where to save it (e.g. "resultado_otimizacao.csv").
/// * `summaries` - The report rows of a run.
pub fn export_summary(file_path: &str, summaries: &[FacilitySummary]) -> Result<(), csv::Error> {
    let file = std::fs::File::create(Path::new(file_path))?;
    write_summary(file, summaries)?;
    info!(path = file_path, rows = summaries.len(), "summary exported");
    Ok(())
}

/// Writes the per-store allocation to a CSV file.
pub fn export_allocation(file_path: &str, assignments: &[Assignment]) -> Result<(), csv::Error> {
    let file = std::fs::File::create(Path::new(file_path))?;
    write_allocation(file, assignments)?;
    info!(path = file_path, rows = assignments.len(), "allocation exported");
    Ok(())
}

/// Human-readable cost analysis of a run.
pub fn render_cost_analysis(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str("=== Cost Analysis ===\n");
    out.push_str(&format!(
        "{:<16} {:>6} {:<10} {:>16} {:>16} {:>16} {:>16} {:>18}\n",
        "Deposito", "Lojas", "Tamanho", "Transporte", "Operacional", "Capital", "Investimento", "Total"
    ));
    for s in &report.summaries {
        out.push_str(&format!(
            "{:<16} {:>6} {:<10} {:>16.2} {:>16.2} {:>16.2} {:>16.2} {:>18.2}\n",
            s.facility_id,
            s.store_count,
            s.tier,
            s.costs.transport,
            s.costs.operational,
            s.costs.capital,
            s.costs.investment,
            s.costs.total
        ));
    }
    out.push_str(&format!(
        "Stores served: {} / {}\n",
        report.served_stores(),
        report.assignments.len()
    ));
    out.push_str(&format!("Unserved stores: {}\n", report.unserved_stores));
    out.push_str(&format!(
        "Total Transport Cost: R$ {:.2}\n",
        report.total_transport_cost()
    ));
    out.push_str(&format!(
        "Total Network Cost: R$ {:.2}\n",
        report.total_network_cost()
    ));

    out.push_str("Remaining capacity:");
    for (facility, slots) in report.remaining_capacity.iter() {
        out.push_str(&format!(" {facility}={slots}"));
    }
    out.push('\n');
    out
}
