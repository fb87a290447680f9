// src/io/loader.rs

use crate::costing::{CostTier, TierTable};
use crate::error::{AllocationError, DataError};
use crate::model::facility::FacilityRecord;
use crate::model::{Facility, Store};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Reads the store table (`id_loja`, `latitude`, `longitude`).
pub fn read_stores<R: Read>(reader: R) -> Result<Vec<Store>, DataError> {
    read_records(reader, "store")
}

/// Reads the facility table (`deposito`, `latitude`, `longitude`, `existente`, `capacidade`).
///
/// A negative `capacidade` is reported as a configuration error.
pub fn read_facilities<R: Read>(reader: R) -> Result<Vec<Facility>, AllocationError> {
    let records: Vec<FacilityRecord> = read_records(reader, "facility")?;
    let facilities = records
        .into_iter()
        .map(Facility::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(facilities)
}

/// Reads and validates a tier table (`Tamanho`, `Max Lojas`, `% Fixo`,
/// `Variável`, `Dias Cobertura`, `Investimento (R$)`).
pub fn read_tiers<R: Read>(reader: R) -> Result<TierTable, AllocationError> {
    let tiers: Vec<CostTier> = read_records(reader, "tier")?;
    Ok(TierTable::new(tiers)?)
}

pub fn load_stores(path: impl AsRef<Path>) -> Result<Vec<Store>, DataError> {
    let path = path.as_ref();
    let stores = read_stores(open(path, "store")?)?;
    info!(path = %path.display(), count = stores.len(), "loaded stores");
    Ok(stores)
}

pub fn load_facilities(path: impl AsRef<Path>) -> Result<Vec<Facility>, AllocationError> {
    let path = path.as_ref();
    let facilities = read_facilities(open(path, "facility")?)?;
    info!(path = %path.display(), count = facilities.len(), "loaded facilities");
    Ok(facilities)
}

pub fn load_tiers(path: impl AsRef<Path>) -> Result<TierTable, AllocationError> {
    let path = path.as_ref();
    let tiers = read_tiers(open(path, "tier")?)?;
    info!(path = %path.display(), count = tiers.tiers().len(), "loaded tier table");
    Ok(tiers)
}

fn open(path: &Path, kind: &'static str) -> Result<std::fs::File, DataError> {
    std::fs::File::open(path).map_err(|source| DataError::Io { kind, source })
}

fn read_records<T, R>(reader: R, kind: &'static str) -> Result<Vec<T>, DataError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, result) in rdr.deserialize::<T>().enumerate() {
        let record = result.map_err(|source| DataError::Malformed {
            kind,
            // header is line 1
            line: source
                .position()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 2),
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}
