// src/error.rs

use thiserror::Error;

/// Problems with run-wide configuration: parameters, tier table, facility capacities.
///
/// Always fatal. A run never starts with an invalid configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("payback_years must be positive, got {0}")]
    NonPositivePayback(f64),

    #[error("parameter `{name}` must be a finite non-negative number, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("tier table is empty")]
    EmptyTierTable,

    #[error("tier `{name}` has bound {bound}, lower than the previous bound {previous}")]
    UnsortedTierBounds {
        name: String,
        bound: u32,
        previous: u32,
    },

    #[error("tier `{name}`: `{field}` must be a finite non-negative number, got {value}")]
    InvalidTierCoefficient {
        name: String,
        field: &'static str,
        value: f64,
    },

    #[error("facility `{facility}` has negative capacity {capacity}")]
    NegativeCapacity { facility: String, capacity: i64 },

    #[error("facility `{facility}` capacity {capacity} does not fit in 32 bits")]
    CapacityOutOfRange { facility: String, capacity: i64 },
}

/// Failure to read a run-parameter file.
#[derive(Debug, Error)]
pub enum ParamsFileError {
    #[error("cannot read parameter file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid parameter JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Problems with individual store or facility records.
///
/// The whole run is aborted on the first one; records are never skipped.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("duplicate store id `{0}`")]
    DuplicateStore(String),

    #[error("duplicate facility id `{0}`")]
    DuplicateFacility(String),

    #[error("{kind} `{id}` has a non-finite coordinate ({latitude}, {longitude})")]
    InvalidCoordinate {
        kind: &'static str,
        id: String,
        latitude: f64,
        longitude: f64,
    },

    #[error("{kind} record {line}: {source}")]
    Malformed {
        kind: &'static str,
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("unrecognised boolean `{0}` (expected true/false, 1/0, sim/nao, yes/no)")]
    InvalidFlag(String),

    #[error("cannot open {kind} table: {source}")]
    Io {
        kind: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Any reason a run fails as a whole.
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("data error: {0}")]
    Data(#[from] DataError),
}
