// src/model/facility.rs

use crate::error::{ConfigError, DataError};
use serde::{Deserialize, Deserializer, Serialize};

/// A candidate distribution center ("CD").
///
/// `capacity` is the maximum number of stores it may serve in a run. The
/// record itself is never mutated by an allocation run; capacity is consumed
/// on a run-local [`CapacityLedger`](crate::allocation::CapacityLedger).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facility {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub active: bool,
    pub capacity: u32,
}

impl Facility {
    pub fn new(
        id: impl Into<String>,
        latitude: f64,
        longitude: f64,
        active: bool,
        capacity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
            active,
            capacity,
        }
    }

    pub(crate) fn check_coordinates(&self) -> Result<(), DataError> {
        if self.latitude.is_finite() && self.longitude.is_finite() {
            Ok(())
        } else {
            Err(DataError::InvalidCoordinate {
                kind: "facility",
                id: self.id.clone(),
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// A facility row as it appears in the input table.
///
/// Capacity is read signed so a negative value surfaces as a configuration
/// error instead of an opaque parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct FacilityRecord {
    #[serde(rename = "deposito")]
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "existente", deserialize_with = "deserialize_flag")]
    pub active: bool,
    #[serde(rename = "capacidade")]
    pub capacity: i64,
}

impl TryFrom<FacilityRecord> for Facility {
    type Error = ConfigError;

    fn try_from(record: FacilityRecord) -> Result<Self, Self::Error> {
        let capacity = match u32::try_from(record.capacity) {
            Ok(capacity) => capacity,
            Err(_) if record.capacity < 0 => {
                return Err(ConfigError::NegativeCapacity {
                    facility: record.id,
                    capacity: record.capacity,
                })
            }
            Err(_) => {
                return Err(ConfigError::CapacityOutOfRange {
                    facility: record.id,
                    capacity: record.capacity,
                })
            }
        };

        Ok(Facility::new(
            record.id,
            record.latitude,
            record.longitude,
            record.active,
            capacity,
        ))
    }
}

/// Parses the `existente` column. Spreadsheets export it in many spellings.
pub fn parse_flag(raw: &str) -> Result<bool, DataError> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "sim" | "s" | "yes" | "y" | "verdadeiro" => Ok(true),
        "false" | "0" | "nao" | "não" | "n" | "no" | "falso" => Ok(false),
        _ => Err(DataError::InvalidFlag(raw.to_string())),
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(capacity: i64) -> FacilityRecord {
        FacilityRecord {
            id: "CD-SP".to_string(),
            latitude: -23.5,
            longitude: -46.6,
            active: true,
            capacity,
        }
    }

    #[test]
    fn flag_spellings() {
        for yes in ["true", "TRUE", "1", "Sim", " s ", "yes"] {
            assert!(parse_flag(yes).unwrap(), "{yes}");
        }
        for no in ["false", "0", "nao", "Não", "no"] {
            assert!(!parse_flag(no).unwrap(), "{no}");
        }
        assert!(matches!(parse_flag("talvez"), Err(DataError::InvalidFlag(_))));
    }

    #[test]
    fn negative_capacity_is_a_config_error() {
        let err = Facility::try_from(record(-3)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NegativeCapacity {
                facility: "CD-SP".to_string(),
                capacity: -3
            }
        );
    }

    #[test]
    fn capacity_past_u32_is_out_of_range() {
        let err = Facility::try_from(record(5_000_000_000)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::CapacityOutOfRange {
                facility: "CD-SP".to_string(),
                capacity: 5_000_000_000
            }
        );
    }

    #[test]
    fn zero_capacity_is_accepted() {
        let facility = Facility::try_from(record(0)).unwrap();
        assert_eq!(facility.capacity, 0);
        assert!(facility.active);
    }
}
