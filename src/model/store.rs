// src/model/store.rs

use crate::error::DataError;
use serde::{Deserialize, Serialize};

/// A demand point that must be served by exactly one distribution center.
///
/// Coordinates are in degrees. Range checks ([-90, 90] / [-180, 180]) are the
/// caller's responsibility; only non-finite values are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(rename = "id_loja")]
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Store {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
        }
    }

    pub(crate) fn check_coordinates(&self) -> Result<(), DataError> {
        if self.latitude.is_finite() && self.longitude.is_finite() {
            Ok(())
        } else {
            Err(DataError::InvalidCoordinate {
                kind: "store",
                id: self.id.clone(),
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_latitude_is_rejected() {
        let store = Store::new("L1", f64::NAN, 0.0);
        assert!(matches!(
            store.check_coordinates(),
            Err(DataError::InvalidCoordinate { kind: "store", .. })
        ));
    }

    #[test]
    fn out_of_range_coordinates_are_not_validated() {
        // Range is a caller concern, only finiteness is checked.
        assert!(Store::new("L1", 120.0, -400.0).check_coordinates().is_ok());
    }
}
