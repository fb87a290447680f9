// src/io/synthetic.rs

use crate::model::Store;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, NormalError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SyntheticError {
    #[error("invalid spread: {0}")]
    Spread(#[from] NormalError),

    #[error("{axis} range {lo}..={hi} is empty or not finite")]
    BadRange { axis: &'static str, lo: f64, hi: f64 },
}

/// Generates `count` stores scattered around a center point.
///
/// Latitude and longitude are each drawn from a Normal distribution with
/// standard deviation `spread_deg` degrees. Results are clamped to valid
/// coordinate ranges. The same seed always yields the same stores.
///
/// # Arguments
/// * `count` - Number of stores.
/// * `center` - (latitude, longitude) of the cluster center.
/// * `spread_deg` - Standard deviation in degrees (e.g. 1.5 for a state-sized cluster).
/// * `seed` - RNG seed.
pub fn generate_clustered_stores(
    count: usize,
    center: (f64, f64),
    spread_deg: f64,
    seed: u64,
) -> Result<Vec<Store>, SyntheticError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let lat = Normal::new(center.0, spread_deg)?;
    let lon = Normal::new(center.1, spread_deg)?;

    let stores = (0..count)
        .map(|i| {
            Store::new(
                format!("L{:04}", i + 1),
                lat.sample(&mut rng).clamp(-90.0, 90.0),
                lon.sample(&mut rng).clamp(-180.0, 180.0),
            )
        })
        .collect();
    Ok(stores)
}

/// Generates `count` stores uniformly inside a bounding box.
///
/// Useful for stress-testing capacity exhaustion with evenly spread demand.
/// Each range must be finite with `lo <= hi`.
pub fn generate_uniform_stores(
    count: usize,
    lat_range: (f64, f64),
    lon_range: (f64, f64),
    seed: u64,
) -> Result<Vec<Store>, SyntheticError> {
    check_range("latitude", lat_range)?;
    check_range("longitude", lon_range)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let stores = (0..count)
        .map(|i| {
            Store::new(
                format!("L{:04}", i + 1),
                rng.gen_range(lat_range.0..=lat_range.1),
                rng.gen_range(lon_range.0..=lon_range.1),
            )
        })
        .collect();
    Ok(stores)
}

fn check_range(axis: &'static str, (lo, hi): (f64, f64)) -> Result<(), SyntheticError> {
    if lo.is_finite() && hi.is_finite() && lo <= hi {
        Ok(())
    } else {
        Err(SyntheticError::BadRange { axis, lo, hi })
    }
}
