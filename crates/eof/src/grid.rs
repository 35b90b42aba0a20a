//! Spatial grid on which EOF vectors are defined.

use crate::error::EofError;

/// Latitude/longitude grid of an EOF pattern.
///
/// Grid points are ordered latitude-major: all longitudes of the first
/// latitude, then all longitudes of the second, and so on.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGrid {
    lat: Vec<f64>,
    long: Vec<f64>,
}

impl SpatialGrid {
    /// Creates a grid from latitude and longitude axes.
    ///
    /// # Errors
    ///
    /// Returns [`EofError::EmptyGrid`] if either axis is empty.
    pub fn new(lat: Vec<f64>, long: Vec<f64>) -> Result<Self, EofError> {
        if lat.is_empty() || long.is_empty() {
            return Err(EofError::EmptyGrid {
                n_lat: lat.len(),
                n_long: long.len(),
            });
        }
        Ok(Self { lat, long })
    }

    /// Latitude axis.
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Longitude axis.
    pub fn long(&self) -> &[f64] {
        &self.long
    }

    /// Total number of grid points (`n_lat * n_long`).
    pub fn n_points(&self) -> usize {
        self.lat.len() * self.long.len()
    }

    /// Iterates over `(lat, long)` for every grid point in vector order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.lat
            .iter()
            .flat_map(move |&la| self.long.iter().map(move |&lo| (la, lo)))
    }
}
