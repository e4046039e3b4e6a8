//! Great-circle distance between longitude/latitude positions.
//!
//! Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_KM`]:
//!
//! ```text
//! h = hav(Δφ) + cos φ₁ · cos φ₂ · hav(Δλ)
//! d = 2R · asin(√h)
//! ```
//!
//! # Example
//!
//! ```
//! use gravity_core::math::geo::{haversine_km, GeoPoint};
//!
//! let a = GeoPoint::new(0.0, 0.0);
//! let b = GeoPoint::new(1.0, 0.0);
//! let d = haversine_km(a, b);
//! assert!((d - 111.195).abs() < 1e-3);
//! ```

use num_traits::Float;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A position in degrees, longitude first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Longitude in degrees, east positive
    pub longitude: f64,
    /// Latitude in degrees, north positive
    pub latitude: f64,
}

impl GeoPoint {
    /// Create a new position from longitude and latitude in degrees.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Whether both coordinates are finite and inside the valid degree range.
    pub fn is_valid(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && self.longitude.abs() <= 180.0
            && self.latitude.abs() <= 90.0
    }

    /// Great-circle distance to another position, in kilometres.
    #[inline]
    pub fn distance_to(&self, other: GeoPoint) -> f64 {
        haversine_km(*self, other)
    }
}

#[inline]
fn haversine(theta: f64) -> f64 {
    let v = (theta / 2.0).sin();
    v * v
}

/// Great-circle distance in kilometres between two positions.
///
/// Identical positions yield exactly zero. The function is symmetric in
/// its arguments.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (lat1 - lat2).abs();
    let d_lon = (a.longitude.to_radians() - b.longitude.to_radians()).abs();

    // Rounding can push h a hair above 1 for antipodal points
    let h = (haversine(d_lat) + lat1.cos() * lat2.cos() * haversine(d_lon)).clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Great-circle distance in kilometres from raw degree coordinates.
///
/// Generic over the float type; `f32` inputs lose precision beyond a few
/// metres on continental distances.
pub fn haversine_distance<T: Float>(lon1: T, lat1: T, lon2: T, lat2: T) -> T {
    let two = T::one() + T::one();
    let radius = T::from(EARTH_RADIUS_KM).unwrap_or_else(T::zero);
    let hav = |theta: T| {
        let v = (theta / two).sin();
        v * v
    };
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let h = hav((phi1 - phi2).abs())
        + phi1.cos() * phi2.cos() * hav((lon1.to_radians() - lon2.to_radians()).abs());
    let h = h.max(T::zero()).min(T::one());
    two * radius * h.sqrt().asin()
}
