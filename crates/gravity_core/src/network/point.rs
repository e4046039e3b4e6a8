//! Point and flow input records.

use crate::math::geo::GeoPoint;

/// A located node candidate.
///
/// Points are immutable once loaded and identified by `id`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Unique identifier
    pub id: String,
    /// Longitude in degrees
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(id: impl Into<String>, longitude: f64, latitude: f64) -> Self {
        Self {
            id: id.into(),
            longitude,
            latitude,
        }
    }

    /// Position of the point.
    #[inline]
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.longitude, self.latitude)
    }
}

/// One observed interaction magnitude between two points.
///
/// Records are directed on input but treated as undirected: `A → B` and
/// `B → A` address the same node pair.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowRecord {
    /// Origin point id
    pub origin: String,
    /// Destination point id
    pub destination: String,
    /// Observed flow, non-negative
    pub value: f64,
}

impl FlowRecord {
    /// Create a new flow record.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, value: f64) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            value,
        }
    }
}
