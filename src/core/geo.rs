use geo_types::Point;
use serde::{Deserialize, Serialize};

/// An ordered coordinate pair tagged with a reference system at its use site.
///
/// `x` carries the easting or longitude, `y` the northing or latitude,
/// matching the axis order the transform providers expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinatePair {
    pub x: f64,
    pub y: f64,
}

impl CoordinatePair {
    /// Creates a new coordinate pair
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Validates geographic bounds: |lat| <= 90 and |lon| <= 180.
    ///
    /// Only meaningful when the pair is expressed in a geographic system.
    pub fn within_geographic_bounds(&self) -> bool {
        self.y.abs() <= 90.0 && self.x.abs() <= 180.0
    }

    /// Converts to a point geometry
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.x, self.y)
    }
}

impl Default for CoordinatePair {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<Point<f64>> for CoordinatePair {
    fn from(point: Point<f64>) -> Self {
        Self::new(point.x(), point.y())
    }
}

/// Formats a single ordinate for display with a fixed number of decimals.
///
/// Non-finite values are rendered with their debug-ish default formatting so
/// a broken readout is visible rather than silently dropped.
pub fn format_ordinate(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{:.1$}", value, decimals)
    } else {
        value.to_string()
    }
}
