//! Navigation value types

/// Geographic position in degrees
///
/// Latitude/longitude are f64: the arrival threshold is 1 meter, which
/// is below f32 resolution at mid latitudes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoPoint {
    /// Latitude in degrees
    pub lat_deg: f64,
    /// Longitude in degrees
    pub lon_deg: f64,
}

impl GeoPoint {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }
}
