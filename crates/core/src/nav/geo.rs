//! Geographic calculations
//!
//! Distance uses a flat-earth approximation: Euclidean distance in
//! degree space scaled by a fixed meters-per-degree constant, valid for
//! the short ranges this system flies (sub-kilometer). No latitude
//! correction is applied to longitude here; the ground-point projection
//! in [`groundpoint`](crate::nav::groundpoint) carries its own east/west
//! scale.

use libm::{atan2, cos, sin, sqrt};

use crate::nav::GeoPoint;

/// Scale factor from degrees to meters for the planar distance
pub const METERS_PER_DEGREE: f64 = 111_319.5;

const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;
const RAD_TO_DEG: f64 = 180.0 / core::f64::consts::PI;

/// Planar distance between two positions in meters
///
/// Symmetric and zero for identical points. Only valid at short range.
pub fn distance_m(a: GeoPoint, b: GeoPoint) -> f32 {
    let dlat = b.lat_deg - a.lat_deg;
    let dlon = b.lon_deg - a.lon_deg;
    (sqrt(dlat * dlat + dlon * dlon) * METERS_PER_DEGREE) as f32
}

/// Initial bearing from one position to another, degrees [0, 360)
pub fn bearing_deg(from: GeoPoint, to: GeoPoint) -> f32 {
    let rlat1 = from.lat_deg * DEG_TO_RAD;
    let rlat2 = to.lat_deg * DEG_TO_RAD;
    let rlon1 = from.lon_deg * DEG_TO_RAD;
    let rlon2 = to.lon_deg * DEG_TO_RAD;

    let y = sin(rlon2 - rlon1) * cos(rlat2);
    let x = cos(rlat1) * sin(rlat2) - sin(rlat1) * cos(rlat2) * cos(rlon2 - rlon1);

    normalize_deg((atan2(y, x) * RAD_TO_DEG) as f32, 0.0)
}

/// Normalize `angle + delta` into [0, 360)
///
/// Holds for any real inputs, including large negative angles and
/// deltas.
pub fn normalize_deg(angle_deg: f32, delta_deg: f32) -> f32 {
    let wrapped = (angle_deg + delta_deg + 360.0) % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}
