//! Image pixel to ground coordinate projection
//!
//! One-shot, stateless calculation: given the geographic position of a
//! reference pixel in a nadir capture, the image's up-direction azimuth,
//! and the ground footprint of one pixel, compute the coordinate under
//! any other pixel. Used by the `groundpoint` tool in skyguide_mav.

use libm::{cos, sin};

use crate::nav::GeoPoint;

/// Meters per degree of latitude used by the projection
///
/// Deliberately a different constant from the guidance distance scale:
/// this path applies the cos(latitude) east/west correction, the
/// control loops do not.
pub const PROJECTION_METERS_PER_DEGREE: f64 = 110_600.0;

const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;

/// Pixel position in image coordinates (x right, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Project a pixel offset onto the ground
///
/// # Arguments
///
/// * `reference` - Geographic position under `reference_px`
/// * `azimuth_deg` - Compass azimuth of the image's up direction
/// * `pixel_size_m` - Ground footprint of one pixel in meters
/// * `reference_px` - Pixel whose ground coordinate is known
/// * `target_px` - Pixel to locate
///
/// # Returns
///
/// Geographic position under `target_px`.
pub fn project_ground_point(
    reference: GeoPoint,
    azimuth_deg: f64,
    pixel_size_m: f64,
    reference_px: PixelPoint,
    target_px: PixelPoint,
) -> GeoPoint {
    // Pixel offset with image axes mapped to the camera frame:
    // +x right, +y toward the top of the frame.
    let dx_m = (target_px.x - reference_px.x) as f64 * pixel_size_m;
    let dy_m = (reference_px.y - target_px.y) as f64 * pixel_size_m;

    // Rotate the camera-frame offset by the image azimuth into
    // north/east ground offsets.
    let azimuth_rad = azimuth_deg * DEG_TO_RAD;
    let north_m = dy_m * cos(azimuth_rad) - dx_m * sin(azimuth_rad);
    let east_m = dy_m * sin(azimuth_rad) + dx_m * cos(azimuth_rad);

    let meters_per_degree_lat = PROJECTION_METERS_PER_DEGREE;
    let meters_per_degree_lon =
        PROJECTION_METERS_PER_DEGREE * cos(reference.lat_deg * DEG_TO_RAD);

    GeoPoint::new(
        reference.lat_deg + north_m / meters_per_degree_lat,
        reference.lon_deg + east_m / meters_per_degree_lon,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_pixel_projects_to_reference() {
        let reference = GeoPoint::new(50.603694, 30.650625);
        let px = PixelPoint::new(558, 328);
        let result = project_ground_point(reference, 335.0, 0.38, px, px);
        assert_eq!(result, reference);
    }

    #[test]
    fn north_facing_image_moves_target_above_reference_north() {
        let reference = GeoPoint::new(50.0, 30.0);
        // Target pixel 100 rows above the reference: straight north
        // when the image azimuth is 0.
        let result = project_ground_point(
            reference,
            0.0,
            1.0,
            PixelPoint::new(0, 100),
            PixelPoint::new(0, 0),
        );
        assert!(result.lat_deg > reference.lat_deg);
        assert!((result.lon_deg - reference.lon_deg).abs() < 1e-9);
        let dlat_m = (result.lat_deg - reference.lat_deg) * PROJECTION_METERS_PER_DEGREE;
        assert!((dlat_m - 100.0).abs() < 1e-6);
    }

    #[test]
    fn east_facing_image_rotates_offset() {
        let reference = GeoPoint::new(50.0, 30.0);
        // Up in the image points east (azimuth 90): a pixel above the
        // reference lands east of it.
        let result = project_ground_point(
            reference,
            90.0,
            1.0,
            PixelPoint::new(0, 100),
            PixelPoint::new(0, 0),
        );
        assert!((result.lat_deg - reference.lat_deg).abs() < 1e-9);
        assert!(result.lon_deg > reference.lon_deg);
    }

    #[test]
    fn reproduces_survey_capture() {
        // Survey capture: known object at pixel (558, 328), image
        // center (320, 256), azimuth 335, 0.38 m/px.
        let object = GeoPoint::new(50.603694, 30.650625);
        let center = project_ground_point(
            object,
            335.0,
            0.38,
            PixelPoint::new(558, 328),
            PixelPoint::new(320, 256),
        );
        assert!((center.lat_deg - 50.603573).abs() < 5e-5);
        assert!((center.lon_deg - 30.649292).abs() < 5e-5);
    }
}
