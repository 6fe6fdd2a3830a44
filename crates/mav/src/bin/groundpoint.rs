//! Project an image pixel onto a ground coordinate.
//!
//! Usage:
//!   cargo run -p skyguide_mav --bin groundpoint \
//!     [LAT] [LON] [AZIMUTH] [PIXEL_SIZE_M] [REF_X] [REF_Y] [X] [Y]
//!
//! Defaults reproduce a known survey capture: an object at pixel
//! (558, 328) with coordinates (50.603694, 30.650625), image azimuth
//! 335, 0.38 m/pixel, locating the image center (320, 256).

use skyguide_core::nav::groundpoint::{project_ground_point, PixelPoint};
use skyguide_core::GeoPoint;

fn main() {
    let args: Vec<f64> = std::env::args()
        .skip(1)
        .filter_map(|s| s.parse().ok())
        .collect();
    let get = |i: usize, default: f64| args.get(i).copied().unwrap_or(default);

    let reference = GeoPoint::new(get(0, 50.603694), get(1, 30.650625));
    let azimuth_deg = get(2, 335.0);
    let pixel_size_m = get(3, 0.38);
    let reference_px = PixelPoint::new(get(4, 558.0) as i32, get(5, 328.0) as i32);
    let target_px = PixelPoint::new(get(6, 320.0) as i32, get(7, 256.0) as i32);

    let target = project_ground_point(
        reference,
        azimuth_deg,
        pixel_size_m,
        reference_px,
        target_px,
    );

    println!("Target pixel ground coordinate:");
    println!("Latitude:  {:.6}", target.lat_deg);
    println!("Longitude: {:.6}", target.lon_deg);
    println!(
        "https://www.google.com/maps?q={:.6},{:.6}",
        target.lat_deg, target.lon_deg
    );
}
