//! Fly the staged mission against a live autopilot.
//!
//! Usage:
//!   cargo run -p skyguide_mav --bin mission [ADDRESS] [LAT] [LON] [ALT_M]
//!
//! Defaults target a local SITL instance on tcpout:127.0.0.1:5762.

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use skyguide_core::GeoPoint;
use skyguide_mav::{fly, link::DEFAULT_ADDRESS, MavlinkVehicle, MissionPlan};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let address = args.next().unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
    let lat: f64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(50.443326);
    let lon: f64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(30.448078);
    let altitude_m: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(100.0);

    let plan = MissionPlan {
        target_altitude_m: altitude_m,
        destination: GeoPoint::new(lat, lon),
        final_yaw_offset_deg: 350.0,
        tick_budget: None,
    };

    let mut vehicle = match MavlinkVehicle::connect(&address) {
        Ok(vehicle) => vehicle,
        Err(err) => {
            error!(%err, "could not connect to vehicle");
            std::process::exit(1);
        }
    };

    if let Err(err) = fly(&mut vehicle, &plan) {
        error!(%err, "mission failed");
        std::process::exit(1);
    }
    info!("Mission finished");
}
