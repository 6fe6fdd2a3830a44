//! Full guided mission against the lockstep simulator.
//!
//! Arms the simulated vehicle, climbs to the target altitude, flies to a
//! waypoint ~400 m away, and finishes with a relative yaw turn, logging
//! each stage as it completes.
//!
//! Run with: `cargo run -p skyguide_sitl --example sim_mission`

use skyguide_core::nav::geo::{self, METERS_PER_DEGREE};
use skyguide_core::{GeoPoint, VehicleState};
use skyguide_mav::{fly, MissionPlan};
use skyguide_sitl::{SimConfig, SimVehicle};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut sim = SimVehicle::new(SimConfig {
        heading_noise_deg: 0.5,
        seed: Some(7),
        ..SimConfig::default()
    });

    let start = sim.position();
    let destination = GeoPoint::new(
        start.lat_deg + 300.0 / METERS_PER_DEGREE,
        start.lon_deg - 250.0 / METERS_PER_DEGREE,
    );

    let plan = MissionPlan {
        target_altitude_m: 40.0,
        destination,
        final_yaw_offset_deg: 350.0,
        tick_budget: Some(10_000),
    };

    if let Err(e) = fly(&mut sim, &plan) {
        eprintln!("mission failed: {e}");
        std::process::exit(1);
    }

    println!(
        "landed state: alt {:.1} m, heading {:.1} deg, {:.2} m from target, {:.1} s simulated",
        sim.altitude_m(),
        sim.heading_deg(),
        geo::distance_m(sim.position(), destination),
        sim.sim_time_ms() as f64 / 1000.0
    );
}
