//! Staged flight sequence
//!
//! The full mission runs one stage at a time, each blocking until its
//! termination condition holds: pre-flight (wait armable, mode, arm,
//! wait armed, clear stale overrides), altitude-hold ascent, waypoint
//! approach, and a final relative yaw maneuver.

use tracing::info;

use skyguide_core::{
    nav::geo, ActuatorInterface, AltitudeHoldController, ApproachController, ChannelOverrides,
    GeoPoint, Pacer, VehicleLifecycle, VehicleState, YawController,
};

use crate::error::MissionError;
use crate::runner::run_logged;

/// Poll interval for the pre-flight waits
const PREFLIGHT_WAIT_MS: u32 = 1000;

/// Caller-supplied mission targets
#[derive(Debug, Clone, Copy)]
pub struct MissionPlan {
    /// Ascent target, meters above home
    pub target_altitude_m: f32,
    /// Waypoint to approach
    pub destination: GeoPoint,
    /// Final turn relative to the heading on arrival, degrees clockwise
    pub final_yaw_offset_deg: f32,
    /// Optional per-stage tick budget; `None` blocks indefinitely
    pub tick_budget: Option<u32>,
}

/// Block until the vehicle is armed and its override set is clean
///
/// Not-armable and not-yet-armed are expected precondition waits, not
/// errors; the loop retries on a fixed interval indefinitely.
pub fn prepare<V>(vehicle: &mut V) -> Result<(), MissionError>
where
    V: VehicleState + ActuatorInterface + VehicleLifecycle + Pacer,
{
    info!("Basic pre-arm checks");
    while !vehicle.is_armable() {
        info!("Waiting for vehicle to initialise...");
        vehicle.pause_ms(PREFLIGHT_WAIT_MS);
    }

    vehicle
        .set_flight_mode("ALT_HOLD")
        .map_err(MissionError::Lifecycle)?;
    vehicle.arm().map_err(MissionError::Lifecycle)?;

    while !vehicle.is_armed() {
        info!("Waiting for arming...");
        vehicle.pause_ms(PREFLIGHT_WAIT_MS);
    }

    info!("Cleaning all channel overrides");
    vehicle
        .apply_overrides(&ChannelOverrides::all_neutral())
        .map_err(MissionError::Lifecycle)?;
    Ok(())
}

/// Run the full mission: arm, ascend, approach, final yaw
pub fn fly<V>(vehicle: &mut V, plan: &MissionPlan) -> Result<(), MissionError>
where
    V: VehicleState + ActuatorInterface + VehicleLifecycle + Pacer,
{
    prepare(vehicle)?;

    info!(target_m = plan.target_altitude_m, "Taking off");
    let mut ascent = AltitudeHoldController::new(plan.target_altitude_m);
    run_logged(&mut ascent, vehicle, plan.tick_budget)?;
    info!("Target altitude has been reached");

    info!(
        lat = plan.destination.lat_deg,
        lon = plan.destination.lon_deg,
        "Moving to location"
    );
    let mut approach = ApproachController::new(plan.destination);
    run_logged(&mut approach, vehicle, plan.tick_budget)?;
    info!("Reached target");

    // The relative turn resolves against the heading on arrival; large
    // offsets are ambiguous about the short way around, so the turn is
    // forced clockwise with a tight deadband.
    let heading = vehicle.heading_deg();
    let final_target = geo::normalize_deg(heading, plan.final_yaw_offset_deg);
    info!(
        current = heading,
        target = final_target,
        "Final relative yaw"
    );
    let mut yaw = YawController::with_deviation(final_target, 1.0, true);
    run_logged(&mut yaw, vehicle, plan.tick_budget)?;
    info!("Reached target heading");

    info!("All tasks were completed");
    Ok(())
}
