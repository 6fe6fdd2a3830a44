//! Waypoint-seeking approach loop
//!
//! Each tick recomputes bearing and planar distance to the destination,
//! hands control to a nested yaw correction when the heading error
//! leaves the deadband, and otherwise commands forward travel from the
//! distance-based slowdown profile. Arrival (< 1 m) issues a short
//! forward nudge on the travel channel and re-centers it.

use crate::channels::{Channel, ChannelOverrides, PULSE_NEUTRAL};
use crate::control::profile::approach_pulse;
use crate::control::{Controller, TickOutcome, YawController, NAV_TICK_MS};
use crate::error::GuidanceError;
use crate::nav::{geo, GeoPoint};
use crate::traits::{ActuatorInterface, VehicleState};

/// Distance below which the destination counts as reached
pub const ARRIVAL_THRESHOLD_M: f32 = 1.0;

/// Heading deadband handed to the nested yaw correction
const YAW_DEADBAND_DEG: f32 = 5.0;
/// Extra margin on top of the deadband before a correction starts, so
/// the loop does not constantly re-fix the bearing
const YAW_HYSTERESIS_DEG: f32 = 5.0;

/// Arrival nudge on the travel channel: slightly above neutral, held
/// briefly, then released
const ARRIVAL_PULSE_US: u16 = 1510;
const ARRIVAL_PULSE_MS: u32 = 100;

/// Bearing and distance sampled on the most recent approach tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproachStatus {
    pub distance_m: f32,
    pub bearing_deg: f32,
}

enum Phase {
    Approaching,
    /// Nested yaw correction; approach progress blocks until it
    /// completes
    YawCorrecting(YawController),
    /// Arrival nudge sent; next tick releases the channel
    ArrivalPulse,
}

/// Waypoint approach control loop
pub struct ApproachController {
    destination: GeoPoint,
    phase: Phase,
    status: Option<ApproachStatus>,
}

impl ApproachController {
    pub fn new(destination: GeoPoint) -> Self {
        Self {
            destination,
            phase: Phase::Approaching,
            status: None,
        }
    }

    pub fn destination(&self) -> GeoPoint {
        self.destination
    }

    /// Status from the most recent approach tick, for operator logs
    pub fn status(&self) -> Option<ApproachStatus> {
        self.status
    }

    /// True while a nested yaw correction is running
    pub fn correcting_heading(&self) -> bool {
        matches!(self.phase, Phase::YawCorrecting(_))
    }

    fn approach_tick<V>(&mut self, vehicle: &mut V) -> Result<TickOutcome, GuidanceError>
    where
        V: VehicleState + ActuatorInterface,
    {
        let position = vehicle.position();
        let heading = vehicle.heading_deg();
        let bearing = geo::bearing_deg(position, self.destination);
        let remaining = geo::distance_m(position, self.destination);
        self.status = Some(ApproachStatus {
            distance_m: remaining,
            bearing_deg: bearing,
        });

        if remaining < ARRIVAL_THRESHOLD_M {
            vehicle
                .apply_overrides(&ChannelOverrides::new().set(Channel::Pitch, ARRIVAL_PULSE_US))
                .map_err(GuidanceError::Actuator)?;
            self.phase = Phase::ArrivalPulse;
            return Ok(TickOutcome::Continue {
                pause_ms: ARRIVAL_PULSE_MS,
            });
        }

        // Raw normalized error in [0, 360): a small counter-clockwise
        // error (e.g. 355) also exceeds the threshold and triggers a
        // correction pass, which the yaw loop resolves immediately.
        let heading_error = geo::normalize_deg(bearing, -heading);
        if heading_error > YAW_DEADBAND_DEG + YAW_HYSTERESIS_DEG {
            let mut correction = YawController::with_deviation(bearing, YAW_DEADBAND_DEG, false);
            let outcome = correction.tick(vehicle)?;
            return Ok(match outcome {
                TickOutcome::Complete => TickOutcome::Continue { pause_ms: 0 },
                TickOutcome::Continue { pause_ms } => {
                    self.phase = Phase::YawCorrecting(correction);
                    TickOutcome::Continue { pause_ms }
                }
            });
        }

        vehicle
            .apply_overrides(&ChannelOverrides::new().set(Channel::Pitch, approach_pulse(remaining)))
            .map_err(GuidanceError::Actuator)?;
        Ok(TickOutcome::Continue {
            pause_ms: NAV_TICK_MS,
        })
    }
}

impl Controller for ApproachController {
    fn name(&self) -> &'static str {
        "approach"
    }

    fn tick<V>(&mut self, vehicle: &mut V) -> Result<TickOutcome, GuidanceError>
    where
        V: VehicleState + ActuatorInterface,
    {
        match &mut self.phase {
            Phase::Approaching => self.approach_tick(vehicle),
            Phase::YawCorrecting(correction) => match correction.tick(vehicle)? {
                TickOutcome::Complete => {
                    // Resume the approach immediately; the next tick
                    // recomputes bearing and distance before commanding
                    // forward travel.
                    self.phase = Phase::Approaching;
                    Ok(TickOutcome::Continue { pause_ms: 0 })
                }
                outcome => Ok(outcome),
            },
            Phase::ArrivalPulse => {
                vehicle
                    .apply_overrides(&ChannelOverrides::new().set(Channel::Pitch, PULSE_NEUTRAL))
                    .map_err(GuidanceError::Actuator)?;
                Ok(TickOutcome::Complete)
            }
        }
    }
}
