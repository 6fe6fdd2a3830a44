//! Altitude-hold ascent loop
//!
//! Commands a constant strong climb on the throttle channel until the
//! vehicle reports the target altitude, then re-centers the throttle.
//! Ascent-only: there is no downward correction if the vehicle
//! overshoots past the target before the loop samples it.

use crate::channels::{Channel, ChannelOverrides, PULSE_MAX, PULSE_NEUTRAL};
use crate::control::{Controller, TickOutcome, NAV_TICK_MS};
use crate::error::GuidanceError;
use crate::traits::{ActuatorInterface, VehicleState};

/// Ascent loop toward a target relative altitude
pub struct AltitudeHoldController {
    target_alt_m: f32,
    last_altitude_m: Option<f32>,
}

impl AltitudeHoldController {
    pub fn new(target_alt_m: f32) -> Self {
        Self {
            target_alt_m,
            last_altitude_m: None,
        }
    }

    /// Altitude sample from the most recent tick
    pub fn last_altitude_m(&self) -> Option<f32> {
        self.last_altitude_m
    }
}

impl Controller for AltitudeHoldController {
    fn name(&self) -> &'static str {
        "ascent"
    }

    fn tick<V>(&mut self, vehicle: &mut V) -> Result<TickOutcome, GuidanceError>
    where
        V: VehicleState + ActuatorInterface,
    {
        // Command the climb first, then sample; the loop keeps climbing
        // through the tick on which the target is observed.
        vehicle
            .apply_overrides(&ChannelOverrides::new().set(Channel::Throttle, PULSE_MAX))
            .map_err(GuidanceError::Actuator)?;

        let altitude = vehicle.altitude_m();
        self.last_altitude_m = Some(altitude);

        if altitude >= self.target_alt_m {
            vehicle
                .apply_overrides(&ChannelOverrides::new().set(Channel::Throttle, PULSE_NEUTRAL))
                .map_err(GuidanceError::Actuator)?;
            return Ok(TickOutcome::Complete);
        }

        Ok(TickOutcome::Continue {
            pause_ms: NAV_TICK_MS,
        })
    }
}
