//! Proportional yaw controller with hysteresis
//!
//! Turns the vehicle until its heading falls inside a window around the
//! target heading, then neutralizes the yaw channel. The window gives
//! the loop its hysteresis: once inside, no further correction is
//! issued, which prevents oscillation around the exact target value.

use crate::channels::{Channel, ChannelOverrides, PULSE_NEUTRAL};
use crate::control::{Controller, TickOutcome, YAW_TICK_MS};
use crate::error::GuidanceError;
use crate::nav::{HeadingWindow, RangeCheck};
use crate::traits::{ActuatorInterface, VehicleState};

/// Yaw pulse deflection for a coarse deadband (>= 10 degrees)
const FAST_DELTA_US: u16 = 50;
/// Yaw pulse deflection for a tight deadband; gentler to reduce
/// overshoot against the smaller window
const SLOW_DELTA_US: u16 = 40;

/// Heading-hold control loop
pub struct YawController {
    target_deg: f32,
    allowed_deviation_deg: f32,
    force_clockwise: bool,
    speed_delta_us: u16,
    last_check: Option<(f32, RangeCheck)>,
}

impl YawController {
    /// Create a controller that turns to `target_deg` +- 10 degrees
    pub fn new(target_deg: f32) -> Self {
        Self::with_deviation(target_deg, 10.0, false)
    }

    /// Create a controller with an explicit deadband and turn direction
    ///
    /// `force_clockwise` overrides the classifier's direction choice
    /// (used for maneuvers that must not turn counter-clockwise, e.g. a
    /// large relative turn where the short way is ambiguous). It never
    /// overrides the in-range termination test.
    pub fn with_deviation(target_deg: f32, allowed_deviation_deg: f32, force_clockwise: bool) -> Self {
        let speed_delta_us = if allowed_deviation_deg >= 10.0 {
            FAST_DELTA_US
        } else {
            SLOW_DELTA_US
        };
        Self {
            target_deg,
            allowed_deviation_deg,
            force_clockwise,
            speed_delta_us,
            last_check: None,
        }
    }

    /// Target heading in degrees
    pub fn target_deg(&self) -> f32 {
        self.target_deg
    }

    /// Heading sample and classification from the most recent tick
    pub fn last_check(&self) -> Option<(f32, RangeCheck)> {
        self.last_check
    }
}

impl Controller for YawController {
    fn name(&self) -> &'static str {
        "yaw"
    }

    fn tick<V>(&mut self, vehicle: &mut V) -> Result<TickOutcome, GuidanceError>
    where
        V: VehicleState + ActuatorInterface,
    {
        let current = vehicle.heading_deg();
        let window = HeadingWindow::around(self.target_deg, self.allowed_deviation_deg);
        let check = window.check(current);
        self.last_check = Some((current, check));

        if check == RangeCheck::InRange {
            vehicle
                .apply_overrides(&ChannelOverrides::new().set(Channel::Yaw, PULSE_NEUTRAL))
                .map_err(GuidanceError::Actuator)?;
            return Ok(TickOutcome::Complete);
        }

        let pulse = if check == RangeCheck::NeedClockwise || self.force_clockwise {
            PULSE_NEUTRAL + self.speed_delta_us
        } else {
            PULSE_NEUTRAL - self.speed_delta_us
        };
        vehicle
            .apply_overrides(&ChannelOverrides::new().set(Channel::Yaw, pulse))
            .map_err(GuidanceError::Actuator)?;

        Ok(TickOutcome::Continue {
            pause_ms: YAW_TICK_MS,
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::control::testutil::ScriptedVehicle;
    use crate::control::run_to_completion;
    use std::vec;

    #[test]
    fn turns_clockwise_until_window_entered() {
        // Window is [80, 100]; 79 still needs correction, 91 is inside.
        let mut vehicle = ScriptedVehicle::with_headings(&[0.0, 20.0, 45.0, 79.0, 91.0]);
        let mut controller = YawController::new(90.0);

        run_to_completion(&mut controller, &mut vehicle, None).unwrap();

        assert_eq!(
            vehicle.channel_commands(Channel::Yaw),
            vec![1550, 1550, 1550, 1550, 1500]
        );
        // No command after the neutralizing one.
        assert_eq!(vehicle.commands.len(), 5);
        assert_eq!(controller.last_check(), Some((91.0, RangeCheck::InRange)));
    }

    #[test]
    fn window_lower_bound_terminates() {
        // 80 sits on the inclusive edge of [80, 100].
        let mut vehicle = ScriptedVehicle::with_headings(&[0.0, 80.0]);
        let mut controller = YawController::new(90.0);

        run_to_completion(&mut controller, &mut vehicle, None).unwrap();

        assert_eq!(vehicle.channel_commands(Channel::Yaw), vec![1550, 1500]);
    }

    #[test]
    fn already_in_range_neutralizes_once() {
        let mut vehicle = ScriptedVehicle::with_headings(&[91.0]);
        let mut controller = YawController::new(90.0);

        let outcome = controller.tick(&mut vehicle).unwrap();

        assert_eq!(outcome, TickOutcome::Complete);
        assert_eq!(vehicle.channel_commands(Channel::Yaw), vec![1500]);
        assert!(vehicle.pauses.is_empty());
    }

    #[test]
    fn turns_counter_clockwise_when_past_window() {
        let mut vehicle = ScriptedVehicle::with_headings(&[150.0, 95.0]);
        let mut controller = YawController::new(90.0);

        run_to_completion(&mut controller, &mut vehicle, None).unwrap();

        assert_eq!(vehicle.channel_commands(Channel::Yaw), vec![1450, 1500]);
    }

    #[test]
    fn tight_deadband_uses_gentler_correction() {
        let mut vehicle = ScriptedVehicle::with_headings(&[150.0, 90.5]);
        let mut controller = YawController::with_deviation(90.0, 1.0, false);

        run_to_completion(&mut controller, &mut vehicle, None).unwrap();

        assert_eq!(vehicle.channel_commands(Channel::Yaw), vec![1460, 1500]);
    }

    #[test]
    fn force_clockwise_overrides_direction_but_not_termination() {
        // 150 would normally correct counter-clockwise toward 90.
        let mut vehicle = ScriptedVehicle::with_headings(&[150.0, 95.0]);
        let mut controller = YawController::with_deviation(90.0, 10.0, true);

        run_to_completion(&mut controller, &mut vehicle, None).unwrap();

        assert_eq!(vehicle.channel_commands(Channel::Yaw), vec![1550, 1500]);
    }

    #[test]
    fn wrapping_target_near_north() {
        // Target 5 gives window [355, 15]; heading 358 is already in.
        let mut vehicle = ScriptedVehicle::with_headings(&[358.0]);
        let mut controller = YawController::new(5.0);

        let outcome = controller.tick(&mut vehicle).unwrap();

        assert_eq!(outcome, TickOutcome::Complete);
        assert_eq!(vehicle.channel_commands(Channel::Yaw), vec![1500]);
    }

    #[test]
    fn budget_exhaustion_reports_timeout() {
        // Script never reaches the window.
        let mut vehicle = ScriptedVehicle::with_headings(&[0.0]);
        let mut controller = YawController::new(180.0);

        let err = run_to_completion(&mut controller, &mut vehicle, Some(5)).unwrap_err();

        assert_eq!(
            err,
            GuidanceError::Timeout {
                stage: "yaw",
                ticks: 5
            }
        );
    }

    #[test]
    fn actuator_failure_propagates() {
        let mut vehicle = ScriptedVehicle::with_headings(&[0.0]);
        vehicle.reject_overrides = true;
        let mut controller = YawController::new(180.0);

        let err = controller.tick(&mut vehicle).unwrap_err();

        assert_eq!(err, GuidanceError::Actuator("override rejected"));
    }
}
