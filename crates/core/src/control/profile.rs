//! Distance-based approach speed profile
//!
//! Maps remaining distance to a forward-travel pulse on the pitch
//! channel. RC pitch is inverted: pulses below neutral move the vehicle
//! forward, 1000 is full forward.
//!
//! The profile has two segments with a deliberate jump at the switch
//! point: full speed (1000) at or beyond 150 m, then a linear ramp
//! `round(1400 + 77 - 77*d/100)` inside 150 m. At d = 150 the ramp
//! alone would give ~1362, so the floor segment is not the ramp's
//! continuation. Smoothing the jump is a known candidate improvement
//! but would change flight behavior, so the profile is kept as-is.

use libm::roundf;

/// Full-forward pulse commanded beyond the slowdown range
pub const FULL_FORWARD_PULSE: u16 = 1000;

/// Distance at which the linear slowdown ramp takes over (meters)
pub const SLOWDOWN_RANGE_M: f32 = 150.0;

/// Forward-travel pulse for the remaining distance to the target
pub fn approach_pulse(distance_m: f32) -> u16 {
    if distance_m < SLOWDOWN_RANGE_M {
        // The closer the target, the slower the vehicle.
        roundf(1400.0 + 77.0 - 77.0 * distance_m / 100.0) as u16
    } else {
        FULL_FORWARD_PULSE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far_distance_commands_full_speed() {
        assert_eq!(approach_pulse(200.0), 1000);
        assert_eq!(approach_pulse(150.0), 1000);
    }

    #[test]
    fn ramp_values() {
        assert_eq!(approach_pulse(100.0), 1400);
        assert_eq!(approach_pulse(0.0), 1477);
    }

    #[test]
    fn profile_is_discontinuous_at_switch_point() {
        let just_inside = approach_pulse(149.9);
        assert_eq!(approach_pulse(150.0), 1000);
        assert!(just_inside > 1300, "ramp start was {}", just_inside);
    }

    #[test]
    fn ramp_slows_down_monotonically() {
        // Higher pitch pulse = less forward speed.
        assert!(approach_pulse(10.0) > approach_pulse(50.0));
        assert!(approach_pulse(50.0) > approach_pulse(100.0));
    }
}
