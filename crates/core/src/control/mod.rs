//! Tick-based guidance controllers and the run loop
//!
//! Each controller is an explicit state machine: one `tick` reads the
//! live vehicle state, commands actuators, and reports whether the
//! objective is met and how long to pause before the next tick. A full
//! flight sequence runs the controllers one after another - ascent,
//! waypoint approach, final yaw - each blocking until its termination
//! condition holds.
//!
//! Splitting the loops into tick + pause keeps the algorithms callable
//! both from a real blocking runner and deterministically from tests.

mod altitude;
mod approach;
pub mod profile;
mod yaw;

pub use altitude::AltitudeHoldController;
pub use approach::{ApproachController, ApproachStatus};
pub use yaw::YawController;

use crate::error::GuidanceError;
use crate::traits::{ActuatorInterface, Pacer, VehicleState};

/// Yaw loop sample period; fast relative to the vehicle yaw rate to
/// limit overshoot
pub const YAW_TICK_MS: u32 = 200;
/// Approach/ascent sample period; position changes slower than heading
pub const NAV_TICK_MS: u32 = 1000;

/// Result of one controller tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Objective not yet met; pause this long before the next tick
    Continue { pause_ms: u32 },
    /// Termination condition reached; the controller issued its final
    /// neutralizing command and must not be ticked again
    Complete,
}

/// A guidance control loop body
pub trait Controller {
    /// Stage name for logs and timeout reports
    fn name(&self) -> &'static str;

    /// Run one control tick against the live vehicle
    fn tick<V>(&mut self, vehicle: &mut V) -> Result<TickOutcome, GuidanceError>
    where
        V: VehicleState + ActuatorInterface;
}

/// Drive a controller to completion, pacing between ticks
///
/// With `tick_budget = None` the loop runs until the termination
/// condition holds; an unreachable target hangs rather than failing
/// silently. Passing a budget turns an unreachable target into
/// [`GuidanceError::Timeout`].
pub fn run_to_completion<C, V>(
    controller: &mut C,
    vehicle: &mut V,
    tick_budget: Option<u32>,
) -> Result<(), GuidanceError>
where
    C: Controller,
    V: VehicleState + ActuatorInterface + Pacer,
{
    let mut ticks: u32 = 0;
    loop {
        match controller.tick(vehicle)? {
            TickOutcome::Complete => return Ok(()),
            TickOutcome::Continue { pause_ms } => {
                ticks = ticks.saturating_add(1);
                if let Some(budget) = tick_budget {
                    if ticks >= budget {
                        return Err(GuidanceError::Timeout {
                            stage: controller.name(),
                            ticks,
                        });
                    }
                }
                if pause_ms > 0 {
                    vehicle.pause_ms(pause_ms);
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    extern crate std;

    use std::vec::Vec;

    use crate::channels::{Channel, ChannelOverrides};
    use crate::nav::GeoPoint;
    use crate::traits::{ActuatorInterface, Pacer, VehicleState};

    /// Test vehicle that replays scripted state samples and records
    /// every override it receives.
    pub struct ScriptedVehicle {
        pub headings: Vec<f32>,
        pub altitudes: Vec<f32>,
        pub positions: Vec<GeoPoint>,
        pub commands: Vec<(Channel, u16)>,
        pub pauses: Vec<u32>,
        pub reject_overrides: bool,
        heading_idx: usize,
        altitude_idx: usize,
        position_idx: usize,
    }

    impl ScriptedVehicle {
        pub fn new() -> Self {
            Self {
                headings: Vec::new(),
                altitudes: Vec::new(),
                positions: Vec::new(),
                commands: Vec::new(),
                pauses: Vec::new(),
                reject_overrides: false,
                heading_idx: 0,
                altitude_idx: 0,
                position_idx: 0,
            }
        }

        pub fn with_headings(headings: &[f32]) -> Self {
            let mut vehicle = Self::new();
            vehicle.headings.extend_from_slice(headings);
            vehicle
        }

        /// Commands sent to a single channel, in order
        pub fn channel_commands(&self, channel: Channel) -> Vec<u16> {
            self.commands
                .iter()
                .filter(|(ch, _)| *ch == channel)
                .map(|&(_, pulse)| pulse)
                .collect()
        }
    }

    /// Current sample, holding the last value once the script runs out
    fn sample<T: Copy + Default>(values: &[T], idx: usize) -> T {
        match values.len() {
            0 => T::default(),
            len => values[idx.min(len - 1)],
        }
    }

    impl VehicleState for ScriptedVehicle {
        fn position(&self) -> GeoPoint {
            sample(&self.positions, self.position_idx)
        }

        fn altitude_m(&self) -> f32 {
            sample(&self.altitudes, self.altitude_idx)
        }

        fn heading_deg(&self) -> f32 {
            sample(&self.headings, self.heading_idx)
        }

        fn is_armable(&self) -> bool {
            true
        }

        fn is_armed(&self) -> bool {
            true
        }
    }

    impl ActuatorInterface for ScriptedVehicle {
        fn apply_overrides(&mut self, overrides: &ChannelOverrides) -> Result<(), &'static str> {
            if self.reject_overrides {
                return Err("override rejected");
            }
            for (channel, pulse) in overrides.iter() {
                self.commands.push((channel, pulse));
            }
            Ok(())
        }
    }

    impl Pacer for ScriptedVehicle {
        /// Advancing the script stands in for the passage of time.
        /// Indices move on pause, not on read, so every read within one
        /// tick observes the same sample.
        fn pause_ms(&mut self, ms: u32) {
            self.pauses.push(ms);
            self.heading_idx += 1;
            self.altitude_idx += 1;
            self.position_idx += 1;
        }
    }
}
