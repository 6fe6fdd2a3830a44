//! Capability traits injected into the guidance controllers
//!
//! The controllers never touch a global vehicle object. Each one takes
//! the live vehicle state, the actuator transport, and the control-loop
//! pacing as explicit trait parameters, so the same controller code
//! runs against a real MAVLink link, a lockstep simulator, or a
//! scripted test fake.

use crate::channels::ChannelOverrides;
use crate::nav::GeoPoint;

/// Read-only live vehicle state feed
pub trait VehicleState {
    /// Current position (latitude/longitude, degrees)
    fn position(&self) -> GeoPoint;

    /// Current altitude relative to home (meters)
    fn altitude_m(&self) -> f32;

    /// Current heading in degrees, [0, 360), 0 = North
    fn heading_deg(&self) -> f32;

    /// True once the autopilot's pre-arm checks pass
    fn is_armable(&self) -> bool;

    /// True while the vehicle is armed
    fn is_armed(&self) -> bool;
}

/// Channel override transport
///
/// Implementations own the read-modify-write merge into the vehicle's
/// persistent override set: a partial update must never drop another
/// channel's last commanded value.
pub trait ActuatorInterface {
    /// Merge a partial override map into the vehicle's override set
    fn apply_overrides(&mut self, overrides: &ChannelOverrides) -> Result<(), &'static str>;
}

/// Control-loop pacing
///
/// Real implementations block for the requested interval (and may pump
/// telemetry while waiting); the simulator advances lockstep physics;
/// tests use [`NoopPacer`] or a fake clock.
pub trait Pacer {
    /// Pause the control loop for `ms` milliseconds
    fn pause_ms(&mut self, ms: u32);
}

/// Vehicle lifecycle commands consumed by the pre-flight sequence
///
/// The guidance core only observes `armable`/`armed`; issuing the mode
/// change and the arm command is transport territory. The trait lives
/// here so mission code stays generic over real and simulated vehicles.
pub trait VehicleLifecycle {
    /// Switch the autopilot flight mode (e.g. "ALT_HOLD")
    fn set_flight_mode(&mut self, mode: &'static str) -> Result<(), &'static str>;

    /// Request arming
    fn arm(&mut self) -> Result<(), &'static str>;
}

/// Pacer that returns immediately, for deterministic tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPacer;

impl Pacer for NoopPacer {
    fn pause_ms(&mut self, _ms: u32) {}
}
