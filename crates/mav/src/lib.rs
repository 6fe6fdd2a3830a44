//! skyguide_mav - Host-side MAVLink vehicle link and mission sequencing
//!
//! Connects the pure guidance controllers in `skyguide_core` to a real
//! autopilot over MAVLink: a synchronous TCP link that caches telemetry
//! into the [`VehicleState`](skyguide_core::VehicleState) read surface,
//! merges channel overrides into RC_CHANNELS_OVERRIDE messages, and
//! drives the staged flight sequence (arm, ascend, approach, final yaw).
//!
//! Everything here is single-threaded cooperative polling: the link's
//! pacer pumps incoming telemetry until each control-loop deadline
//! instead of sleeping blind.

pub mod error;
pub mod link;
pub mod mission;
pub mod runner;

pub use error::{LinkError, MissionError};
pub use link::MavlinkVehicle;
pub use mission::{fly, prepare, MissionPlan};
pub use runner::run_logged;
