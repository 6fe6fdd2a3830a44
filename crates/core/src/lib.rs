//! skyguide_core - Pure no_std guidance logic for channel-override UAV control
//!
//! This crate contains the platform-agnostic navigation and control
//! algorithms that can be tested on host without any transport or
//! platform dependencies.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: Vehicle state, actuators, and pacing
//!   injected via traits, never reached through ambient globals
//!
//! # Modules
//!
//! - [`traits`]: Capability traits (VehicleState, ActuatorInterface,
//!   Pacer, VehicleLifecycle)
//! - [`channels`]: RC channel ids, pulse constants, and partial
//!   override maps
//! - [`nav`]: Geographic math, heading-window classification, and the
//!   image-to-ground projection
//! - [`control`]: Tick-based controller state machines (yaw hold,
//!   altitude hold, waypoint approach) and the run loop
//! - [`error`]: Guidance error types

#![no_std]

pub mod channels;
pub mod control;
pub mod error;
pub mod nav;
pub mod traits;

pub use channels::{Channel, ChannelOverrides, PULSE_MAX, PULSE_MIN, PULSE_NEUTRAL};
pub use control::{
    run_to_completion, AltitudeHoldController, ApproachController, Controller, TickOutcome,
    YawController,
};
pub use error::GuidanceError;
pub use nav::{GeoPoint, HeadingWindow, RangeCheck};
pub use traits::{ActuatorInterface, NoopPacer, Pacer, VehicleLifecycle, VehicleState};
