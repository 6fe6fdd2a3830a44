//! skyguide_sitl - Lockstep simulated vehicle for guidance testing
//!
//! A self-contained copter simulation with no external dependencies,
//! suitable for CI and integration testing. The simulated vehicle
//! implements every capability trait the guidance controllers consume,
//! and its pacer advances physics in fixed sub-steps instead of
//! sleeping, so full missions run deterministically and instantly.

mod sim;

pub use sim::{SimConfig, SimVehicle};
