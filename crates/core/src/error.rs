//! Guidance error types
//!
//! The control algorithms themselves are pure arithmetic and do not
//! fail; errors surface from the actuator transport or from the
//! optional tick budget on the run loop.

use core::fmt;

/// Errors that can occur while running a guidance controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidanceError {
    /// The tick budget was exhausted before the termination condition
    /// became true
    Timeout {
        /// Controller stage that timed out
        stage: &'static str,
        /// Number of ticks executed before giving up
        ticks: u32,
    },
    /// The actuator transport rejected a channel override
    Actuator(&'static str),
}

impl fmt::Display for GuidanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuidanceError::Timeout { stage, ticks } => {
                write!(f, "{} did not converge within {} ticks", stage, ticks)
            }
            GuidanceError::Actuator(reason) => write!(f, "actuator rejected command: {}", reason),
        }
    }
}
