//! Navigation math and heading-window classification
//!
//! Pure functions and value types used by the guidance controllers.

pub mod geo;
pub mod groundpoint;
mod heading;
mod types;

pub use heading::{HeadingWindow, RangeCheck};
pub use types::GeoPoint;
