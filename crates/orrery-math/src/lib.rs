//! Precision-preserving astronomical coordinates and axis rotations.
//!
//! Positions at galaxy scale cannot live in a single f64: adding a
//! light-year offset to a kilometer offset silently drops the kilometer.
//! This crate stores each axis as an i128 fixed-point value so that
//! addition and subtraction are exact integer operations at any
//! magnitude, and only the final camera-relative delta is projected
//! down to f64 for rendering.

mod coords;
mod fixed;
mod rotation;
mod spherical;

pub use coords::{KM_PER_LY, SpaceCoords};
pub use fixed::Fixed;
pub use rotation::AxisRotation;
pub use spherical::SphericalCoords;
