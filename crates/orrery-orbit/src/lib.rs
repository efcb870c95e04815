//! Keplerian orbital motion: time in, 3-D offset out.
//!
//! An [`Orbit`] is built once from a declarative [`OrbitDefinition`],
//! validating ranges and caching everything derivable (eccentricity,
//! sweep rate, the composed orbit-shape matrix). Per-tick evaluation is
//! then a fixed-cost Newton solve plus two matrix applications.

mod error;
mod orbit;

pub use error::OrbitError;
pub use orbit::{Orbit, OrbitDefinition, approximate_eccentric_anomaly};
