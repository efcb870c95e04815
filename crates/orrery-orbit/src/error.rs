//! Orbit configuration error types.

/// Errors rejected when constructing an [`crate::Orbit`] from a
/// definition. Out-of-range values are never silently clamped.
#[derive(Debug, thiserror::Error)]
pub enum OrbitError {
    /// Periapsis below the minimum of 1.
    #[error("periapsis {periapsis} must be at least 1")]
    PeriapsisTooSmall { periapsis: f64 },

    /// Apoapsis closer than periapsis.
    #[error("apoapsis {apoapsis} must be at least periapsis {periapsis}")]
    ApoapsisBelowPeriapsis { apoapsis: f64, periapsis: f64 },

    /// Zero or negative orbital period; period 0 would divide by zero
    /// in the sweep rate.
    #[error("orbital period {period} must be positive")]
    NonPositivePeriod { period: i64 },

    /// Negative clamp distance.
    #[error("orbit clamp distance {clamp} must not be negative")]
    NegativeClampDistance { clamp: f64 },
}
