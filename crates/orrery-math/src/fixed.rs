use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Fixed-point scalar with 32 fractional bits.
///
/// Layout: [96 integer bits][32 fractional bits]
///
/// The raw i128 value equals (real_value × 2³²).
///
/// Addition and subtraction are plain integer operations, so combining
/// a galaxy-scale value with a body-scale value never cancels the
/// smaller operand the way f64 arithmetic would.
///
/// Range: approximately ±3.96×10²⁸ (integer part)
/// Resolution: 2⁻³² ≈ 2.33×10⁻¹⁰
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fixed {
    raw: i128,
}

const FRAC_BITS: u32 = 32;
const FRAC_SCALE: i128 = 1i128 << FRAC_BITS;

impl Fixed {
    pub const ZERO: Fixed = Fixed { raw: 0 };

    /// Create from the raw i128 representation directly.
    pub const fn from_raw(raw: i128) -> Self {
        Self { raw }
    }

    /// Access the raw i128 value.
    pub const fn to_raw(self) -> i128 {
        self.raw
    }

    /// Create from a whole integer (no fractional part).
    pub const fn from_int(value: i128) -> Self {
        Self {
            raw: value << FRAC_BITS,
        }
    }

    /// Truncate to the integer part (toward negative infinity).
    pub const fn to_int(self) -> i128 {
        self.raw >> FRAC_BITS
    }

    /// Scale by an f64 factor.
    ///
    /// The multiply happens in f64, so the result is only as precise as
    /// f64 allows. Used for uniform scaling where the operand is already
    /// derived from render math; never used on the add/sub path.
    pub fn scale(self, factor: f64) -> Fixed {
        Fixed {
            raw: (self.raw as f64 * factor) as i128,
        }
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let as_f64: f64 = (*self).into();
        write!(f, "{:.9}", as_f64)
    }
}

impl From<i128> for Fixed {
    fn from(value: i128) -> Self {
        Self::from_int(value)
    }
}

impl From<f64> for Fixed {
    fn from(value: f64) -> Self {
        Self {
            raw: (value * FRAC_SCALE as f64) as i128,
        }
    }
}

impl From<Fixed> for f64 {
    fn from(fixed: Fixed) -> f64 {
        fixed.raw as f64 / FRAC_SCALE as f64
    }
}

impl Add for Fixed {
    type Output = Fixed;

    fn add(self, rhs: Fixed) -> Self::Output {
        Fixed {
            raw: self.raw + rhs.raw,
        }
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    fn sub(self, rhs: Fixed) -> Self::Output {
        Fixed {
            raw: self.raw - rhs.raw,
        }
    }
}

impl Neg for Fixed {
    type Output = Fixed;

    fn neg(self) -> Self::Output {
        Fixed { raw: -self.raw }
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Fixed) {
        self.raw += rhs.raw;
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, rhs: Fixed) {
        self.raw -= rhs.raw;
    }
}
