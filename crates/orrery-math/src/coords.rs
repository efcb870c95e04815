use std::ops::{Add, AddAssign, Sub, SubAssign};

use glam::DVec3;

use crate::fixed::Fixed;

/// Kilometers per light-year.
pub const KM_PER_LY: f64 = 9.460_730_472_580_8e12;

/// An immutable position in space, measured in kilometers per axis.
///
/// Each axis is a [`Fixed`] i128 fixed-point value, so adding a star's
/// galaxy-scale offset to a moon's orbit-scale offset is exact: the two
/// magnitudes never cancel each other. The only lossy step is
/// [`SpaceCoords::relative_to`], which subtracts exactly in i128 and
/// then converts the (much smaller) camera-relative delta to f64.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct SpaceCoords {
    pub x: Fixed,
    pub y: Fixed,
    pub z: Fixed,
}

impl SpaceCoords {
    pub const ZERO: SpaceCoords = SpaceCoords {
        x: Fixed::ZERO,
        y: Fixed::ZERO,
        z: Fixed::ZERO,
    };

    pub const fn new(x: Fixed, y: Fixed, z: Fixed) -> Self {
        Self { x, y, z }
    }

    /// Create from a kilometer-valued vector.
    pub fn from_km(km: DVec3) -> Self {
        Self {
            x: Fixed::from(km.x),
            y: Fixed::from(km.y),
            z: Fixed::from(km.z),
        }
    }

    /// Create from a light-year-valued vector.
    pub fn from_ly(ly: DVec3) -> Self {
        Self::from_km(ly * KM_PER_LY)
    }

    /// Approximate kilometer value of each axis as f64.
    ///
    /// Lossy for coordinates beyond ~2⁵³ km; prefer
    /// [`SpaceCoords::relative_to`] for anything camera-facing.
    pub fn as_km(&self) -> DVec3 {
        DVec3::new(self.x.into(), self.y.into(), self.z.into())
    }

    /// Uniformly scale by an f64 factor.
    pub fn scale(&self, factor: f64) -> SpaceCoords {
        SpaceCoords {
            x: self.x.scale(factor),
            y: self.y.scale(factor),
            z: self.z.scale(factor),
        }
    }

    /// Euclidean distance to another position, in kilometers.
    ///
    /// The subtraction is exact; only the final norm is f64.
    pub fn distance(&self, other: &SpaceCoords) -> f64 {
        (*self - *other).as_km().length()
    }

    /// The camera-relative render vector: this position expressed
    /// relative to `origin`, in kilometers.
    pub fn relative_to(&self, origin: &SpaceCoords) -> DVec3 {
        (*self - *origin).as_km()
    }
}

impl Add for SpaceCoords {
    type Output = SpaceCoords;

    fn add(self, rhs: SpaceCoords) -> Self::Output {
        SpaceCoords {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for SpaceCoords {
    type Output = SpaceCoords;

    fn sub(self, rhs: SpaceCoords) -> Self::Output {
        SpaceCoords {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl AddAssign for SpaceCoords {
    fn add_assign(&mut self, rhs: SpaceCoords) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl SubAssign for SpaceCoords {
    fn sub_assign(&mut self, rhs: SpaceCoords) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}
