use glam::DVec3;

/// Orientation of a local frame: three rotation angles in radians,
/// applied in the fixed order X, then Z, then Y.
///
/// The order is non-commutative. Every placement downstream (orbit
/// planes, star field shapes) depends on it, so it must never change.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct AxisRotation {
    pub x_axis: f64,
    pub z_axis: f64,
    pub y_axis: f64,
}

impl AxisRotation {
    pub const IDENTITY: AxisRotation = AxisRotation {
        x_axis: 0.0,
        z_axis: 0.0,
        y_axis: 0.0,
    };

    /// Angles in radians.
    pub const fn new(x_axis: f64, z_axis: f64, y_axis: f64) -> Self {
        Self {
            x_axis,
            z_axis,
            y_axis,
        }
    }

    /// Angles in degrees, as they appear in object definitions.
    pub fn from_degrees(x_axis: f64, z_axis: f64, y_axis: f64) -> Self {
        Self {
            x_axis: x_axis.to_radians(),
            z_axis: z_axis.to_radians(),
            y_axis: y_axis.to_radians(),
        }
    }

    /// Accumulate a child frame's rotation onto this one, per axis.
    pub fn combine(&self, other: &AxisRotation) -> AxisRotation {
        AxisRotation {
            x_axis: self.x_axis + other.x_axis,
            z_axis: self.z_axis + other.z_axis,
            y_axis: self.y_axis + other.y_axis,
        }
    }

    /// Rotate a vector through this frame: Rx, then Rz, then Ry.
    pub fn rotate(&self, v: DVec3) -> DVec3 {
        let (sin_x, cos_x) = self.x_axis.sin_cos();
        let (sin_z, cos_z) = self.z_axis.sin_cos();
        let (sin_y, cos_y) = self.y_axis.sin_cos();

        // About X.
        let ax = v.x;
        let ay = v.y * cos_x - v.z * sin_x;
        let az = v.y * sin_x + v.z * cos_x;

        // About Z.
        let bx = ax * cos_z - ay * sin_z;
        let by = ax * sin_z + ay * cos_z;
        let bz = az;

        // About Y.
        DVec3::new(bx * cos_y + bz * sin_y, by, -bx * sin_y + bz * cos_y)
    }
}
