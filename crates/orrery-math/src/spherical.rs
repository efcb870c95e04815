use glam::DVec3;

/// Spherical coordinates: radius, polar angle theta (from +Y), azimuth
/// phi (around Y in the XZ plane).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SphericalCoords {
    pub radius: f64,
    pub theta: f64,
    pub phi: f64,
}

impl SphericalCoords {
    pub const fn new(radius: f64, theta: f64, phi: f64) -> Self {
        Self { radius, theta, phi }
    }

    /// Pure conversion to cartesian coordinates:
    /// x = r·sinθ·cosφ, y = r·cosθ, z = r·sinθ·sinφ.
    pub fn to_cartesian(&self) -> DVec3 {
        let sin_theta = self.theta.sin();
        DVec3::new(
            self.radius * sin_theta * self.phi.cos(),
            self.radius * self.theta.cos(),
            self.radius * sin_theta * self.phi.sin(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_pole_points_up() {
        let v = SphericalCoords::new(2.0, 0.0, 0.0).to_cartesian();
        assert!((v - DVec3::new(0.0, 2.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_equator_azimuth_zero_points_along_x() {
        let v = SphericalCoords::new(3.0, FRAC_PI_2, 0.0).to_cartesian();
        assert!((v - DVec3::new(3.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_equator_azimuth_quarter_points_along_z() {
        let v = SphericalCoords::new(1.0, FRAC_PI_2, FRAC_PI_2).to_cartesian();
        assert!((v - DVec3::new(0.0, 0.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_radius_is_preserved() {
        for i in 0..16 {
            let theta = PI * (i as f64 / 16.0);
            let phi = 2.0 * PI * (i as f64 / 16.0);
            let v = SphericalCoords::new(7.5, theta, phi).to_cartesian();
            assert!(
                (v.length() - 7.5).abs() < 1e-9,
                "radius not preserved at theta={theta}, phi={phi}"
            );
        }
    }
}
