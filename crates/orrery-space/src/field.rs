use std::f64::consts::{PI, TAU};

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use orrery_math::{AxisRotation, KM_PER_LY, SphericalCoords};

use crate::info::{StarEntry, StarInfo};

/// Inclusive upper bound on spiral arm count.
pub const MAX_ARMS: u32 = 8;

/// Inclusive upper bound on stars per arm (spiral) or total
/// (elliptical). Generation is synchronous, so the bound keeps a
/// single generate call affordable.
pub const MAX_STARS: u32 = 30_000;

/// Floor for progress-along-arm in the spiral jitter term.
///
/// The jitter scales by `arm_thickness / (progress · 1.5)`, which
/// diverges as progress approaches zero at the arm's innermost star.
/// Flooring progress at 1% of the arm caps the jitter at ~67× the arm
/// thickness instead of letting it blow up.
const MIN_ARM_PROGRESS: f64 = 0.01;

/// Base radius of the logarithmic spiral, in pre-scale units.
const SPIRAL_BASE_RADIUS: f64 = 5.0;

/// Growth rate of the logarithmic spiral: r = base·e^(winding·angle).
const SPIRAL_WINDING: f64 = 0.25;

/// A field's overall footprint is its diameter divided by this.
const SIZE_DIVISOR: f64 = 30.0;

/// Star field configuration errors; never silently clamped.
#[derive(Debug, thiserror::Error)]
pub enum StarFieldError {
    #[error("number of arms {arms} must be between 1 and {MAX_ARMS}")]
    ArmCountOutOfRange { arms: u32 },

    #[error("star count {stars} must be between 1 and {MAX_STARS}")]
    StarCountOutOfRange { stars: u32 },

    #[error("diameter {diameter_ly} ly must be positive")]
    NonPositiveDiameter { diameter_ly: f64 },
}

/// Variant-specific shape parameters, as written in definitions.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Shape {
    /// Logarithmic-spiral arms around the field center.
    Spiral {
        number_of_arms: u32,
        arm_thickness: f64,
    },
    /// A stretched spheroid cloud with no arm structure.
    Elliptical {
        x_stretch: f64,
        y_stretch: f64,
        z_stretch: f64,
    },
}

/// Raw star field parameters as they appear in an object definition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StarFieldDef {
    /// Deterministic generation seed.
    pub seed: u64,
    /// Field diameter in light-years.
    pub diameter_ly: f64,
    /// Stars per arm (spiral) or total (elliptical).
    pub stars: u32,
    pub shape: Shape,
}

/// A validated star field: a point-light population placed
/// deterministically from the stored seed.
#[derive(Clone, Debug, PartialEq)]
pub struct StarField {
    seed: u64,
    diameter_ly: f64,
    stars: u32,
    shape: Shape,
}

impl TryFrom<StarFieldDef> for StarField {
    type Error = StarFieldError;

    fn try_from(def: StarFieldDef) -> Result<Self, StarFieldError> {
        if def.stars < 1 || def.stars > MAX_STARS {
            return Err(StarFieldError::StarCountOutOfRange { stars: def.stars });
        }
        if def.diameter_ly <= 0.0 {
            return Err(StarFieldError::NonPositiveDiameter {
                diameter_ly: def.diameter_ly,
            });
        }
        if let Shape::Spiral { number_of_arms, .. } = &def.shape
            && !(1..=MAX_ARMS).contains(number_of_arms)
        {
            return Err(StarFieldError::ArmCountOutOfRange {
                arms: *number_of_arms,
            });
        }

        Ok(StarField {
            seed: def.seed,
            diameter_ly: def.diameter_ly,
            stars: def.stars,
            shape: def.shape,
        })
    }
}

impl StarField {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn diameter_ly(&self) -> f64 {
        self.diameter_ly
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Total number of star slots this field generates.
    pub fn star_count(&self) -> usize {
        match self.shape {
            Shape::Spiral { number_of_arms, .. } => (self.stars * number_of_arms) as usize,
            Shape::Elliptical { .. } => self.stars as usize,
        }
    }

    /// The generate phase: run once per load.
    ///
    /// Reseeds a fresh deterministic sequence from the stored seed and
    /// fills every star slot with a placed, rotated offset plus derived
    /// visual attributes. Identical seed and shape parameters always
    /// produce an identical cache.
    pub fn generate(&self, axis_rotation: &AxisRotation) -> StarInfo {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let entries = match self.shape {
            Shape::Spiral {
                number_of_arms,
                arm_thickness,
            } => self.place_spiral(&mut rng, number_of_arms, arm_thickness, axis_rotation),
            Shape::Elliptical {
                x_stretch,
                y_stretch,
                z_stretch,
            } => self.place_elliptical(
                &mut rng,
                DVec3::new(x_stretch, y_stretch, z_stretch),
                axis_rotation,
            ),
        };

        log::info!(
            "generated {} stars for field seed {}",
            entries.len(),
            self.seed
        );
        StarInfo::new(self.seed, entries)
    }

    fn place_spiral(
        &self,
        rng: &mut ChaCha8Rng,
        arms: u32,
        arm_thickness: f64,
        axis_rotation: &AxisRotation,
    ) -> Vec<StarEntry> {
        let size_multiplier = self.diameter_ly * KM_PER_LY / SIZE_DIVISOR;
        let mut entries = Vec::with_capacity(self.star_count());

        for arm in 0..arms {
            let arm_rotation = PI * arm as f64 / (arms as f64 / 2.0);
            let arm_length = rng.random::<f64>() + 1.5;

            for i in 0..self.stars {
                let progress = (i as f64 / self.stars as f64).max(MIN_ARM_PROGRESS);
                let angle = arm_length * PI * progress - arm_rotation;
                let radius = spiral_radius(SPIRAL_BASE_RADIUS, angle, arm_rotation);

                let jitter = SphericalCoords::new(
                    rng.random::<f64>() * arm_thickness,
                    rng.random::<f64>() * PI,
                    rng.random::<f64>() * TAU,
                )
                .to_cartesian();
                let falloff = arm_thickness / (progress * 1.5);

                let local = DVec3::new(
                    radius * angle.cos() + jitter.x * falloff,
                    jitter.y * falloff,
                    radius * angle.sin() + jitter.z * falloff,
                ) * size_multiplier;

                entries.push(star_entry(axis_rotation.rotate(local), rng));
            }
        }
        entries
    }

    fn place_elliptical(
        &self,
        rng: &mut ChaCha8Rng,
        stretch: DVec3,
        axis_rotation: &AxisRotation,
    ) -> Vec<StarEntry> {
        let diameter_km = self.diameter_ly * KM_PER_LY;
        let mut entries = Vec::with_capacity(self.star_count());

        for _ in 0..self.stars {
            let local = SphericalCoords::new(
                rng.random::<f64>() * diameter_km,
                rng.random::<f64>() * PI,
                rng.random::<f64>() * TAU,
            )
            .to_cartesian()
                * stretch;

            entries.push(star_entry(axis_rotation.rotate(local), rng));
        }
        entries
    }
}

/// Logarithmic spiral: radius grows exponentially with the angle swept
/// from the arm's own zero direction.
fn spiral_radius(base: f64, angle: f64, arm_rotation: f64) -> f64 {
    base * (SPIRAL_WINDING * (angle + arm_rotation)).exp()
}

/// Draw the remaining visual attributes for one placed star. The draw
/// order here is part of the determinism contract.
fn star_entry(offset: DVec3, rng: &mut ChaCha8Rng) -> StarEntry {
    // Power-law brightness: many dim stars, few bright ones.
    let brightness = rng.random::<f32>().powf(4.0);
    let temperature = 2000.0 + brightness * 28000.0;
    let size = 0.15 + rng.random::<f32>() * 0.15;

    StarEntry {
        offset,
        brightness,
        color: crate::info::blackbody_to_rgb(temperature),
        size,
    }
}
