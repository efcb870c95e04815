use std::f32::consts::TAU;

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A single star's generated attributes, cached at its slot index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarEntry {
    /// Offset from the field's center in kilometers, axis rotation
    /// already applied.
    pub offset: DVec3,
    /// Brightness in [0, 1]; power-law distributed, most stars dim.
    pub brightness: f32,
    /// Approximate blackbody color for the star's temperature.
    pub color: [f32; 3],
    /// Render size in arbitrary units.
    pub size: f32,
}

/// The per-field cache written exactly once per load by the generate
/// phase and read every frame by [`StarInfo::replay`].
///
/// Holding a `StarInfo` is proof the generate phase ran: replay exists
/// only as a method here, so it can never execute first.
#[derive(Clone, Debug, PartialEq)]
pub struct StarInfo {
    seed: u64,
    entries: Vec<StarEntry>,
}

/// One star as handed to the render boundary for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarInstance {
    /// Camera-relative position in kilometers.
    pub position: DVec3,
    pub brightness: f32,
    pub color: [f32; 3],
    pub size: f32,
    /// Per-star flicker phase in [0, τ), replayed deterministically
    /// from the field seed.
    pub twinkle_phase: f32,
}

impl StarInfo {
    pub(crate) fn new(seed: u64, entries: Vec<StarEntry>) -> Self {
        Self { seed, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[StarEntry] {
        &self.entries
    }

    /// Replay the cached stars against the current camera-relative
    /// field position.
    ///
    /// Placement is not recomputed. Secondary visual attributes are
    /// replayed from a fresh sequence seeded with the stored field
    /// seed, so every frame sees the same per-star values.
    pub fn replay(&self, relative: DVec3) -> Vec<StarInstance> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.entries
            .iter()
            .map(|entry| StarInstance {
                position: entry.offset + relative,
                brightness: entry.brightness,
                color: entry.color,
                size: entry.size,
                twinkle_phase: rng.random::<f32>() * TAU,
            })
            .collect()
    }
}

/// Convert a blackbody temperature in Kelvin to an approximate sRGB
/// color, via the Planckian locus curve fit.
pub fn blackbody_to_rgb(temperature_k: f32) -> [f32; 3] {
    let t = temperature_k / 100.0;

    let red = if t <= 66.0 {
        1.0
    } else {
        channel(329.698_73 * (t - 60.0).powf(-0.133_204_76))
    };

    let green = if t <= 66.0 {
        channel(99.470_8 * t.ln() - 161.119_57)
    } else {
        channel(288.122_17 * (t - 60.0).powf(-0.075_514_85))
    };

    let blue = if t >= 66.0 {
        1.0
    } else if t <= 19.0 {
        0.0
    } else {
        channel(138.517_73 * (t - 10.0).ln() - 305.044_8)
    };

    [red, green, blue]
}

fn channel(value_255: f32) -> f32 {
    (value_255 / 255.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info() -> StarInfo {
        let entries = (0..10)
            .map(|i| StarEntry {
                offset: DVec3::new(i as f64, -(i as f64), 2.0 * i as f64),
                brightness: 0.5,
                color: [1.0, 0.9, 0.8],
                size: 0.2,
            })
            .collect();
        StarInfo::new(7, entries)
    }

    #[test]
    fn test_replay_at_zero_matches_cached_offsets() {
        let info = sample_info();
        let instances = info.replay(DVec3::ZERO);
        for (entry, instance) in info.entries().iter().zip(&instances) {
            assert_eq!(entry.offset, instance.position);
        }
    }

    #[test]
    fn test_replay_translates_every_star() {
        let info = sample_info();
        let relative = DVec3::new(100.0, -50.0, 25.0);
        let instances = info.replay(relative);
        for (entry, instance) in info.entries().iter().zip(&instances) {
            assert_eq!(entry.offset + relative, instance.position);
        }
    }

    #[test]
    fn test_replay_is_deterministic_across_frames() {
        let info = sample_info();
        let first = info.replay(DVec3::ZERO);
        let second = info.replay(DVec3::ZERO);
        assert_eq!(first, second);
    }

    #[test]
    fn test_twinkle_phase_in_range() {
        let info = sample_info();
        for instance in info.replay(DVec3::ZERO) {
            assert!((0.0..TAU).contains(&instance.twinkle_phase));
        }
    }

    #[test]
    fn test_blackbody_red_at_low_temperature() {
        let color = blackbody_to_rgb(2000.0);
        assert!(
            color[0] > color[2],
            "at 2000K red ({}) should exceed blue ({})",
            color[0],
            color[2]
        );
    }

    #[test]
    fn test_blackbody_blue_at_high_temperature() {
        let color = blackbody_to_rgb(30000.0);
        assert!(color[2] > 0.5, "at 30000K blue should be high");
    }

    #[test]
    fn test_blackbody_channels_in_unit_range() {
        for temp in [1000.0, 3000.0, 6600.0, 15000.0, 40000.0] {
            for (i, ch) in blackbody_to_rgb(temp).iter().enumerate() {
                assert!(
                    (0.0..=1.0).contains(ch),
                    "channel {i} = {ch} out of range at {temp}K"
                );
            }
        }
    }
}
