use orrery_math::{AxisRotation, KM_PER_LY, SpaceCoords};
use orrery_orbit::Orbit;
use orrery_space::{StarField, StarInfo};

/// Handle into a [`crate::Scene`]'s object arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) usize);

/// What a node is, as a closed set of variants.
///
/// A star field node carries its generated cache alongside the
/// parameters: the cache is populated when the scene loads, so replay
/// can never run for a field whose generate phase has not.
#[derive(Clone, Debug)]
pub enum Body {
    /// Fixed offset within the parent frame.
    Static,
    /// Offset computed from an orbit each tick.
    Orbiting(Orbit),
    /// A procedurally generated point-light population.
    StarField { field: StarField, cache: StarInfo },
}

/// One node of the object graph.
///
/// `resolved` and `last_distance` are refreshed by
/// [`crate::Scene::update`] each tick and stored here directly rather
/// than behind a shared mutable reference.
#[derive(Clone, Debug)]
pub struct SpaceObject {
    pub(crate) key: String,
    pub(crate) parent: Option<ObjectId>,
    pub(crate) coords: SpaceCoords,
    pub(crate) axis_rotation: AxisRotation,
    /// Own rotation combined with every ancestor's, fixed at link time.
    pub(crate) accumulated_rotation: AxisRotation,
    pub(crate) texture_layers: Vec<TextureLayer>,
    pub(crate) fade_out: FadeOut,
    pub(crate) body: Body,
    /// Absolute position, refreshed each tick.
    pub(crate) resolved: SpaceCoords,
    /// Distance from the current view center in kilometers, refreshed
    /// each tick.
    pub(crate) last_distance: f64,
}

impl SpaceObject {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub fn coords(&self) -> SpaceCoords {
        self.coords
    }

    pub fn axis_rotation(&self) -> AxisRotation {
        self.axis_rotation
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn texture_layers(&self) -> &[TextureLayer] {
        &self.texture_layers
    }

    pub fn fade_out(&self) -> FadeOut {
        self.fade_out
    }

    /// Distance from the view center as of the last
    /// [`crate::Scene::update`], in kilometers.
    pub fn last_distance(&self) -> f64 {
        self.last_distance
    }
}

/// A renderable surface descriptor with load-time unit conversion
/// applied (rotation in radians).
#[derive(Clone, Debug, PartialEq)]
pub struct TextureLayer {
    pub texture: String,
    pub size: f64,
    pub rgba: [f32; 4],
    pub rotation: f64,
    pub blend: bool,
}

/// Brightness-versus-distance policy, distances in kilometers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeOut {
    /// Full brightness up to here.
    pub start_km: f64,
    /// Invisible beyond here.
    pub end_km: f64,
}

impl FadeOut {
    /// Planets disappear once the observer leaves their system.
    pub const PLANET: FadeOut = FadeOut {
        start_km: 3.0e9,
        end_km: 1.5e10,
    };

    /// Star fields stay visible across interstellar distances.
    pub const STAR: FadeOut = FadeOut {
        start_km: 5.0 * KM_PER_LY,
        end_km: 15.0 * KM_PER_LY,
    };

    /// Brightness factor in [0, 1] at the given distance: full below
    /// `start_km`, linear falloff to zero at `end_km`.
    pub fn brightness(&self, distance_km: f64) -> f32 {
        if distance_km <= self.start_km {
            1.0
        } else if distance_km >= self.end_km {
            0.0
        } else {
            (1.0 - (distance_km - self.start_km) / (self.end_km - self.start_km)) as f32
        }
    }
}
