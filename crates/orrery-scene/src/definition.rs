//! Declarative per-object definitions, as deserialized from RON.
//!
//! These are raw: distances in light-years, angles in degrees,
//! parents by string key. Range validation and parent resolution
//! happen when a [`crate::Scene`] is built from them.

use serde::{Deserialize, Serialize};

use orrery_orbit::OrbitDefinition;
use orrery_space::StarFieldDef;

/// A full resource set: every object definition for one scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDef {
    pub objects: Vec<ObjectDef>,
}

/// One astronomical body as written in a resource pack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectDef {
    /// Stable key other definitions reference as `parent`.
    pub key: String,
    /// Parent object key; absent for a root object.
    #[serde(default)]
    pub parent: Option<String>,
    /// Offset within the parent frame, in light-years.
    #[serde(default)]
    pub coords_ly: [f64; 3],
    /// Orientation of this object's local frame, degrees.
    #[serde(default)]
    pub axis_rotation: RotationDef,
    /// Present for orbiting bodies; replaces `coords_ly` as the local
    /// offset.
    #[serde(default)]
    pub orbit: Option<OrbitDefinition>,
    /// Present for star field bodies (galaxies).
    #[serde(default)]
    pub star_field: Option<StarFieldDef>,
    /// Renderable surface descriptors, consumed by the render boundary.
    #[serde(default)]
    pub texture_layers: Vec<TextureLayerDef>,
    /// Brightness-versus-distance policy; a body-appropriate default
    /// applies when absent.
    #[serde(default)]
    pub fade_out: Option<FadeOutDef>,
}

/// Axis rotation angles in degrees, applied X then Z then Y.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationDef {
    pub x_axis: f64,
    pub z_axis: f64,
    pub y_axis: f64,
}

/// One renderable texture layer. Data only; texture I/O is the render
/// boundary's concern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureLayerDef {
    /// Resource path of the texture.
    pub texture: String,
    /// Apparent size of the layer.
    pub size: f64,
    /// RGBA tint.
    pub rgba: [f32; 4],
    /// In-plane rotation, degrees.
    pub rotation: f64,
    /// Whether the layer alpha-blends over the ones below it.
    pub blend: bool,
}

impl Default for TextureLayerDef {
    fn default() -> Self {
        Self {
            texture: String::new(),
            size: 1.0,
            rgba: [1.0, 1.0, 1.0, 1.0],
            rotation: 0.0,
            blend: true,
        }
    }
}

/// Fade-out distances in light-years.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FadeOutDef {
    /// Full brightness up to this distance.
    pub start_ly: f64,
    /// Zero brightness beyond this distance.
    pub end_ly: f64,
}
