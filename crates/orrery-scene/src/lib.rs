//! The space object graph: a parent/child hierarchy of astronomical
//! bodies resolved relative to an arbitrary observer.
//!
//! A [`Scene`] is built in one pass from declarative RON definitions,
//! linked (parent keys resolved, cycles rejected), and then advanced
//! once per rendered frame with [`Scene::update`]. Reloading a
//! resource set discards the whole scene and builds a fresh one; no
//! partial mutation.

mod definition;
mod error;
mod object;
mod scene;
mod view_center;

pub use definition::{FadeOutDef, ObjectDef, RotationDef, SceneDef, TextureLayerDef};
pub use error::SceneError;
pub use object::{Body, FadeOut, ObjectId, SpaceObject, TextureLayer};
pub use scene::Scene;
pub use view_center::{ViewCenter, ViewCenterRegistry};
