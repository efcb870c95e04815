//! Scene loading and linking error types.

use orrery_orbit::OrbitError;
use orrery_space::StarFieldError;

/// Errors that reject a scene at load or link time. Every variant is a
/// hard error; the scene is never partially constructed.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The definition text is not valid RON.
    #[error("failed to parse scene definitions: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Two objects share a key.
    #[error("duplicate object key '{key}'")]
    DuplicateKey { key: String },

    /// A parent key does not name any loaded object.
    #[error("object '{object}' references unknown parent '{parent}'")]
    UnknownParent { object: String, parent: String },

    /// Walking the object's ancestry revisits the object itself.
    #[error("object '{key}' is part of a parent cycle")]
    ParentCycle { key: String },

    /// An object definition carries both orbit and star field bodies.
    #[error("object '{key}' defines both an orbit and a star field")]
    ConflictingBody { key: String },

    /// Orbit parameters out of range.
    #[error("object '{key}': {source}")]
    Orbit { key: String, source: OrbitError },

    /// Star field parameters out of range.
    #[error("object '{key}': {source}")]
    StarField {
        key: String,
        source: StarFieldError,
    },
}
