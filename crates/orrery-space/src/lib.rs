//! Procedural star fields: deterministic star placement for spiral and
//! elliptical galaxies, split into a generate-once phase and a cheap
//! per-frame replay phase.
//!
//! Generation reseeds a [`rand_chacha::ChaCha8Rng`] from the field's
//! stored seed and writes every star's placement and visual attributes
//! into a [`StarInfo`] cache. Replay never recomputes placement: it
//! re-expresses cached offsets against the current camera-relative
//! coordinate and replays only the secondary attribute sequence.

mod field;
mod info;

pub use field::{MAX_ARMS, MAX_STARS, Shape, StarField, StarFieldDef, StarFieldError};
pub use info::{StarEntry, StarInfo, StarInstance, blackbody_to_rgb};
