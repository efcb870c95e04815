//! Runtime configuration for the render boundary, persisted as RON.

mod config;
mod error;

pub use config::{RenderSettings, SpaceConfig};
pub use error::ConfigError;
