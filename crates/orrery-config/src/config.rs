//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "orrery.ron";

/// Top-level configuration for the space renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpaceConfig {
    /// Render-boundary settings.
    pub render: RenderSettings,
}

/// Settings the render boundary feeds into position resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderSettings {
    /// How far out bodies are still rendered, in light-years. Orbits
    /// configured with a clamp distance compress against this horizon.
    pub render_distance_ly: f64,
    /// Global star brightness multiplier.
    pub star_brightness: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            render_distance_ly: 20.0,
            star_brightness: 1.0,
        }
    }
}

impl SpaceConfig {
    /// Load config from the given directory, or create a default
    /// config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::Read)?;
            let config: SpaceConfig = ron::from_str(&contents).map_err(ConfigError::Parse)?;
            log::info!("loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = SpaceConfig::default();
            config.save(config_dir)?;
            log::info!("created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::Write)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new().depth_limit(3);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::Write)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed,
    /// `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::Read)?;
        let new_config: SpaceConfig = ron::from_str(&contents).map_err(ConfigError::Parse)?;

        if &new_config != self {
            log::info!("config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = SpaceConfig::default();
        let text =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new()).unwrap();
        assert!(text.contains("render_distance_ly: 20.0"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = SpaceConfig::default();
        let text = ron::to_string(&config).unwrap();
        let back: SpaceConfig = ron::from_str(&text).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: SpaceConfig = ron::from_str("(render: ())").unwrap();
        assert_eq!(config.render, RenderSettings::default());
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = SpaceConfig::load_or_create(dir.path()).unwrap();
        assert_eq!(config, SpaceConfig::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_load_or_create_reads_existing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SpaceConfig::default();
        config.render.render_distance_ly = 50.0;
        config.save(dir.path()).unwrap();

        let loaded = SpaceConfig::load_or_create(dir.path()).unwrap();
        assert_eq!(loaded.render.render_distance_ly, 50.0);
    }

    #[test]
    fn test_reload_detects_change() {
        let dir = tempfile::tempdir().unwrap();
        let config = SpaceConfig::load_or_create(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());

        let mut changed = config.clone();
        changed.render.star_brightness = 0.5;
        changed.save(dir.path()).unwrap();
        let reloaded = config.reload(dir.path()).unwrap();
        assert_eq!(reloaded, Some(changed));
    }

    #[test]
    fn test_malformed_config_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "(render: (nonsense").unwrap();
        let result = SpaceConfig::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
