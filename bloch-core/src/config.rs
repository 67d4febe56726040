/// TOML configuration; every field defaults to the stock Bloch sphere view
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::animation::{FrameThrottle, DEFAULT_MIN_INTERVAL_MS};
use crate::error::ConfigError;
use crate::scene::{Scene, SceneStyle};
use crate::view::{StateVectorAngles, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub min_interval_ms: f64,
    pub degrees_per_second: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            degrees_per_second: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualiserConfig {
    pub view: ViewState,
    pub state: StateVectorAngles,
    pub animation: AnimationConfig,
    pub style: SceneStyle,
}

impl VisualiserConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: VisualiserConfig = toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
        })?;

        let config = Self::from_toml_str(&content)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("view.alpha", self.view.alpha),
            ("view.beta", self.view.beta),
            ("view.cx", self.view.cx),
            ("view.cy", self.view.cy),
            ("view.sphere_rotation", self.view.sphere_rotation),
            ("state.alpha", self.state.alpha),
            ("state.beta", self.state.beta),
            ("animation.degrees_per_second", self.animation.degrees_per_second),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::ValidationError(format!("{name} must be finite")));
            }
        }

        let positive = [
            ("view.sphere_radius", self.view.sphere_radius),
            ("style.surface_width", self.style.surface_width),
            ("style.surface_height", self.style.surface_height),
            ("style.line_width", self.style.line_width),
            ("style.dot_radius", self.style.dot_radius),
            ("style.arrow_half_width", self.style.arrow_half_width),
            ("style.arrow_length", self.style.arrow_length),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let interval = self.animation.min_interval_ms;
        if !(interval.is_finite() && interval >= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "animation.min_interval_ms must be non-negative, got {interval}"
            )));
        }

        Ok(())
    }

    pub fn scene(&self) -> Scene {
        Scene {
            degrees_per_second: self.animation.degrees_per_second,
            ..Scene::new(self.view, self.state, self.style)
        }
    }

    pub fn throttle(&self) -> FrameThrottle {
        FrameThrottle::new(self.animation.min_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::AngleUnit;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        let config = VisualiserConfig::from_toml_str("").unwrap();
        assert_eq!(config, VisualiserConfig::default());
        assert_eq!(config.scene(), Scene::default());
    }

    #[test]
    fn test_partial_overrides() {
        let config = VisualiserConfig::from_toml_str(
            r#"
            [view]
            alpha = 30.0
            angle_unit = "degrees"

            [animation]
            min_interval_ms = 16.0
            "#,
        )
        .unwrap();

        assert_eq!(config.view.alpha, 30.0);
        assert_eq!(config.view.angle_unit, AngleUnit::Degrees);
        assert_eq!(config.view.sphere_radius, 800.0);
        assert_eq!(config.animation.min_interval_ms, 16.0);
        assert_eq!(config.animation.degrees_per_second, 30.0);
        assert_eq!(config.state, StateVectorAngles::default());
    }

    #[test]
    fn test_validation_rejects_bad_radius() {
        let err = VisualiserConfig::from_toml_str("[view]\nsphere_radius = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("sphere_radius"));
    }

    #[test]
    fn test_validation_rejects_negative_interval() {
        let mut config = VisualiserConfig::default();
        config.animation.min_interval_ms = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        let err = VisualiserConfig::from_toml_str("[view\nalpha = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[state]\nalpha = 90.0\nbeta = 0.0").unwrap();

        let config = VisualiserConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.state.alpha, 90.0);
        assert_eq!(config.state.beta, 0.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = VisualiserConfig::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(p) if p == path));
    }

    #[test]
    fn test_config_drives_scene_and_throttle() {
        let mut config = VisualiserConfig::default();
        config.animation.degrees_per_second = 90.0;
        config.animation.min_interval_ms = 10.0;

        assert_eq!(config.scene().rotation_offset(1000.0), 90.0);
        let mut throttle = config.throttle();
        assert!(throttle.tick(11.0).is_some());
    }
}
