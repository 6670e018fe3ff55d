//! Configuration loaded from `rubiks.toml`.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Lookup order: an explicit path, then `rubiks.toml` in the working
//! directory, then built-in defaults.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "rubiks.toml";

/// Largest supported number of pieces per cube edge.
pub const MAX_SIZE: usize = 32;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub cube: CubeConfig,
    pub controls: ControlsConfig,
    pub viewer: ViewerConfig,
}

/// Cube engine settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CubeConfig {
    /// Pieces per edge.
    pub size: usize,
    /// Seconds one quarter turn takes to animate.
    pub rotation_duration: f32,
    /// Use cubic ease-in-out instead of linear animation.
    pub easing: bool,
    /// Moves generated by a scramble.
    pub scramble_moves: usize,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            size: 3,
            rotation_duration: 0.15,
            easing: true,
            scramble_moves: 20,
        }
    }
}

/// Gesture thresholds. Distances are in pixels, times in seconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlsConfig {
    /// Displacement that turns a press into a drag.
    pub drag_threshold: f32,
    /// Displacement of a drag that triggers a face turn.
    pub rotation_delta: f32,
    /// Release speed (px/s) that triggers a flick turn with a mouse.
    pub mouse_momentum: f32,
    /// Release speed (px/s) that triggers a flick turn on a touch screen.
    pub touch_momentum: f32,
    /// Hold time before a single finger starts orbiting the camera.
    pub long_press: f64,
    /// Inactivity before the view starts spinning on its own.
    pub idle_timeout: f64,
    pub auto_rotate_speed: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 5.0,
            rotation_delta: 5.0,
            mouse_momentum: 800.0,
            touch_momentum: 500.0,
            long_press: 0.3,
            idle_timeout: 5.0,
            auto_rotate_speed: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub camera_distance: f32,
    pub hints: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera_distance: 8.0,
            hints: true,
        }
    }
}

impl Config {
    /// Loads the configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] if
    /// it exists, or falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            log::info!("loading configuration from {}", path.display());
            return Self::from_toml(&fs::read_to_string(path)?);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            log::info!("loading configuration from {DEFAULT_CONFIG_FILE}");
            Self::from_toml(&fs::read_to_string(default_path)?)
        } else {
            log::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the engine and controls cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_SIZE).contains(&self.cube.size) {
            return Err(Error::InvalidSize(self.cube.size));
        }
        if self.cube.scramble_moves == 0 {
            log::warn!("cube.scramble_moves is 0, scrambling will leave the cube unchanged");
        }
        let positive = [
            ("cube.rotation_duration", self.cube.rotation_duration as f64),
            ("controls.rotation_delta", self.controls.rotation_delta as f64),
            ("controls.long_press", self.controls.long_press),
            ("viewer.camera_distance", self.viewer.camera_distance as f64),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.controls.drag_threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "controls.drag_threshold must not be negative, got {}",
                self.controls.drag_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.cube.size, 3);
        assert_eq!(config.cube.rotation_duration, 0.15);
        assert!(config.cube.easing);
        assert_eq!(config.cube.scramble_moves, 20);
        assert_eq!(config.controls.mouse_momentum, 800.0);
        assert_eq!(config.controls.touch_momentum, 500.0);
        assert!(config.viewer.hints);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml(
            r#"
            [cube]
            size = 4
            easing = false

            [controls]
            long_press = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.cube.size, 4);
        assert!(!config.cube.easing);
        assert_eq!(config.cube.rotation_duration, 0.15);
        assert_eq!(config.controls.long_press, 0.5);
        assert_eq!(config.controls.rotation_delta, 5.0);
    }

    #[test]
    fn test_rejects_zero_size() {
        let err = Config::from_toml("[cube]\nsize = 0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidSize(0)));
    }

    #[test]
    fn test_rejects_oversized_cube() {
        let err = Config::from_toml("[cube]\nsize = 5000\n").unwrap_err();
        assert!(matches!(err, Error::InvalidSize(5000)));
        let config = Config::from_toml(&format!("[cube]\nsize = {MAX_SIZE}\n")).unwrap();
        assert_eq!(config.cube.size, MAX_SIZE);
    }

    #[test]
    fn test_zero_scramble_moves_is_allowed() {
        let config = Config::from_toml("[cube]\nscramble_moves = 0\n").unwrap();
        assert_eq!(config.cube.scramble_moves, 0);
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        let err = Config::from_toml("[cube]\nrotation_duration = -1.0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = Config::from_toml("[cube]\nspeed = 3\n").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let err = Config::load(Some(Path::new("does/not/exist.toml"))).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
