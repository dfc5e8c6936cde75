//! Tuning values for the showcase.
//!
//! Defaults reproduce the hand-tuned behaviour of the exhibit. Every section
//! is optional in the TOML file; missing keys fall back to the defaults.

use crate::error::{Result, ShowcaseError};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
    pub first_person: FirstPersonConfig,
    pub hover: HoverConfig,
    pub model: ModelConfig,
    pub audio: AudioConfig,
}

/// Perspective camera and the pose restored by "reset camera".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub default_position: Vec3,
    pub default_target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 50.0,
            near: 0.1,
            far: 100.0,
            default_position: Vec3::new(2.0, 2.0, 4.0),
            default_target: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

/// Orbit controller behaviour and the automatic orbit path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    /// Multiplicative dolly step used by the zoom buttons.
    pub zoom_factor: f32,
    /// Multiplicative dolly step per wheel notch.
    pub wheel_zoom_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians per second.
    pub auto_orbit_speed: f32,
    pub auto_orbit_radius: f32,
    pub auto_orbit_height: f32,
    pub auto_orbit_focus: Vec3,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_factor: 1.1,
            wheel_zoom_factor: 1.05,
            min_distance: 0.5,
            max_distance: 40.0,
            auto_orbit_speed: 0.3,
            auto_orbit_radius: 6.0,
            auto_orbit_height: 2.5,
            auto_orbit_focus: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirstPersonConfig {
    /// World units per second.
    pub move_speed: f32,
    /// Radians per second around the vertical axis.
    pub turn_speed: f32,
    /// Pitch turns at `turn_speed * pitch_turn_factor`.
    pub pitch_turn_factor: f32,
}

impl Default for FirstPersonConfig {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            turn_speed: 1.5,
            pitch_turn_factor: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    /// Minimum spacing between two hover cue plays.
    pub cue_cooldown_ms: u64,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            cue_cooldown_ms: 800,
        }
    }
}

impl HoverConfig {
    pub fn cue_cooldown(&self) -> Duration {
        Duration::from_millis(self.cue_cooldown_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: String,
    /// Radians added to the model's yaw on every rendered frame.
    pub spin_per_tick: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: "Reog.glb".to_string(),
            spin_per_tick: 0.003,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub ambient_path: String,
    pub click_cue_path: String,
    pub hover_cue_path: String,
    pub ambient_volume: f32,
    pub click_cue_volume: f32,
    pub hover_cue_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            ambient_path: "reog-music.mp3".to_string(),
            click_cue_path: "gong.mp3".to_string(),
            hover_cue_path: "kendang.mp3".to_string(),
            ambient_volume: 0.45,
            click_cue_volume: 0.8,
            hover_cue_volume: 0.5,
        }
    }
}

impl ShowcaseConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| ShowcaseError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let cam = &self.camera;
        if !(cam.fov_y_degrees > 0.0 && cam.fov_y_degrees < 180.0) {
            return Err(invalid("camera.fov_y_degrees must be in (0, 180)"));
        }
        if !(cam.near > 0.0 && cam.far > cam.near) {
            return Err(invalid("camera.near must be positive and below camera.far"));
        }
        let orbit = &self.orbit;
        if !(orbit.damping_factor > 0.0 && orbit.damping_factor <= 1.0) {
            return Err(invalid("orbit.damping_factor must be in (0, 1]"));
        }
        if !(orbit.zoom_factor > 1.0 && orbit.wheel_zoom_factor > 1.0) {
            return Err(invalid("orbit zoom factors must be greater than 1"));
        }
        if !(orbit.min_distance > 0.0 && orbit.max_distance >= orbit.min_distance) {
            return Err(invalid("orbit distance limits are inconsistent"));
        }
        let speeds = [
            orbit.rotate_speed,
            orbit.auto_orbit_speed,
            orbit.auto_orbit_radius,
            self.first_person.move_speed,
            self.first_person.turn_speed,
            self.first_person.pitch_turn_factor,
        ];
        if speeds.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(invalid("speeds and radii must be finite and non-negative"));
        }
        if !self.model.spin_per_tick.is_finite() {
            return Err(invalid("model.spin_per_tick must be finite"));
        }
        let volumes = [
            self.audio.ambient_volume,
            self.audio.click_cue_volume,
            self.audio.hover_cue_volume,
        ];
        if volumes.iter().any(|v| !(0.0..=1.0).contains(v)) {
            return Err(invalid("audio volumes must be in [0, 1]"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> ShowcaseError {
    ShowcaseError::Config(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ShowcaseConfig::default().validate().is_ok());
        assert_eq!(
            ShowcaseConfig::default().hover.cue_cooldown(),
            Duration::from_millis(800)
        );
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = ShowcaseConfig::from_toml_str(
            r#"
            [hover]
            cue_cooldown_ms = 1200

            [camera]
            default_position = [1, 3, 5]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.hover.cue_cooldown_ms, 1200);
        assert_eq!(cfg.camera.default_position, Vec3::new(1.0, 3.0, 5.0));
        assert_eq!(cfg.camera.default_target, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(cfg.orbit, OrbitConfig::default());
    }

    #[test]
    fn rejects_shrinking_zoom_factor() {
        let err = ShowcaseConfig::from_toml_str("[orbit]\nzoom_factor = 0.9\n").unwrap_err();
        assert!(matches!(err, ShowcaseError::Config(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(ShowcaseConfig::from_toml_str("[hover\n").is_err());
    }

    #[test]
    fn shipped_file_matches_defaults() {
        let shipped = include_str!("../../../showcase.toml");
        assert_eq!(
            ShowcaseConfig::from_toml_str(shipped).unwrap(),
            ShowcaseConfig::default()
        );
    }
}
