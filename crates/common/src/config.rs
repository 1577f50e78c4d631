//! Game configuration.
//!
//! Every tunable of the engine lives here, grouped by the component that reads
//! it. Missing fields in a config file fall back to the defaults below.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Errors produced while loading or validating a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Output surface dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
        }
    }
}

/// Projection and ray marching parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    /// Maximum ray length in tiles.
    pub max_dist: f32,
    /// March step of the column renderer.
    pub ray_step: f32,
    /// March step of the hit-scan ray.
    pub shot_step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            max_dist: 20.0,
            ray_step: 0.02,
            shot_step: 0.05,
        }
    }
}

impl CameraConfig {
    pub fn fov(&self) -> f32 {
        self.fov_degrees.to_radians()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Tiles per second.
    pub speed: f32,
    /// Radians per second.
    pub rot_speed: f32,
    pub max_health: f32,
    pub start: Vec2,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            rot_speed: 2.5,
            max_health: 100.0,
            start: Vec2::new(2.5, 2.5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub speed: f32,
    pub aggro_radius: f32,
    /// Distance under which an enemy damages the player (and a shot connects).
    pub contact_radius: f32,
    /// Damage per second while in contact.
    pub contact_dps: f32,
    pub target_population: usize,
    pub respawns: u32,
    pub spawn_min: f32,
    pub spawn_max: f32,
    pub spawn_attempts: u32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            speed: 1.2,
            aggro_radius: 9.0,
            contact_radius: 0.4,
            contact_dps: 15.0,
            target_population: 8,
            respawns: 2,
            spawn_min: 5.0,
            spawn_max: 12.0,
            spawn_attempts: 80,
        }
    }
}

/// Procedural generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub seed: u64,
    pub wall_probability: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            wall_probability: 0.12,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub camera: CameraConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub world: WorldConfig,
    /// Seed of the spawn RNG.
    pub rng_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            camera: CameraConfig::default(),
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            world: WorldConfig::default(),
            rng_seed: 42,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(invalid("screen", "width and height must be non-zero"));
        }
        let fov = self.camera.fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(invalid("camera.fov_degrees", format!("{fov} not in (0, 180)")));
        }
        positive("camera.max_dist", self.camera.max_dist)?;
        positive("camera.ray_step", self.camera.ray_step)?;
        positive("camera.shot_step", self.camera.shot_step)?;
        positive("player.speed", self.player.speed)?;
        positive("player.max_health", self.player.max_health)?;
        non_negative("player.rot_speed", self.player.rot_speed)?;
        positive("enemy.contact_radius", self.enemy.contact_radius)?;
        non_negative("enemy.speed", self.enemy.speed)?;
        non_negative("enemy.aggro_radius", self.enemy.aggro_radius)?;
        non_negative("enemy.contact_dps", self.enemy.contact_dps)?;
        non_negative("enemy.spawn_min", self.enemy.spawn_min)?;
        non_negative("enemy.spawn_max", self.enemy.spawn_max)?;
        if self.enemy.spawn_min > self.enemy.spawn_max {
            return Err(invalid(
                "enemy.spawn_min",
                format!(
                    "spawn radius [{}, {}] is empty",
                    self.enemy.spawn_min, self.enemy.spawn_max
                ),
            ));
        }
        let p = self.world.wall_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(invalid("world.wall_probability", format!("{p} not in [0, 1]")));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be positive")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be finite and non-negative")))
    }
}
