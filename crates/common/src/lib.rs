//! Shared types for the tilecast engine: ids, configuration, angle helpers.

pub mod config;
pub mod types;

pub use config::{
    CameraConfig, ConfigError, EnemyConfig, GameConfig, PlayerConfig, ScreenConfig, WorldConfig,
};
pub use types::{EnemyId, direction, normalize_angle};
