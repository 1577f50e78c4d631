//! Game kernel: authoritative simulation state and its per-frame update.
//!
//! # Invariants
//! - All state lives in one [`GameState`] owned by the frame driver.
//! - The update phase is strictly sequential: shot, player, enemies, roster.
//! - Every position a body ends a frame on was checked against the world.

pub mod clock;
pub mod enemy;
pub mod hud;
pub mod motion;
pub mod player;
pub mod shoot;
pub mod state;

pub use clock::{FrameClock, FrameStats};
pub use enemy::{Enemy, EnemyStep, HitOutcome, Roster, SpawnPoint, spawn_point};
pub use hud::{Hud, HudTracker};
pub use player::Player;
pub use shoot::{Shot, ShotParams, trace_shot};
pub use state::{GameEvent, GameState, StepReport};
