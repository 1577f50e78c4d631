use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tilecast_common::{PlayerConfig, direction};
use tilecast_input::Intent;
use tilecast_world::TileQuery;

use crate::motion::slide;

/// The first-person camera body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Position in tile units.
    pub pos: Vec2,
    /// Facing angle in radians.
    pub angle: f32,
    pub health: f32,
}

impl Player {
    /// A fresh player at the configured start, facing +x, at full health.
    pub fn spawn(cfg: &PlayerConfig) -> Self {
        Self {
            pos: cfg.start,
            angle: 0.0,
            health: cfg.max_health,
        }
    }

    pub fn facing(&self) -> Vec2 {
        direction(self.angle)
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Integrate one frame of intent.
    ///
    /// Rotation applies first, so translation uses the updated heading. All
    /// translation keys sum into a single displacement before collision.
    pub fn update(&mut self, intent: &Intent, dt: f32, cfg: &PlayerConfig, world: &impl TileQuery) {
        let turn = cfg.rot_speed * dt;
        if intent.turn_left {
            self.angle -= turn;
        }
        if intent.turn_right {
            self.angle += turn;
        }

        let step = cfg.speed * dt;
        let forward = direction(self.angle) * step;
        let mut delta = Vec2::ZERO;
        if intent.forward {
            delta += forward;
        }
        if intent.backward {
            delta -= forward;
        }
        if intent.strafe_left {
            delta += direction(self.angle - FRAC_PI_2) * step;
        }
        if intent.strafe_right {
            delta += direction(self.angle + FRAC_PI_2) * step;
        }

        if delta != Vec2::ZERO {
            self.pos = slide(world, self.pos, delta);
        }
    }
}
