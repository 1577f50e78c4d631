use glam::Vec2;
use serde::{Deserialize, Serialize};
use tilecast_common::{EnemyId, direction};
use tilecast_world::TileQuery;

use crate::enemy::Enemy;

/// Outcome of one hit-scan ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// The enemy struck, if any.
    pub hit: Option<EnemyId>,
    /// March distance at which the ray stopped (enemy, wall, or range limit).
    pub distance: f32,
}

/// Parameters of the hit-scan march.
#[derive(Debug, Clone, Copy)]
pub struct ShotParams {
    pub step: f32,
    pub max_dist: f32,
    /// An enemy is struck when a sample lands within this distance of it.
    pub hit_radius: f32,
}

/// March forward from `origin` along `angle` and return the first live enemy
/// the ray passes within `hit_radius` of.
///
/// Samples are visited in increasing distance, so the enemy found first is
/// the nearest along the ray; at an equal sample the earlier roster entry
/// wins. The ray stops at the first wall sample.
pub fn trace_shot(
    world: &impl TileQuery,
    origin: Vec2,
    angle: f32,
    enemies: &[Enemy],
    params: &ShotParams,
) -> Shot {
    let dir = direction(angle);
    let mut i = 0u32;
    loop {
        let t = i as f32 * params.step;
        if t >= params.max_dist {
            return Shot {
                hit: None,
                distance: params.max_dist,
            };
        }
        let sample = origin + dir * t;
        if world.is_wall_at(sample) {
            return Shot {
                hit: None,
                distance: t,
            };
        }
        let struck = enemies
            .iter()
            .filter(|e| e.alive)
            .find(|e| e.pos.distance(sample) < params.hit_radius);
        if let Some(enemy) = struck {
            return Shot {
                hit: Some(enemy.id),
                distance: t,
            };
        }
        i += 1;
    }
}
