use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tilecast_common::{EnemyConfig, EnemyId, direction};
use tilecast_world::TileQuery;

use crate::motion::slide;

/// A pursuing enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub pos: Vec2,
    pub alive: bool,
    /// Remaining revivals after a kill.
    pub respawns_left: u32,
}

/// What an enemy did during one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyStep {
    /// Close enough to hurt the player; holds position.
    Contact,
    /// Inside the aggro radius, stepped toward the player.
    Chasing,
    /// Too far away to notice the player.
    Idle,
}

/// Result of a shot landing on an enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// Revived at a new position with one fewer respawn.
    Respawned { at: Vec2, respawns_left: u32 },
    /// Out of respawns; stays dead.
    Killed,
}

/// A candidate spawn location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub pos: Vec2,
    /// `false` when every attempt hit a wall and the unchecked fallback was used.
    pub checked: bool,
}

impl Enemy {
    pub fn new(id: EnemyId, pos: Vec2, respawns_left: u32) -> Self {
        Self {
            id,
            pos,
            alive: true,
            respawns_left,
        }
    }

    pub fn distance_to(&self, p: Vec2) -> f32 {
        self.pos.distance(p)
    }

    /// Advance one frame of pursuit toward `target`.
    pub fn pursue(
        &mut self,
        target: Vec2,
        dt: f32,
        cfg: &EnemyConfig,
        world: &impl TileQuery,
    ) -> EnemyStep {
        let to_target = target - self.pos;
        let d = to_target.length();
        if d < cfg.contact_radius {
            return EnemyStep::Contact;
        }
        if d >= cfg.aggro_radius {
            return EnemyStep::Idle;
        }
        let step = to_target / d * cfg.speed * dt;
        self.pos = slide(world, self.pos, step);
        EnemyStep::Chasing
    }

    /// Apply a hit. `respawn_at` is only called when a revival happens.
    pub fn take_hit(&mut self, respawn_at: impl FnOnce() -> Vec2) -> HitOutcome {
        self.alive = false;
        if self.respawns_left == 0 {
            return HitOutcome::Killed;
        }
        self.respawns_left -= 1;
        self.pos = respawn_at();
        self.alive = true;
        HitOutcome::Respawned {
            at: self.pos,
            respawns_left: self.respawns_left,
        }
    }
}

/// Pick a spawn location on an open tile at a random bearing and a random
/// radius in `[spawn_min, spawn_max]` around `around`.
///
/// After `spawn_attempts` misses the last draw is returned unchecked; it may
/// lie inside a wall.
pub fn spawn_point<R: Rng>(
    rng: &mut R,
    world: &impl TileQuery,
    around: Vec2,
    cfg: &EnemyConfig,
) -> SpawnPoint {
    let draw = |rng: &mut R| {
        let angle = rng.random::<f32>() * TAU;
        let radius = rng.random_range(cfg.spawn_min..=cfg.spawn_max);
        around + direction(angle) * radius
    };
    for _ in 0..cfg.spawn_attempts {
        let pos = draw(rng);
        if !world.is_wall_at(pos) {
            return SpawnPoint { pos, checked: true };
        }
    }
    let pos = draw(rng);
    tracing::warn!(x = pos.x, y = pos.y, "no open spawn tile found, using unchecked position");
    SpawnPoint {
        pos,
        checked: false,
    }
}

/// The enemy collection plus its id allocator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    enemies: Vec<Enemy>,
    next_id: u32,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a live enemy at `pos` and return its id.
    pub fn add(&mut self, pos: Vec2, respawns: u32) -> EnemyId {
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        self.enemies.push(Enemy::new(id, pos, respawns));
        id
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.enemies.iter_mut()
    }

    pub fn as_slice(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn alive(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Remove every enemy. Ids keep counting up.
    pub fn clear(&mut self) {
        self.enemies.clear();
    }

    /// Drop permanently dead enemies and return their ids.
    pub fn retire_dead(&mut self) -> Vec<EnemyId> {
        let retired: Vec<EnemyId> = self
            .enemies
            .iter()
            .filter(|e| !e.alive)
            .map(|e| e.id)
            .collect();
        if !retired.is_empty() {
            self.enemies.retain(|e| e.alive);
        }
        retired
    }
}
