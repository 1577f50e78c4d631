use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use tilecast_common::{EnemyId, GameConfig};
use tilecast_input::Intent;
use tilecast_world::ChunkStore;

use crate::enemy::{EnemyStep, HitOutcome, Roster, spawn_point};
use crate::player::Player;
use crate::shoot::{Shot, ShotParams, trace_shot};

/// A record of every notable transition, drained by the host each frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new enemy joined the roster. `checked` is false for fallback placements.
    EnemySpawned { id: EnemyId, pos: Vec2, checked: bool },
    /// The player fired.
    ShotFired { hit: Option<EnemyId>, distance: f32 },
    /// A shot enemy was revived elsewhere.
    EnemyRespawned {
        id: EnemyId,
        pos: Vec2,
        respawns_left: u32,
    },
    /// A shot enemy had no respawns left.
    EnemyKilled { id: EnemyId },
    /// A permanently dead enemy was removed from the roster.
    EnemyRetired { id: EnemyId },
    /// Health ran out; the game was reset.
    PlayerDied { kills: u32, tick: u64 },
}

/// What happened during one [`GameState::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    pub shot: Option<Shot>,
    pub died: bool,
}

/// The whole simulation: world, player, enemies, score and RNG.
///
/// Owned by the frame driver and mutated only through [`GameState::step`],
/// [`GameState::fire`] and [`GameState::reset`].
pub struct GameState {
    config: GameConfig,
    world: ChunkStore,
    player: Player,
    roster: Roster,
    kills: u32,
    tick: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// A fresh game with a full enemy roster.
    pub fn new(config: GameConfig) -> Self {
        let mut state = Self {
            world: ChunkStore::new(config.world),
            player: Player::spawn(&config.player),
            roster: Roster::new(),
            kills: 0,
            tick: 0,
            rng: Pcg32::seed_from_u64(config.rng_seed),
            events: Vec::new(),
            config,
        };
        state.populate();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &ChunkStore {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    /// Number of completed steps since the process started. Not reset on death.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run the update phase of one frame.
    ///
    /// Order: a queued shot resolves first (against the positions the player
    /// last saw), then the player moves, then enemies act on the new player
    /// position, then the roster is topped up.
    pub fn step(&mut self, intent: &Intent, dt: f32) -> StepReport {
        let _span = tracing::info_span!("sim_update", tick = self.tick).entered();
        let mut report = StepReport::default();

        if intent.fire {
            report.shot = Some(self.fire());
        }

        self.player
            .update(intent, dt, &self.config.player, &self.world);

        if self.update_enemies(dt) {
            report.died = true;
        } else {
            self.maintain_population();
        }

        self.tick += 1;
        tracing::trace!(
            x = self.player.pos.x,
            y = self.player.pos.y,
            health = self.player.health,
            alive = self.roster.alive_count(),
            chunks = self.world.len(),
            "step complete"
        );
        report
    }

    /// Fire along the player's facing and apply the hit, if any.
    pub fn fire(&mut self) -> Shot {
        let params = ShotParams {
            step: self.config.camera.shot_step,
            max_dist: self.config.camera.max_dist,
            hit_radius: self.config.enemy.contact_radius,
        };
        let shot = trace_shot(
            &self.world,
            self.player.pos,
            self.player.angle,
            self.roster.as_slice(),
            &params,
        );
        self.events.push(GameEvent::ShotFired {
            hit: shot.hit,
            distance: shot.distance,
        });

        if let Some(id) = shot.hit {
            self.kills += 1;
            self.apply_hit(id);
        }
        tracing::debug!(hit = ?shot.hit, distance = shot.distance, kills = self.kills, "shot fired");
        shot
    }

    fn apply_hit(&mut self, id: EnemyId) {
        let rng = &mut self.rng;
        let world = &self.world;
        let around = self.player.pos;
        let cfg = &self.config.enemy;
        let Some(enemy) = self.roster.get_mut(id) else {
            return;
        };
        let outcome = enemy.take_hit(|| spawn_point(rng, world, around, cfg).pos);
        match outcome {
            HitOutcome::Respawned { at, respawns_left } => {
                tracing::debug!(%id, x = at.x, y = at.y, respawns_left, "enemy respawned");
                self.events.push(GameEvent::EnemyRespawned {
                    id,
                    pos: at,
                    respawns_left,
                });
            }
            HitOutcome::Killed => {
                tracing::debug!(%id, "enemy killed for good");
                self.events.push(GameEvent::EnemyKilled { id });
            }
        }
    }

    /// Returns `true` if the player died (and the game was reset).
    fn update_enemies(&mut self, dt: f32) -> bool {
        let cfg = self.config.enemy;
        let target = self.player.pos;
        let mut died = false;
        for enemy in self.roster.iter_mut().filter(|e| e.alive) {
            if enemy.pursue(target, dt, &cfg, &self.world) == EnemyStep::Contact {
                self.player.health -= cfg.contact_dps * dt;
                if self.player.is_dead() {
                    died = true;
                    break;
                }
            }
        }
        if died {
            self.player.health = 0.0;
            tracing::warn!(kills = self.kills, tick = self.tick, "player died, resetting game");
            self.events.push(GameEvent::PlayerDied {
                kills: self.kills,
                tick: self.tick,
            });
            self.reset();
        }
        died
    }

    /// Retire dead enemies and spawn at most one replacement.
    fn maintain_population(&mut self) {
        for id in self.roster.retire_dead() {
            self.events.push(GameEvent::EnemyRetired { id });
        }
        if self.roster.alive_count() < self.config.enemy.target_population {
            self.spawn_enemy();
        }
    }

    fn spawn_enemy(&mut self) -> EnemyId {
        let sp = spawn_point(
            &mut self.rng,
            &self.world,
            self.player.pos,
            &self.config.enemy,
        );
        let id = self.roster.add(sp.pos, self.config.enemy.respawns);
        tracing::debug!(%id, x = sp.pos.x, y = sp.pos.y, checked = sp.checked, "enemy spawned");
        self.events.push(GameEvent::EnemySpawned {
            id,
            pos: sp.pos,
            checked: sp.checked,
        });
        id
    }

    fn populate(&mut self) {
        for _ in 0..self.config.enemy.target_population {
            self.spawn_enemy();
        }
    }

    /// Full restart: player, score, chunk cache and enemy roster.
    ///
    /// The spawn RNG keeps running so consecutive games differ.
    pub fn reset(&mut self) {
        self.player = Player::spawn(&self.config.player);
        self.kills = 0;
        self.world.clear();
        self.roster.clear();
        self.populate();
        tracing::info!(enemies = self.roster.len(), "game reset");
    }
}
