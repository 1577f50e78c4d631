use serde::{Deserialize, Serialize};

use crate::state::GameState;

/// The two numbers the host page displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub kills: u32,
    /// Health rounded to the nearest whole point, never negative.
    pub health: u32,
}

impl Hud {
    pub fn of(state: &GameState) -> Self {
        Self {
            kills: state.kills(),
            health: state.player().health.max(0.0).round() as u32,
        }
    }
}

/// Publishes HUD values only when they change.
#[derive(Debug, Default)]
pub struct HudTracker {
    last: Option<Hud>,
}

impl HudTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Some` the first time and whenever `hud` differs from the last
    /// published value.
    pub fn observe(&mut self, hud: Hud) -> Option<Hud> {
        if self.last == Some(hud) {
            return None;
        }
        self.last = Some(hud);
        Some(hud)
    }

    pub fn last(&self) -> Option<Hud> {
        self.last
    }
}
