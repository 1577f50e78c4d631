use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::action::{Action, KeyBindings};

/// What the player wants to do this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// One-shot: set on the frame a fire event arrived.
    pub fire: bool,
}

impl Intent {
    pub fn with(mut self, action: Action) -> Self {
        self.set(action, true);
        self
    }

    pub fn set(&mut self, action: Action, on: bool) {
        match action {
            Action::MoveForward => self.forward = on,
            Action::MoveBackward => self.backward = on,
            Action::StrafeLeft => self.strafe_left = on,
            Action::StrafeRight => self.strafe_right = on,
            Action::TurnLeft => self.turn_left = on,
            Action::TurnRight => self.turn_right = on,
            Action::Fire => self.fire = on,
        }
    }
}

/// Held-key set plus a queued fire flag, fed by host key/pointer events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    bindings: KeyBindings,
    held: HashSet<String>,
    fire_queued: bool,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
            fire_queued: false,
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Record a key press. Returns `false` for unbound keys, which are ignored.
    pub fn key_down(&mut self, code: &str) -> bool {
        let Some(action) = self.bindings.action_for(code) else {
            tracing::trace!(code, "ignoring unbound key");
            return false;
        };
        // Fire triggers on the press edge, not while held.
        if action == Action::Fire && !self.held.contains(code) {
            self.fire_queued = true;
        }
        self.held.insert(code.to_owned());
        true
    }

    pub fn key_up(&mut self, code: &str) {
        self.held.remove(code);
    }

    /// The pointer "click" event, mapped to fire.
    pub fn pointer_click(&mut self) {
        self.fire_queued = true;
    }

    /// Release every key and drop a queued shot (e.g. on focus loss).
    pub fn clear(&mut self) {
        self.held.clear();
        self.fire_queued = false;
    }

    /// Whether any key bound to `action` is currently held.
    pub fn is_held(&self, action: Action) -> bool {
        self.held
            .iter()
            .any(|code| self.bindings.action_for(code) == Some(action))
    }

    /// Snapshot this frame's intent, consuming a queued fire.
    pub fn take_intent(&mut self) -> Intent {
        let mut intent = Intent::default();
        let held = self
            .held
            .iter()
            .filter_map(|code| self.bindings.action_for(code))
            .filter(|action| *action != Action::Fire);
        for action in held {
            intent.set(action, true);
        }
        intent.fire = std::mem::take(&mut self.fire_queued);
        intent
    }
}
