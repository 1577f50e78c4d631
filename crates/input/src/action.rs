use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A high-level control the player can hold or trigger.
///
/// Hosts translate their own key events into these through [`KeyBindings`];
/// nothing downstream sees raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    Fire,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveForward,
        Action::MoveBackward,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::TurnLeft,
        Action::TurnRight,
        Action::Fire,
    ];
}

/// Maps key codes (DOM `KeyboardEvent.code` names such as `"KeyW"`) to actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    map: HashMap<String, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            map: HashMap::new(),
        };
        bindings.bind("KeyW", Action::MoveForward);
        bindings.bind("KeyS", Action::MoveBackward);
        bindings.bind("KeyQ", Action::StrafeLeft);
        bindings.bind("KeyE", Action::StrafeRight);
        bindings.bind("KeyA", Action::TurnLeft);
        bindings.bind("ArrowLeft", Action::TurnLeft);
        bindings.bind("KeyD", Action::TurnRight);
        bindings.bind("ArrowRight", Action::TurnRight);
        bindings.bind("Space", Action::Fire);
        bindings
    }
}

impl KeyBindings {
    /// Bindings with no keys mapped.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind `code` to `action`, replacing any previous binding of that key.
    pub fn bind(&mut self, code: impl Into<String>, action: Action) {
        self.map.insert(code.into(), action);
    }

    pub fn action_for(&self, code: &str) -> Option<Action> {
        self.map.get(code).copied()
    }

    /// All keys bound to `action`, sorted for stable output.
    pub fn keys_for(&self, action: Action) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .map
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }
}
