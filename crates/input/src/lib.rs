//! Input: raw key/pointer events folded into a per-frame [`Intent`].
//!
//! # Invariants
//! - The simulation consumes [`Intent`] only, never raw key codes.
//! - Unbound keys are ignored.

pub mod action;
pub mod state;

pub use action::{Action, KeyBindings};
pub use state::{InputState, Intent};
