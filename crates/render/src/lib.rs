//! Rendering: a software raycaster over the game state.
//!
//! # Invariants
//! - Renderers cannot mutate simulation state.
//! - Every image derives from the game state and a view only.
//! - The depth buffer is rebuilt each frame and consumed by the sprite pass of
//!   the same frame.
//!
//! Frames are plain RGB buffers; the host decides how to present them.

mod frame;
mod minimap;
mod overlay;
mod raycast;
mod renderer;
mod sprite;

pub use frame::{Frame, Rgb};
pub use minimap::{MinimapLayout, draw_minimap};
pub use overlay::{draw_backdrop, draw_crosshair, draw_weapon};
pub use raycast::{DepthBuffer, Projection, cast_columns, draw_walls, wall_shade};
pub use renderer::{AsciiRenderer, FrameRenderer, RenderView, Renderer};
pub use sprite::{Billboard, draw_billboards, project};
