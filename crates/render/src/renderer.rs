use tilecast_kernel::GameState;
use tilecast_world::ChunkCoord;

use crate::frame::Frame;
use crate::minimap::draw_minimap;
use crate::overlay::{draw_backdrop, draw_crosshair, draw_weapon};
use crate::raycast::{Projection, cast_columns, draw_walls};
use crate::sprite::{draw_billboards, project};

/// Per-frame presentation toggles that are not part of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderView {
    /// Draw the muzzle flash; set on the frame a shot was fired.
    pub muzzle_flash: bool,
    pub minimap: bool,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            muzzle_flash: false,
            minimap: true,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads game state and a view configuration, then produces
/// output. It never mutates the simulation; chunk generation triggered by a
/// query is the only side effect, and it is invisible to the game.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given game state and view.
    fn render(&self, state: &GameState, view: &RenderView) -> Self::Output;
}

/// The first-person software raycaster.
///
/// Composes backdrop, wall columns, depth-tested enemy billboards, weapon,
/// crosshair and minimap, in that order. The depth buffer lives only for the
/// duration of one call.
#[derive(Debug, Default)]
pub struct FrameRenderer;

impl FrameRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for FrameRenderer {
    type Output = Frame;

    fn render(&self, state: &GameState, view: &RenderView) -> Frame {
        let _span = tracing::info_span!("render_frame", tick = state.tick()).entered();
        let cfg = state.config();
        let proj = Projection::new(&cfg.screen, &cfg.camera);
        let player = state.player();

        let mut frame = Frame::new(proj.width, proj.height);
        draw_backdrop(&mut frame);

        let depth = cast_columns(state.world(), player, &proj);
        draw_walls(&mut frame, &depth, &proj);

        let billboards = project(player, state.roster().iter(), &proj);
        let drawn = draw_billboards(&mut frame, &billboards, &depth, &proj);

        draw_weapon(&mut frame, view.muzzle_flash);
        draw_crosshair(&mut frame);

        if view.minimap {
            let chunk = state
                .world()
                .chunk(ChunkCoord::containing(player.pos.x, player.pos.y));
            draw_minimap(&mut frame, &chunk, player, state.roster().iter());
        }

        tracing::trace!(projected = billboards.len(), drawn, "frame composed");
        frame
    }
}

/// Debug text renderer.
///
/// Dumps the chunk the player stands in as a character grid: `#` wall,
/// `.` floor, `E` live enemy, `@` player. Useful for CLI output, logging,
/// and testing the render interface without pixels.
#[derive(Debug, Default)]
pub struct AsciiRenderer;

impl AsciiRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for AsciiRenderer {
    type Output = String;

    fn render(&self, state: &GameState, _view: &RenderView) -> String {
        let player = state.player();
        let coord = ChunkCoord::containing(player.pos.x, player.pos.y);
        let chunk = state.world().chunk(coord);
        let (ox, oy) = coord.origin_tile();

        let mut grid: Vec<Vec<char>> = chunk
            .rows()
            .map(|row| row.iter().map(|&w| if w { '#' } else { '.' }).collect())
            .collect();
        let mut mark = |x: f32, y: f32, c: char| {
            let lx = (x.floor() as i64 - ox) as usize;
            let ly = (y.floor() as i64 - oy) as usize;
            if let Some(cell) = grid.get_mut(ly).and_then(|row| row.get_mut(lx)) {
                *cell = c;
            }
        };
        let mut in_chunk = 0;
        for e in state.roster().alive() {
            if ChunkCoord::containing(e.pos.x, e.pos.y) == coord {
                mark(e.pos.x, e.pos.y, 'E');
                in_chunk += 1;
            }
        }
        mark(player.pos.x, player.pos.y, '@');

        let mut out = String::new();
        out.push_str(&format!(
            "=== Chunk ({}, {}) (tick={}, kills={}, health={:.0}) ===\n",
            coord.x,
            coord.y,
            state.tick(),
            state.kills(),
            player.health.max(0.0)
        ));
        out.push_str(&format!(
            "Player: pos=({:.2}, {:.2}) angle={:.2}\n",
            player.pos.x, player.pos.y, player.angle
        ));
        out.push_str(&format!(
            "Enemies: {} in chunk, {} alive\n",
            in_chunk,
            state.roster().alive_count()
        ));
        for row in grid {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use tilecast_common::{GameConfig, ScreenConfig};

    use crate::frame::Rgb;

    fn small_state() -> GameState {
        GameState::new(GameConfig {
            screen: ScreenConfig {
                width: 160,
                height: 90,
            },
            ..GameConfig::default()
        })
    }

    fn state_with_enemy_at(pos: Option<Vec2>) -> GameState {
        let mut state = small_state();
        state.roster_mut().clear();
        if let Some(pos) = pos {
            state.roster_mut().add(pos, 2);
        }
        state
    }

    #[test]
    fn frame_matches_configured_screen() {
        let frame = FrameRenderer::new().render(&small_state(), &RenderView::default());
        assert_eq!((frame.width(), frame.height()), (160, 90));
    }

    #[test]
    fn enemy_in_view_is_composited() {
        let body = Rgb::new(0xb9, 0x1c, 0x1c);
        let renderer = FrameRenderer::new();
        let view = RenderView::default();

        let with = renderer.render(&state_with_enemy_at(Some(Vec2::new(4.5, 2.5))), &view);
        assert_eq!(with.get(80, 20), Some(body));

        let without = renderer.render(&state_with_enemy_at(None), &view);
        assert_ne!(without.get(80, 20), Some(body));
    }

    #[test]
    fn muzzle_flash_changes_the_frame() {
        let state = small_state();
        let renderer = FrameRenderer::new();
        let quiet = renderer.render(&state, &RenderView::default());
        let firing = renderer.render(
            &state,
            &RenderView {
                muzzle_flash: true,
                ..RenderView::default()
            },
        );
        assert_ne!(quiet, firing);
    }

    #[test]
    fn minimap_can_be_hidden() {
        let state = small_state();
        let renderer = FrameRenderer::new();
        let hidden = renderer.render(
            &state,
            &RenderView {
                minimap: false,
                ..RenderView::default()
            },
        );
        let shown = renderer.render(&state, &RenderView::default());
        // Top-left border tile of the minimap is wall grey.
        assert_eq!(shown.get(12, 12), Some(Rgb::new(0x4b, 0x55, 0x63)));
        assert_ne!(hidden.get(12, 12), shown.get(12, 12));
    }

    #[test]
    fn rendering_is_repeatable() {
        let state = small_state();
        let renderer = FrameRenderer::new();
        let view = RenderView::default();
        assert_eq!(renderer.render(&state, &view), renderer.render(&state, &view));
    }

    #[test]
    fn ascii_dumps_the_current_chunk() {
        let state = state_with_enemy_at(Some(Vec2::new(4.5, 3.5)));
        let out = AsciiRenderer::new().render(&state, &RenderView::default());
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].contains("Chunk (0, 0)"));
        assert!(lines[0].contains("kills=0"));
        assert!(lines[0].contains("health=100"));
        assert!(lines[2].contains("1 in chunk"));
        let grid = &lines[3..];
        assert_eq!(grid.len(), 16);
        assert!(grid.iter().all(|row| row.chars().count() == 16));
        assert_eq!(grid[0], "################");
        assert_eq!(grid[2].chars().nth(2), Some('@'));
        assert_eq!(grid[3].chars().nth(4), Some('E'));
        assert_eq!(grid[1].chars().nth(1), Some('.'));
    }
}
