use glam::Vec2;
use tilecast_common::direction;
use tilecast_kernel::{Enemy, Player};
use tilecast_world::{CHUNK_SIZE, Chunk, ChunkCoord};

use crate::frame::{Frame, Rgb};

const MARGIN: f32 = 10.0;
const PANEL: Rgb = Rgb::new(15, 23, 42);
const WALL: Rgb = Rgb::new(0x4b, 0x55, 0x63);
const FLOOR: Rgb = Rgb::new(0x02, 0x06, 0x17);
const ENEMY: Rgb = Rgb::new(0xef, 0x44, 0x44);
const PLAYER: Rgb = Rgb::new(0x22, 0xc5, 0x5e);

/// Screen placement of the minimap panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapLayout {
    /// Panel edge length in pixels.
    pub size: f32,
    /// Pixels per tile.
    pub tile: f32,
}

impl MinimapLayout {
    pub fn for_screen(width: u32, height: u32) -> Self {
        let size = width.min(height) as f32 * 0.5;
        Self {
            size,
            tile: size / CHUNK_SIZE as f32,
        }
    }

    /// Panel pixel for a world position inside the chunk whose origin is `origin`.
    pub fn to_screen(&self, origin: Vec2, pos: Vec2) -> Vec2 {
        Vec2::splat(MARGIN) + (pos - origin) * self.tile
    }
}

/// Draw the player's current chunk, the live enemies inside it and the
/// player marker into the top-left corner.
pub fn draw_minimap<'a>(
    frame: &mut Frame,
    chunk: &Chunk,
    player: &Player,
    enemies: impl IntoIterator<Item = &'a Enemy>,
) {
    let layout = MinimapLayout::for_screen(frame.width(), frame.height());
    let coord = chunk.coord();
    let (ox, oy) = coord.origin_tile();
    let origin = Vec2::new(ox as f32, oy as f32);

    frame.blend_rect(MARGIN, MARGIN, layout.size, layout.size, PANEL, 0.9);
    for (ly, row) in chunk.rows().enumerate() {
        for (lx, &wall) in row.iter().enumerate() {
            frame.fill_rect(
                MARGIN + lx as f32 * layout.tile,
                MARGIN + ly as f32 * layout.tile,
                layout.tile,
                layout.tile,
                if wall { WALL } else { FLOOR },
            );
        }
    }

    let dot = layout.tile * 0.25;
    for e in enemies.into_iter().filter(|e| e.alive) {
        if ChunkCoord::containing(e.pos.x, e.pos.y) != coord {
            continue;
        }
        let p = layout.to_screen(origin, e.pos);
        frame.fill_circle(p.x, p.y, dot, ENEMY, 1.0);
    }

    let p = layout.to_screen(origin, player.pos);
    frame.fill_circle(p.x, p.y, dot, PLAYER, 1.0);
    let tip = p + direction(player.angle) * layout.tile;
    frame.line(p.x, p.y, tip.x, tip.y, PLAYER, 1.0);
}
