use glam::Vec2;

use crate::chunk::{CHUNK_SIZE, ChunkCoord, ChunkStore};

/// Wall lookup over continuous world coordinates.
///
/// This is the single collision primitive: movement, shooting and rendering
/// all go through it and never touch chunk internals.
pub trait TileQuery {
    /// Whether the tile containing `(x, y)` is a wall. Total: anything that
    /// cannot be resolved to a tile reads as wall.
    fn is_wall(&self, x: f32, y: f32) -> bool;

    fn is_wall_at(&self, p: Vec2) -> bool {
        self.is_wall(p.x, p.y)
    }
}

impl<T: TileQuery + ?Sized> TileQuery for &T {
    fn is_wall(&self, x: f32, y: f32) -> bool {
        (**self).is_wall(x, y)
    }
}

impl TileQuery for ChunkStore {
    fn is_wall(&self, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return true;
        }
        let tx = x.floor() as i64;
        let ty = y.floor() as i64;
        let coord = ChunkCoord::containing_tile(tx, ty);
        let (ox, oy) = coord.origin_tile();
        let (lx, ly) = (tx.wrapping_sub(ox), ty.wrapping_sub(oy));
        let range = 0..CHUNK_SIZE as i64;
        // Only reachable when the chunk coordinate overflowed i32.
        if !range.contains(&lx) || !range.contains(&ly) {
            return true;
        }
        self.with_chunk(coord, |chunk| chunk.is_wall_local(lx as usize, ly as usize))
    }
}

/// March from `origin` along `angle` in `step` increments and return the
/// distance of the first sample inside a wall, or `max_dist` if none is.
pub fn march_ray(
    query: &impl TileQuery,
    origin: Vec2,
    angle: f32,
    step: f32,
    max_dist: f32,
) -> f32 {
    let dir = Vec2::new(angle.cos(), angle.sin());
    let mut i = 0u32;
    loop {
        let t = i as f32 * step;
        if t >= max_dist {
            return max_dist;
        }
        if query.is_wall_at(origin + dir * t) {
            return t;
        }
        i += 1;
    }
}

/// A fixed, hand-authored tile grid. Tiles outside the grid are walls.
///
/// Rows are given top to bottom; `#` is a wall, anything else is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    rows: Vec<Vec<bool>>,
}

impl TileGrid {
    pub fn from_rows(rows: &[&str]) -> Self {
        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|r| r.chars().map(|c| c == '#').collect())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { width, rows }
    }

    /// An open `width x height` room enclosed by a one-tile wall.
    pub fn walled_room(width: usize, height: usize) -> Self {
        let rows = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| x == 0 || y == 0 || x + 1 == width || y + 1 == height)
                    .collect()
            })
            .collect();
        Self { width, rows }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

impl TileQuery for TileGrid {
    fn is_wall(&self, x: f32, y: f32) -> bool {
        if !(x >= 0.0 && y >= 0.0) {
            return true;
        }
        let (tx, ty) = (x.floor() as usize, y.floor() as usize);
        self.rows
            .get(ty)
            .and_then(|row| row.get(tx))
            .copied()
            .unwrap_or(true)
    }
}
