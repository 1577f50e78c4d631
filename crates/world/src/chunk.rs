use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tilecast_common::WorldConfig;

/// Edge length of a chunk in tiles.
pub const CHUNK_SIZE: usize = 16;

/// Local tiles of the origin chunk that are always open, so the player's
/// start position has room to move and a clear line of fire along +x.
const SPAWN_CLEARING_X: std::ops::RangeInclusive<usize> = 1..=5;
const SPAWN_CLEARING_Y: std::ops::RangeInclusive<usize> = 1..=4;

/// Integer chunk coordinate: `floor(tile / CHUNK_SIZE)` on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chunk owning the given tile.
    pub fn containing_tile(tx: i64, ty: i64) -> Self {
        let size = CHUNK_SIZE as i64;
        Self {
            x: tx.div_euclid(size) as i32,
            y: ty.div_euclid(size) as i32,
        }
    }

    /// Chunk owning the given continuous world position.
    pub fn containing(x: f32, y: f32) -> Self {
        Self::containing_tile(x.floor() as i64, y.floor() as i64)
    }

    /// Tile coordinate of this chunk's local (0, 0) corner.
    pub fn origin_tile(&self) -> (i64, i64) {
        let size = CHUNK_SIZE as i64;
        (self.x as i64 * size, self.y as i64 * size)
    }

    /// Both axes packed into one 64-bit cache key.
    pub fn packed(&self) -> u64 {
        ((self.x as u32 as u64) << 32) | self.y as u32 as u64
    }
}

/// Pseudo-random value in `[0, 1)` for one tile of one chunk.
///
/// Pure: the same arguments always produce the same value.
pub fn tile_noise(seed: u64, coord: ChunkCoord, lx: usize, ly: usize) -> f64 {
    let h = (coord.x as i64).wrapping_mul(73_856_093)
        ^ (coord.y as i64).wrapping_mul(19_349_663)
        ^ (lx as i64).wrapping_mul(83_492_791)
        ^ (ly as i64).wrapping_mul(2_654_435_761)
        ^ (seed as i64).wrapping_mul(40_503);
    // Keep the sine argument small enough for f64 to hold its fractional bits.
    let folded = (h % 1_000_003) as f64;
    let s = (folded * 12.9898 + 78.233).sin() * 43_758.545_3;
    s - s.floor()
}

/// A square block of `CHUNK_SIZE x CHUNK_SIZE` tiles. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    coord: ChunkCoord,
    /// Row-major, indexed `[ly][lx]`.
    tiles: [[bool; CHUNK_SIZE]; CHUNK_SIZE],
}

impl Chunk {
    /// Generate the chunk at `coord`. The outer ring is always wall.
    pub fn generate(coord: ChunkCoord, config: &WorldConfig) -> Self {
        let mut tiles = [[false; CHUNK_SIZE]; CHUNK_SIZE];
        let last = CHUNK_SIZE - 1;
        let is_origin = coord == ChunkCoord::new(0, 0);
        for (ly, row) in tiles.iter_mut().enumerate() {
            for (lx, tile) in row.iter_mut().enumerate() {
                *tile = if lx == 0 || ly == 0 || lx == last || ly == last {
                    true
                } else if is_origin && SPAWN_CLEARING_X.contains(&lx) && SPAWN_CLEARING_Y.contains(&ly)
                {
                    false
                } else {
                    tile_noise(config.seed, coord, lx, ly) < config.wall_probability
                };
            }
        }
        Self { coord, tiles }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Local lookup. Indices outside the chunk read as wall.
    pub fn is_wall_local(&self, lx: usize, ly: usize) -> bool {
        self.tiles
            .get(ly)
            .and_then(|row| row.get(lx))
            .copied()
            .unwrap_or(true)
    }

    pub fn wall_count(&self) -> usize {
        self.tiles.iter().flatten().filter(|&&w| w).count()
    }

    /// Iterate rows, top (`ly = 0`) first.
    pub fn rows(&self) -> impl Iterator<Item = &[bool; CHUNK_SIZE]> {
        self.tiles.iter()
    }
}

/// Lazily generated, never-evicted cache of chunks.
///
/// The store exclusively owns chunk contents and hands out shared read-only
/// handles. Generation happens behind `&self` so read-only consumers such as
/// the renderer can still pull in chunks they are the first to look at; the
/// engine is single-threaded, so the cache is a `RefCell` rather than a lock.
pub struct ChunkStore {
    config: WorldConfig,
    chunks: RefCell<HashMap<u64, Rc<Chunk>>>,
}

impl ChunkStore {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            chunks: RefCell::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Get the chunk at `coord`, generating and caching it on first access.
    pub fn chunk(&self, coord: ChunkCoord) -> Rc<Chunk> {
        let key = coord.packed();
        if let Some(chunk) = self.chunks.borrow().get(&key) {
            return Rc::clone(chunk);
        }
        let chunk = Rc::new(Chunk::generate(coord, &self.config));
        tracing::debug!(
            cx = coord.x,
            cy = coord.y,
            walls = chunk.wall_count(),
            "generated chunk"
        );
        self.chunks.borrow_mut().insert(key, Rc::clone(&chunk));
        chunk
    }

    /// Run `f` against the chunk at `coord` without cloning the handle on a hit.
    pub fn with_chunk<R>(&self, coord: ChunkCoord, f: impl FnOnce(&Chunk) -> R) -> R {
        if let Some(chunk) = self.chunks.borrow().get(&coord.packed()) {
            return f(chunk);
        }
        let chunk = self.chunk(coord);
        f(&chunk)
    }

    pub fn is_cached(&self, coord: ChunkCoord) -> bool {
        self.chunks.borrow().contains_key(&coord.packed())
    }

    /// Number of generated chunks.
    pub fn len(&self) -> usize {
        self.chunks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.borrow().is_empty()
    }

    /// Drop every cached chunk. Regeneration yields identical contents.
    pub fn clear(&self) {
        let dropped = self.chunks.borrow().len();
        self.chunks.borrow_mut().clear();
        tracing::debug!(dropped, "cleared chunk cache");
    }
}
