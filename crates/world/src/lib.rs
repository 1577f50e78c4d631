//! World: lazily generated chunked tile plane and the wall query over it.
//!
//! # Invariants
//! - Tile contents are a pure function of (world seed, chunk, local tile).
//! - The outer ring of every chunk is wall.
//! - Chunks are never mutated after generation; only a full reset drops them.

mod chunk;
mod query;

pub use chunk::{CHUNK_SIZE, Chunk, ChunkCoord, ChunkStore, tile_noise};
pub use query::{TileGrid, TileQuery, march_ray};
