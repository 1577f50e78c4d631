use std::hint::black_box;
use std::time::Instant;

use glam::Vec2;
use tilecast_common::WorldConfig;
use tilecast_world::{Chunk, ChunkCoord, ChunkStore, TileQuery, march_ray};

fn bench_generate(side: i32, iterations: usize) {
    let config = WorldConfig::default();
    let start = Instant::now();
    for _ in 0..iterations {
        for cx in 0..side {
            for cy in 0..side {
                black_box(Chunk::generate(ChunkCoord::new(cx, cy), &config));
            }
        }
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  generate ({} chunks, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        side * side
    );
}

fn bench_cached_queries(samples: usize, iterations: usize) {
    let store = ChunkStore::new(WorldConfig::default());
    // Warm the cache so only lookups are timed.
    for i in 0..samples {
        store.is_wall(i as f32 * 0.37, i as f32 * 0.11);
    }

    let start = Instant::now();
    let mut walls = 0usize;
    for _ in 0..iterations {
        for i in 0..samples {
            if store.is_wall(black_box(i as f32 * 0.37), black_box(i as f32 * 0.11)) {
                walls += 1;
            }
        }
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  is_wall ({samples} samples, {iterations} iters): {per_iter:?}/iter, total {elapsed:?} (walls={walls})"
    );
}

fn bench_column_sweep(columns: usize, iterations: usize) {
    let store = ChunkStore::new(WorldConfig::default());
    let origin = Vec2::new(2.5, 2.5);
    let fov = 60f32.to_radians();

    let start = Instant::now();
    for _ in 0..iterations {
        for x in 0..columns {
            let offset = 2.0 * x as f32 / columns as f32 - 1.0;
            black_box(march_ray(&store, origin, offset * fov / 2.0, 0.02, 20.0));
        }
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  sweep ({columns} columns, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("Chunk store benchmarks");
    println!("----------------------");

    bench_generate(4, 100);
    bench_generate(16, 10);

    bench_cached_queries(10_000, 50);

    bench_column_sweep(320, 20);
    bench_column_sweep(800, 10);
}
