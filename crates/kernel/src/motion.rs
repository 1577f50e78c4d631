use glam::Vec2;
use tilecast_world::TileQuery;

/// Move `pos` by `delta` one axis at a time.
///
/// X is tested at `(x + dx, y)`, then Y at `(x', y + dy)`. An axis whose move
/// would end inside a wall is dropped while the other still applies, which
/// lets bodies slide along walls instead of stopping dead.
pub fn slide(world: &impl TileQuery, pos: Vec2, delta: Vec2) -> Vec2 {
    let mut out = pos;
    let nx = out.x + delta.x;
    if !world.is_wall(nx, out.y) {
        out.x = nx;
    }
    let ny = out.y + delta.y;
    if !world.is_wall(out.x, ny) {
        out.y = ny;
    }
    out
}
