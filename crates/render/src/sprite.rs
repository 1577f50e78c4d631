use std::ops::Range;

use tilecast_common::{EnemyId, normalize_angle};
use tilecast_kernel::{Enemy, Player};

use crate::frame::{Frame, Rgb};
use crate::raycast::{DepthBuffer, Projection};

/// Enemies nearer than this are not drawn.
const MIN_SPRITE_DIST: f32 = 0.2;
/// A sprite column passes the depth test while `d < depth + tolerance`.
const DEPTH_TOLERANCE: f32 = 0.2;
const SIZE_SCALE: f32 = 1.2;
/// Fraction of the screen height where sprite feet rest.
const FEET_LINE: f32 = 0.7;

const BODY: Rgb = Rgb::new(0xb9, 0x1c, 0x1c);
const LEGS: Rgb = Rgb::new(0x7f, 0x1d, 0x1d);
const EYES: Rgb = Rgb::new(0x0f, 0x17, 0x2a);

/// A live enemy projected onto the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Billboard {
    pub id: EnemyId,
    /// True (uncorrected) distance from the player.
    pub dist: f32,
    /// Horizontal screen position of the sprite's center.
    pub center_x: f32,
    /// Edge length of the sprite's square in pixels.
    pub size: f32,
}

impl Billboard {
    pub fn left(&self) -> f32 {
        self.center_x - self.size / 2.0
    }

    /// Screen columns the sprite overlaps, clipped to `[0, width)`.
    pub fn columns(&self, width: u32) -> Range<usize> {
        let left = self.left().floor().max(0.0) as usize;
        let right = ((self.left() + self.size).ceil().max(0.0) as usize).min(width as usize);
        left..right.max(left)
    }

    /// Per-column occlusion test against the wall depth buffer.
    pub fn column_visible(&self, depth: &DepthBuffer, col: usize) -> bool {
        self.dist < depth.get(col) + DEPTH_TOLERANCE
    }

    /// Overlapped columns in front of the wall at that column.
    pub fn visible_columns(&self, depth: &DepthBuffer) -> Vec<usize> {
        self.columns(depth.len() as u32)
            .filter(|&col| self.column_visible(depth, col))
            .collect()
    }
}

/// Project every live enemy inside the field of view, farthest first.
pub fn project<'a>(
    player: &Player,
    enemies: impl IntoIterator<Item = &'a Enemy>,
    proj: &Projection,
) -> Vec<Billboard> {
    let half_fov = proj.fov / 2.0;
    let plane = proj.plane_distance();
    let mut out: Vec<Billboard> = enemies
        .into_iter()
        .filter(|e| e.alive)
        .filter_map(|e| {
            let to_enemy = e.pos - player.pos;
            let dist = to_enemy.length();
            if !(MIN_SPRITE_DIST..=proj.max_dist).contains(&dist) {
                return None;
            }
            let offset = normalize_angle(to_enemy.y.atan2(to_enemy.x) - player.angle);
            if offset.abs() > half_fov {
                return None;
            }
            Some(Billboard {
                id: e.id,
                dist,
                center_x: proj.width as f32 / 2.0 + offset / proj.fov * proj.width as f32,
                size: ((1.0 / dist) * plane * SIZE_SCALE).min(proj.height as f32),
            })
        })
        .collect();
    out.sort_by(|a, b| b.dist.total_cmp(&a.dist));
    out
}

/// Draw the billboards in order, clipping each to its unoccluded columns.
/// Returns how many sprites were at least partly drawn.
pub fn draw_billboards(
    frame: &mut Frame,
    billboards: &[Billboard],
    depth: &DepthBuffer,
    proj: &Projection,
) -> usize {
    let feet = proj.height as f32 * FEET_LINE;
    let mut drawn = 0;
    for b in billboards {
        let mut mask = vec![false; depth.len()];
        let mut any = false;
        for col in b.visible_columns(depth) {
            mask[col] = true;
            any = true;
        }
        if !any {
            continue;
        }
        draw_figure(frame, b, feet, &mask);
        drawn += 1;
    }
    drawn
}

/// Head, body and two legs inside the sprite's square, feet on `feet`.
fn draw_figure(frame: &mut Frame, b: &Billboard, feet: f32, mask: &[bool]) {
    let s = b.size;
    let x = b.left();
    let y = feet - s;
    let visible = |col: usize| mask.get(col).copied().unwrap_or(false);

    frame.fill_rect_where(x + 0.3 * s, y, 0.4 * s, 0.25 * s, BODY, visible);
    frame.fill_rect_where(x + 0.38 * s, y + 0.1 * s, 0.08 * s, 0.08 * s, EYES, visible);
    frame.fill_rect_where(x + 0.54 * s, y + 0.1 * s, 0.08 * s, 0.08 * s, EYES, visible);
    frame.fill_rect_where(x + 0.2 * s, y + 0.25 * s, 0.6 * s, 0.4 * s, BODY, visible);
    frame.fill_rect_where(x + 0.25 * s, y + 0.65 * s, 0.2 * s, 0.35 * s, LEGS, visible);
    frame.fill_rect_where(x + 0.55 * s, y + 0.65 * s, 0.2 * s, 0.35 * s, LEGS, visible);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use tilecast_common::{CameraConfig, PlayerConfig, ScreenConfig};

    fn proj() -> Projection {
        Projection::new(&ScreenConfig { width: 200, height: 100 }, &CameraConfig::default())
    }

    fn origin_player(angle: f32) -> Player {
        let mut p = Player::spawn(&PlayerConfig::default());
        p.pos = Vec2::ZERO;
        p.angle = angle;
        p
    }

    fn enemy(id: u32, x: f32, y: f32) -> Enemy {
        Enemy::new(EnemyId(id), Vec2::new(x, y), 2)
    }

    fn billboard_at(dist: f32) -> Billboard {
        Billboard {
            id: EnemyId(0),
            dist,
            center_x: 100.0,
            size: 20.0,
        }
    }

    #[test]
    fn enemy_dead_ahead_is_centered() {
        let bs = project(&origin_player(0.0), &[enemy(0, 4.0, 0.0)], &proj());
        assert_eq!(bs.len(), 1);
        assert!((bs[0].center_x - 100.0).abs() < 1e-3);
        assert!((bs[0].dist - 4.0).abs() < 1e-6);
    }

    #[test]
    fn offset_maps_linearly_across_the_fov() {
        // 15 degrees to the right of a 60 degree FOV lands at 3/4 width.
        let a = 15f32.to_radians();
        let bs = project(&origin_player(0.0), &[enemy(0, 5.0 * a.cos(), 5.0 * a.sin())], &proj());
        assert!((bs[0].center_x - 150.0).abs() < 0.01);
    }

    #[test]
    fn angle_offset_wraps_around_pi() {
        // Facing just under +pi, an enemy just past -pi is nearly straight ahead.
        let facing = std::f32::consts::PI - 0.05;
        let target = -std::f32::consts::PI + 0.05;
        let e = enemy(0, 6.0 * target.cos(), 6.0 * target.sin());
        let bs = project(&origin_player(facing), &[e], &proj());
        assert_eq!(bs.len(), 1);
    }

    #[test]
    fn culls_outside_fov_and_range() {
        let p = origin_player(0.0);
        let enemies = [
            enemy(0, -4.0, 0.0), // behind
            enemy(1, 0.1, 0.0),  // too close
            enemy(2, 25.0, 0.0), // beyond max distance
            enemy(3, 1.0, 1.0),  // 45 degrees off axis
        ];
        assert!(project(&p, &enemies, &proj()).is_empty());
    }

    #[test]
    fn dead_enemies_are_not_projected() {
        let mut e = enemy(0, 4.0, 0.0);
        e.alive = false;
        assert!(project(&origin_player(0.0), &[e], &proj()).is_empty());
    }

    #[test]
    fn sorted_farthest_first() {
        let enemies = [enemy(0, 3.0, 0.0), enemy(1, 9.0, 0.0), enemy(2, 6.0, 0.5)];
        let ids: Vec<u32> = project(&origin_player(0.0), &enemies, &proj())
            .iter()
            .map(|b| b.id.0)
            .collect();
        assert_eq!(ids, vec![1, 2, 0]);
    }

    #[test]
    fn size_is_clamped_to_screen_height() {
        let bs = project(&origin_player(0.0), &[enemy(0, 0.3, 0.0)], &proj());
        assert_eq!(bs[0].size, 100.0);
    }

    #[test]
    fn sprite_behind_wall_is_hidden() {
        let depth = DepthBuffer::from_depths(vec![3.0; 200]);
        assert!(billboard_at(5.0).visible_columns(&depth).is_empty());

        let mut frame = Frame::new(200, 100);
        let drawn = draw_billboards(&mut frame, &[billboard_at(5.0)], &depth, &proj());
        assert_eq!(drawn, 0);
        assert!(frame.pixels().iter().all(|p| *p == Rgb::BLACK));
    }

    #[test]
    fn sprite_in_front_of_wall_is_drawn() {
        let depth = DepthBuffer::from_depths(vec![3.0; 200]);
        let b = billboard_at(2.9);
        assert_eq!(b.visible_columns(&depth), (90..110).collect::<Vec<_>>());

        let mut frame = Frame::new(200, 100);
        assert_eq!(draw_billboards(&mut frame, &[b], &depth, &proj()), 1);
        // Body center sits at 0.7 * 100 - 0.55 * 20 = 59.
        assert_eq!(frame.get(100, 59), Some(BODY));
    }

    #[test]
    fn tolerance_lets_a_sprite_touch_the_wall() {
        let depth = DepthBuffer::from_depths(vec![3.0; 200]);
        assert!(!billboard_at(3.1).visible_columns(&depth).is_empty());
        assert!(billboard_at(3.25).visible_columns(&depth).is_empty());
    }

    #[test]
    fn partial_occlusion_clips_columns() {
        // Wall in front on the left half, far on the right half.
        let mut depths = vec![1.0; 100];
        depths.extend(std::iter::repeat_n(10.0, 100));
        let depth = DepthBuffer::from_depths(depths);
        let b = billboard_at(4.0);
        assert_eq!(b.visible_columns(&depth), (100..110).collect::<Vec<_>>());

        let mut frame = Frame::new(200, 100);
        draw_billboards(&mut frame, &[b], &depth, &proj());
        assert_eq!(frame.get(95, 59), Some(Rgb::BLACK));
        assert_eq!(frame.get(104, 59), Some(BODY));
    }

    #[test]
    fn columns_clip_to_screen() {
        let b = Billboard {
            id: EnemyId(0),
            dist: 1.0,
            center_x: 2.0,
            size: 10.0,
        };
        assert_eq!(b.columns(200), 0..7);
        let b = Billboard { center_x: 198.0, ..b };
        assert_eq!(b.columns(200), 193..200);
    }
}
