use tilecast_common::{CameraConfig, ScreenConfig};
use tilecast_kernel::Player;
use tilecast_world::{TileQuery, march_ray};

use crate::frame::{Frame, Rgb};

/// Minimum corrected wall distance; keeps slice heights finite.
const MIN_DIST: f32 = 1e-4;

const WALL_FAR: Rgb = Rgb::new(30, 70, 120);
const WALL_NEAR: Rgb = Rgb::new(110, 170, 240);

/// Screen and camera parameters shared by the wall sweep and billboards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub width: u32,
    pub height: u32,
    /// Horizontal field of view in radians.
    pub fov: f32,
    pub max_dist: f32,
    pub ray_step: f32,
}

impl Projection {
    pub fn new(screen: &ScreenConfig, camera: &CameraConfig) -> Self {
        Self {
            width: screen.width,
            height: screen.height,
            fov: camera.fov(),
            max_dist: camera.max_dist,
            ray_step: camera.ray_step,
        }
    }

    /// Distance to the projection plane in pixels.
    pub fn plane_distance(&self) -> f32 {
        self.width as f32 / (2.0 * (self.fov / 2.0).tan())
    }

    /// World angle of the ray through screen column `col`.
    pub fn ray_angle(&self, facing: f32, col: u32) -> f32 {
        let offset = 2.0 * col as f32 / self.width as f32 - 1.0;
        facing + offset * self.fov / 2.0
    }

    /// On-screen height of a wall slice at corrected distance `dist`.
    pub fn slice_height(&self, dist: f32) -> f32 {
        ((1.0 / dist) * self.plane_distance()).min(self.height as f32)
    }
}

/// Per-column corrected wall distance for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthBuffer {
    depths: Vec<f32>,
}

impl DepthBuffer {
    pub fn from_depths(depths: Vec<f32>) -> Self {
        Self { depths }
    }

    /// Depth of column `col`; columns off screen count as infinitely near.
    pub fn get(&self, col: usize) -> f32 {
        self.depths.get(col).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.depths
    }
}

/// Wall color for a corrected distance.
pub fn wall_shade(dist: f32, max_dist: f32) -> Rgb {
    let shade = (1.0 - dist / max_dist).max(0.2);
    WALL_FAR.lerp(WALL_NEAR, shade)
}

/// March one ray per column and return the fish-eye-corrected distances.
pub fn cast_columns(world: &impl TileQuery, player: &Player, proj: &Projection) -> DepthBuffer {
    let depths = (0..proj.width)
        .map(|col| {
            let ray = proj.ray_angle(player.angle, col);
            let raw = march_ray(world, player.pos, ray, proj.ray_step, proj.max_dist);
            (raw * (ray - player.angle).cos()).max(MIN_DIST)
        })
        .collect();
    DepthBuffer::from_depths(depths)
}

/// Paint one centered, distance-shaded slice per column.
pub fn draw_walls(frame: &mut Frame, depth: &DepthBuffer, proj: &Projection) {
    let mid = proj.height as f32 / 2.0;
    for (col, &dist) in depth.as_slice().iter().enumerate() {
        let h = proj.slice_height(dist);
        let top = mid - h / 2.0;
        frame.vline(col as u32, top, top + h, wall_shade(dist, proj.max_dist));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use tilecast_common::PlayerConfig;
    use tilecast_world::TileGrid;

    fn proj(width: u32, height: u32) -> Projection {
        Projection::new(&ScreenConfig { width, height }, &CameraConfig::default())
    }

    fn player_at(x: f32, y: f32, angle: f32) -> Player {
        let mut p = Player::spawn(&PlayerConfig::default());
        p.pos = Vec2::new(x, y);
        p.angle = angle;
        p
    }

    #[test]
    fn ray_angles_span_the_fov() {
        let p = proj(800, 450);
        assert!((p.ray_angle(0.0, 0) + p.fov / 2.0).abs() < 1e-6);
        assert!(p.ray_angle(0.0, 400).abs() < 1e-6);
        assert!(p.ray_angle(0.0, 799) < p.fov / 2.0);
    }

    #[test]
    fn plane_distance_matches_fov() {
        let p = proj(800, 450);
        // tan(30 deg) = 0.57735
        assert!((p.plane_distance() - 692.82).abs() < 0.05);
    }

    #[test]
    fn slice_height_is_clamped() {
        let p = proj(800, 450);
        assert_eq!(p.slice_height(MIN_DIST), 450.0);
        assert!((p.slice_height(4.0) - 173.2).abs() < 0.1);
    }

    #[test]
    fn shade_endpoints() {
        assert_eq!(wall_shade(0.0, 20.0), WALL_NEAR);
        // Beyond 80% of the range the shade floors at 0.2.
        assert_eq!(wall_shade(19.0, 20.0), WALL_FAR.lerp(WALL_NEAR, 0.2));
        assert_eq!(wall_shade(19.0, 20.0), Rgb::new(46, 90, 144));
    }

    #[test]
    fn fish_eye_correction_flattens_a_wall() {
        // Facing a flat wall: every column sees the same perpendicular distance.
        let grid = TileGrid::walled_room(40, 40);
        let p = proj(64, 48);
        let depth = cast_columns(&grid, &player_at(30.5, 20.5, 0.0), &p);
        assert_eq!(depth.len(), 64);
        let center = depth.get(32);
        assert!((center - 8.5).abs() < 0.03);
        for col in [4, 16, 48, 60] {
            assert!((depth.get(col) - center).abs() < 0.05, "col {col}: {}", depth.get(col));
        }
    }

    #[test]
    fn open_space_reaches_max_distance() {
        let grid = TileGrid::walled_room(100, 100);
        let p = proj(8, 8);
        let depth = cast_columns(&grid, &player_at(50.5, 50.5, 0.0), &p);
        let expected = 20.0 * (p.ray_angle(0.0, 4)).cos();
        assert!((depth.get(4) - expected).abs() < 1e-4);
    }

    #[test]
    fn walls_are_centered_on_the_midline() {
        let p = proj(4, 100);
        let depth = DepthBuffer::from_depths(vec![1.0; 4]);
        let mut frame = Frame::new(4, 100);
        draw_walls(&mut frame, &depth, &p);
        // A slice about 3.5 px tall straddles row 50.
        assert_eq!(frame.get(0, 0), Some(Rgb::BLACK));
        assert_eq!(frame.get(0, 99), Some(Rgb::BLACK));
        assert_ne!(frame.get(0, 50), Some(Rgb::BLACK));
    }

    #[test]
    fn off_screen_depth_is_zero() {
        let depth = DepthBuffer::from_depths(vec![3.0]);
        assert_eq!(depth.get(0), 3.0);
        assert_eq!(depth.get(7), 0.0);
    }
}
