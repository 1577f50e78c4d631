use std::f32::consts::{PI, TAU};
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identifier of an enemy in the roster.
///
/// Ids are handed out sequentially by the simulation, so two games started
/// from the same seed allocate the same ids in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enemy#{}", self.0)
    }
}

/// Wrap an angle into `[-PI, PI)`.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Unit vector pointing along `angle` (radians, +x is angle 0, +y is PI/2).
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemy_id_display() {
        assert_eq!(EnemyId(7).to_string(), "enemy#7");
    }

    #[test]
    fn normalize_angle_wraps_into_range() {
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((normalize_angle(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert!((normalize_angle(-TAU - 0.5) + 0.5).abs() < 1e-5);
        let wrapped = normalize_angle(3.0 * PI / 2.0);
        assert!((wrapped + PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn direction_is_unit_length() {
        for i in 0..16 {
            let d = direction(i as f32 * 0.4);
            assert!((d.length() - 1.0).abs() < 1e-5);
        }
        let east = direction(0.0);
        assert!((east.x - 1.0).abs() < 1e-6 && east.y.abs() < 1e-6);
    }
}
