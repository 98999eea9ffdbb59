//! Physics body: a box with position and velocity
//!
//! Only vertical motion persists between frames. Horizontal velocity is a
//! per-frame impulse that is consumed by `integrate` and then zeroed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    /// Top-left corner of the box (world units)
    pub pos: Vec2,
    /// Units per frame
    pub vel: Vec2,
    pub size: Vec2,
}

impl PhysicsBody {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Add this frame's horizontal impulse
    pub fn push_x(&mut self, dx: f32) {
        self.vel.x += dx;
    }

    pub fn apply_gravity(&mut self, gravity: f32) {
        self.vel.y += gravity;
    }

    /// Move by velocity once, then drop the horizontal impulse
    pub fn integrate(&mut self) {
        self.pos += self.vel;
        self.vel.x = 0.0;
    }

    /// Gravity followed by integration (one fixed timestep)
    pub fn step(&mut self, gravity: f32) {
        self.apply_gravity(gravity);
        self.integrate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GRAVITY_ACCEL;
    use proptest::prelude::*;

    #[test]
    fn test_horizontal_impulse_has_no_inertia() {
        let mut body = PhysicsBody::new(Vec2::new(10.0, 0.0), Vec2::splat(50.0));
        body.push_x(3.0);
        body.step(0.0);
        assert_eq!(body.pos.x, 13.0);
        assert_eq!(body.vel.x, 0.0);

        body.step(0.0);
        assert_eq!(body.pos.x, 13.0);
    }

    #[test]
    fn test_step_applies_gravity_before_moving() {
        let mut body = PhysicsBody::new(Vec2::ZERO, Vec2::splat(50.0));
        body.step(GRAVITY_ACCEL);
        assert!((body.vel.y - GRAVITY_ACCEL).abs() < 1e-6);
        assert!((body.pos.y - GRAVITY_ACCEL).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_free_fall_velocity_is_linear(n in 1u32..200, start_y in -500.0f32..500.0) {
            let mut body = PhysicsBody::new(Vec2::new(0.0, start_y), Vec2::splat(50.0));
            for _ in 0..n {
                body.step(GRAVITY_ACCEL);
            }
            let expected = n as f32 * GRAVITY_ACCEL;
            prop_assert!((body.vel.y - expected).abs() < 1e-3 * expected.max(1.0));
        }
    }
}
