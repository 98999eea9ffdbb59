//! Collision detection and response against static level geometry
//!
//! Each ground box is resolved on its own against the body's tentative box for
//! this frame: find the side with the smallest penetration and push the body
//! out along that axis. There is no global contact solve. When ground boxes
//! overlap each other, corrections on the same axis are decided by iteration
//! order (later boxes win), which is fine for hand-authored levels.

use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::body::PhysicsBody;

/// Side of a ground box the body collided with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionSide {
    /// Body came down on top of the box (landing)
    Top,
    /// Body hit the underside of the box (head bump)
    Bottom,
    /// Body ran into the left face
    Left,
    /// Body ran into the right face
    Right,
}

/// Signed distances each ground edge must move to stop overlapping the body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// groundTop - bodyBottom
    pub top: f32,
    /// groundBottom - bodyTop
    pub bottom: f32,
    /// groundLeft - bodyRight
    pub left: f32,
    /// groundRight - bodyLeft
    pub right: f32,
}

impl Penetration {
    pub fn between(body: &Aabb, ground: &Aabb) -> Self {
        Self {
            top: ground.top() - body.bottom(),
            bottom: ground.bottom() - body.top(),
            left: ground.left() - body.right(),
            right: ground.right() - body.left(),
        }
    }

    /// Side with the smallest absolute penetration.
    ///
    /// Ties keep the earliest side in the order top, bottom, left, right.
    pub fn side(&self) -> CollisionSide {
        let candidates = [
            (CollisionSide::Bottom, self.bottom),
            (CollisionSide::Left, self.left),
            (CollisionSide::Right, self.right),
        ];

        let mut best = (CollisionSide::Top, self.top.abs());
        for (side, depth) in candidates {
            if depth.abs() < best.1 {
                best = (side, depth.abs());
            }
        }
        best.0
    }
}

/// What happened while resolving one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// At least one landing was applied this frame
    pub grounded: bool,
    /// A ceiling stopped the body while rising
    pub bumped_head: bool,
    /// A side snap was applied
    pub hit_wall: bool,
}

/// Resolve a body against every ground box, in order.
///
/// Both the overlap test and the velocity guards (landing only while falling,
/// head bump only while rising) use the tentative box and velocity from before
/// any correction, so a later box can still override an earlier one.
pub fn resolve_ground(body: &mut PhysicsBody, ground: &[Aabb], head_clearance: f32) -> ResolveReport {
    let probe = body.aabb();
    let vy = body.vel.y;
    let mut report = ResolveReport::default();

    for rect in ground {
        if !probe.intersects(rect) {
            continue;
        }

        match Penetration::between(&probe, rect).side() {
            CollisionSide::Top => {
                if vy > 0.0 {
                    body.pos.y = rect.top() - body.size.y;
                    body.vel.y = 0.0;
                    report.grounded = true;
                }
            }
            CollisionSide::Bottom => {
                if vy < 0.0 {
                    body.pos.y = rect.bottom() + head_clearance;
                    body.vel.y = 0.0;
                    report.bumped_head = true;
                }
            }
            // Walls block unconditionally, even without movement into them
            CollisionSide::Left => {
                body.pos.x = rect.left() - body.size.x;
                report.hit_wall = true;
            }
            CollisionSide::Right => {
                body.pos.x = rect.right();
                report.hit_wall = true;
            }
        }
    }

    report
}

/// Keep the body inside the left edge of the world
#[inline]
pub fn clamp_world_left(body: &mut PhysicsBody) {
    if body.pos.x < 0.0 {
        body.pos.x = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn body_at(x: f32, y: f32, w: f32, h: f32, vy: f32) -> PhysicsBody {
        let mut body = PhysicsBody::new(Vec2::new(x, y), Vec2::new(w, h));
        body.vel.y = vy;
        body
    }

    #[test]
    fn test_penetration_picks_smallest_axis() {
        let ground = Aabb::new(0.0, 600.0, 800.0, 40.0);
        let body = Aabb::new(100.0, 565.8, 40.0, 40.0);
        let pen = Penetration::between(&body, &ground);
        assert!((pen.top - (-5.8)).abs() < 1e-4);
        assert_eq!(pen.side(), CollisionSide::Top);
    }

    #[test]
    fn test_penetration_tie_prefers_evaluation_order() {
        let pen = Penetration {
            top: 5.0,
            bottom: -5.0,
            left: 5.0,
            right: -5.0,
        };
        assert_eq!(pen.side(), CollisionSide::Top);

        let pen = Penetration {
            top: 9.0,
            bottom: 50.0,
            left: -2.0,
            right: 2.0,
        };
        assert_eq!(pen.side(), CollisionSide::Left);
    }

    #[test]
    fn test_landing_snaps_to_top() {
        let ground = [Aabb::new(0.0, 600.0, 800.0, 40.0)];
        let mut body = body_at(100.0, 565.8, 40.0, 40.0, 10.8);

        let report = resolve_ground(&mut body, &ground, 0.1);
        assert!(report.grounded);
        assert_eq!(body.pos.y, 560.0);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_landing_requires_falling() {
        let ground = [Aabb::new(0.0, 600.0, 800.0, 40.0)];
        let mut body = body_at(100.0, 565.0, 40.0, 40.0, -2.0);

        let report = resolve_ground(&mut body, &ground, 0.1);
        assert!(!report.grounded);
        assert_eq!(body.pos.y, 565.0);
        assert_eq!(body.vel.y, -2.0);
    }

    #[test]
    fn test_landing_is_a_fixed_point() {
        let ground = [Aabb::new(0.0, 600.0, 800.0, 40.0)];
        let mut body = body_at(100.0, 565.8, 40.0, 40.0, 10.8);
        resolve_ground(&mut body, &ground, 0.1);
        let settled = body.clone();

        let report = resolve_ground(&mut body, &ground, 0.1);
        assert!(!report.grounded);
        assert_eq!(body, settled);
    }

    #[test]
    fn test_head_bump_while_rising() {
        let ceiling = [Aabb::new(0.0, 100.0, 800.0, 20.0)];
        let mut body = body_at(100.0, 115.0, 50.0, 50.0, -12.0);

        let report = resolve_ground(&mut body, &ceiling, 0.1);
        assert!(report.bumped_head);
        assert!((body.pos.y - 120.1).abs() < 1e-4);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_walls_block_both_sides() {
        let wall = [Aabb::new(300.0, 400.0, 50.0, 200.0)];

        let mut body = body_at(252.0, 450.0, 50.0, 50.0, 0.0);
        let report = resolve_ground(&mut body, &wall, 0.1);
        assert!(report.hit_wall);
        assert_eq!(body.pos.x, 250.0);

        let mut body = body_at(348.0, 450.0, 50.0, 50.0, 0.0);
        resolve_ground(&mut body, &wall, 0.1);
        assert_eq!(body.pos.x, 350.0);
    }

    #[test]
    fn test_wall_snap_without_movement() {
        // Resting against a step: the side snap still applies
        let wall = [Aabb::new(300.0, 400.0, 50.0, 200.0)];
        let mut body = body_at(299.0, 450.0, 50.0, 50.0, 0.0);
        resolve_ground(&mut body, &wall, 0.1);
        assert_eq!(body.pos.x, 250.0);
    }

    #[test]
    fn test_seam_between_tiles_lands_once() {
        let ground = [
            Aabb::new(0.0, 600.0, 100.0, 40.0),
            Aabb::new(100.0, 600.0, 100.0, 40.0),
        ];
        let mut body = body_at(80.0, 550.8, 50.0, 50.0, 0.8);

        let report = resolve_ground(&mut body, &ground, 0.1);
        assert!(report.grounded);
        assert!(!report.hit_wall);
        assert_eq!(body.pos, Vec2::new(80.0, 550.0));
    }

    #[test]
    fn test_overlapping_ground_later_box_wins() {
        // Two overlapping wall boxes that both push along x
        let ground = [
            Aabb::new(100.0, 0.0, 100.0, 1000.0),
            Aabb::new(120.0, 0.0, 100.0, 1000.0),
        ];
        let mut body = body_at(80.0, 400.0, 50.0, 50.0, 0.0);
        resolve_ground(&mut body, &ground, 0.1);
        // First box alone would give 50.0
        assert_eq!(body.pos.x, 70.0);
    }

    #[test]
    fn test_overlapping_ground_later_landing_wins() {
        // Second floor sits 10 units above the first and overlaps it
        let ground = [
            Aabb::new(0.0, 600.0, 800.0, 40.0),
            Aabb::new(0.0, 590.0, 800.0, 40.0),
        ];
        let mut body = body_at(100.0, 555.8, 50.0, 50.0, 10.8);

        let report = resolve_ground(&mut body, &ground, 0.1);
        assert!(report.grounded);
        assert_eq!(body.pos.y, 540.0);
        assert_eq!(body.vel.y, 0.0);

        // Settles on the upper floor instead of staying embedded in it
        for _ in 0..6 {
            body.step(0.8);
            let report = resolve_ground(&mut body, &ground, 0.1);
            assert!(report.grounded);
            assert_eq!(body.pos.y, 540.0);
            assert!(!body.aabb().intersects(&ground[1]));
        }
    }

    #[test]
    fn test_clamp_world_left() {
        let mut body = body_at(-12.0, 0.0, 50.0, 50.0, 0.0);
        clamp_world_left(&mut body);
        assert_eq!(body.pos.x, 0.0);

        let mut body = body_at(12.0, 0.0, 50.0, 50.0, 0.0);
        clamp_world_left(&mut body);
        assert_eq!(body.pos.x, 12.0);
    }
}
