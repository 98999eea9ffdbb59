//! Presentation helpers layered on top of the render snapshot
//!
//! The simulation works in absolute world coordinates. Scrolling is purely a
//! rendering concern and lives here.

use crate::sim::{Aabb, Snapshot};

/// Horizontal camera offset that keeps the player centred, never scrolling
/// past the left edge of the world
#[inline]
pub fn camera_offset_x(player_x: f32, screen_width: f32) -> f32 {
    (player_x - (screen_width / 2.0).floor()).max(0.0)
}

/// Shift a world box into screen space
#[inline]
pub fn to_screen(rect: &Aabb, offset_x: f32) -> Aabb {
    Aabb::new(rect.x - offset_x, rect.y, rect.width, rect.height)
}

/// Snapshot with every box moved into screen space for a given viewport width
pub fn screen_space(snapshot: &Snapshot, screen_width: f32) -> Snapshot {
    let offset = camera_offset_x(snapshot.player.x, screen_width);
    Snapshot {
        player: to_screen(&snapshot.player, offset),
        hazards: snapshot.hazards.iter().map(|r| to_screen(r, offset)).collect(),
        ground: snapshot.ground.iter().map(|r| to_screen(r, offset)).collect(),
        goal: to_screen(&snapshot.goal, offset),
        ..snapshot.clone()
    }
}
