//! Data-driven game balance
//!
//! Every physics constant the simulation reads goes through `Tuning`, so a
//! settings file can override any of them. Defaults come from `crate::consts`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics and rules constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Vertical acceleration per frame (units/frame²)
    pub gravity: f32,
    /// Jump sets vertical velocity to -jump_impulse
    pub jump_impulse: f32,
    /// Horizontal displacement per frame of held input
    pub move_speed: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Seconds added to the run clock per hazard hit
    pub hit_penalty_secs: f32,
    /// How far below the level bottom the player may fall before dying
    pub fall_death_margin: f32,
    pub head_bump_clearance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY_ACCEL,
            jump_impulse: JUMP_IMPULSE,
            move_speed: MOVE_SPEED,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            hit_penalty_secs: HIT_PENALTY_SECS,
            fall_death_margin: FALL_DEATH_MARGIN,
            head_bump_clearance: HEAD_BUMP_CLEARANCE,
        }
    }
}

impl Tuning {
    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player_width, self.player_height)
    }
}
