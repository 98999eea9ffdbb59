//! Ledge Run - A side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, run state)
//! - `level`: Level file loading and validation
//! - `tuning`: Data-driven physics constants
//! - `settings`: Player preferences (difficulty tier)
//! - `view`: Presentation helpers layered on top of the render snapshot

pub mod level;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod view;

pub use level::{Level, LevelError, LevelSet};
pub use settings::{Difficulty, Settings};
pub use tuning::Tuning;

/// Game configuration constants
///
/// Physics units are per frame: velocities are units/frame and gravity is
/// units/frame².
pub mod consts {
    /// Fixed simulation rate
    pub const FRAMES_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in seconds (used by the run clock only)
    pub const FRAME_DT: f32 = 1.0 / FRAMES_PER_SECOND as f32;

    /// Downward acceleration added to vertical velocity every frame
    pub const GRAVITY_ACCEL: f32 = 0.8;
    /// Upward velocity set by a jump (applied as -JUMP_IMPULSE)
    pub const JUMP_IMPULSE: f32 = 15.0;
    /// Horizontal displacement per frame while a direction is held
    pub const MOVE_SPEED: f32 = 3.0;

    /// Player box
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;

    /// Hazards are square boxes anchored at their top-left position
    pub const HAZARD_SIZE: f32 = 25.0;

    /// Seconds added to the run clock for each hazard touched
    pub const HIT_PENALTY_SECS: f32 = 10.0;
    /// Distance below the level before a fall counts as death
    pub const FALL_DEATH_MARGIN: f32 = 1000.0;
    /// Gap left under a ceiling after a head bump
    pub const HEAD_BUMP_CLEARANCE: f32 = 0.1;

    /// Starting hearts per difficulty tier
    pub const NORMAL_HEARTS: u32 = 3;
    pub const EASY_HEARTS: u32 = 10;
}
