//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame)
//! - Stable iteration order (level file order)
//! - No rendering, audio or platform dependencies

pub mod aabb;
pub mod body;
pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use body::PhysicsBody;
pub use collision::{CollisionSide, Penetration, ResolveReport, clamp_world_left, resolve_ground};
pub use snapshot::Snapshot;
pub use state::{GameEvent, GameState, Hazard, Player, RunClock, RunState, RunStatus};
pub use tick::{TickInput, autopilot_input, detect_events, tick};
