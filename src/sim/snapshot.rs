//! Render snapshot: everything a presentation layer needs for one frame,
//! in absolute world coordinates.

use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::state::RunStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: Aabb,
    /// Untouched hazards only
    pub hazards: Vec<Aabb>,
    pub ground: Vec<Aabb>,
    pub goal: Aabb,
    pub hearts: u32,
    pub status: RunStatus,
    pub elapsed_secs: f32,
    pub level_number: usize,
}
