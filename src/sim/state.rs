//! Game state and core simulation types
//!
//! A `GameState` is one level session: it owns the player, the hazard set and
//! the run bookkeeping, and shares the level geometry read-only.

use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::body::PhysicsBody;
use super::snapshot::Snapshot;
use crate::consts::FRAME_DT;
use crate::level::{Level, LevelSet};
use crate::tuning::Tuning;

/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Gameplay running
    Active,
    /// Goal reached; waits for restart/advance
    Won,
    /// Hearts exhausted or fell out of the world; waits for restart
    Dead,
}

/// Discrete signals for presentation and audio collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    HazardHit { remaining_hearts: u32 },
    Death,
    Win { elapsed_secs: f32 },
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: PhysicsBody,
    pub hearts: u32,
    /// Resting on a surface this frame (may jump)
    pub grounded: bool,
    /// Set by the first successful movement input; starts the run clock
    pub started_moving: bool,
    /// Pressed against the side of a ground box this frame
    pub against_wall: bool,
}

impl Player {
    pub fn new(start: Vec2, size: Vec2, hearts: u32) -> Self {
        Self {
            body: PhysicsBody::new(start, size),
            hearts,
            grounded: false,
            started_moving: false,
            against_wall: false,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        self.body.aabb()
    }

    pub fn is_jumping(&self) -> bool {
        !self.grounded
    }

    pub fn is_dead(&self) -> bool {
        self.hearts == 0
    }

    /// Jump if grounded. Returns whether the jump fired.
    pub fn jump(&mut self, impulse: f32) -> bool {
        if !self.grounded {
            return false;
        }
        self.body.vel.y = -impulse;
        self.grounded = false;
        self.started_moving = true;
        true
    }

    /// Queue this frame's horizontal displacement (`dir` is -1, 0 or 1)
    pub fn walk(&mut self, dir: f32, speed: f32) {
        if dir != 0.0 {
            self.body.push_x(dir * speed);
            self.started_moving = true;
        }
    }

    /// Lose one heart. Returns the hearts left.
    pub fn hit(&mut self) -> u32 {
        self.hearts = self.hearts.saturating_sub(1);
        self.hearts
    }
}

/// A one-shot damaging obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub rect: Aabb,
    /// Once touched the hazard is inert until the run restarts
    pub touched: bool,
}

impl Hazard {
    pub fn new(rect: Aabb) -> Self {
        Self {
            rect,
            touched: false,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.touched
    }
}

/// Run timer: frames since the first movement plus hit penalties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunClock {
    started_tick: Option<u64>,
    pub penalty_secs: f32,
}

impl RunClock {
    pub fn start(&mut self, tick: u64) {
        if self.started_tick.is_none() {
            self.started_tick = Some(tick);
        }
    }

    pub fn is_started(&self) -> bool {
        self.started_tick.is_some()
    }

    pub fn add_penalty(&mut self, secs: f32) {
        self.penalty_secs += secs;
    }

    pub fn elapsed_secs(&self, now_tick: u64) -> f32 {
        let run = self
            .started_tick
            .map(|start| now_tick.saturating_sub(start) as f32 * FRAME_DT)
            .unwrap_or(0.0);
        run + self.penalty_secs
    }
}

/// Per-run bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// 1-based level number
    pub level_number: usize,
    pub status: RunStatus,
    pub clock: RunClock,
    /// Simulation frames advanced while active
    pub time_ticks: u64,
}

impl RunState {
    pub fn new(level_number: usize) -> Self {
        Self {
            level_number,
            status: RunStatus::Active,
            clock: RunClock::default(),
            time_ticks: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RunStatus::Active
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.clock.elapsed_secs(self.time_ticks)
    }
}

/// One level session
#[derive(Debug, Clone)]
pub struct GameState {
    pub level: Rc<Level>,
    pub tuning: Tuning,
    /// Hearts given to every fresh player
    pub starting_hearts: u32,
    pub player: Player,
    pub hazards: Vec<Hazard>,
    pub run: RunState,
}

impl GameState {
    pub fn new(level: Rc<Level>, tuning: Tuning, starting_hearts: u32) -> Self {
        let player = Player::new(level.start, tuning.player_size(), starting_hearts);
        let hazards = level.hazards.iter().copied().map(Hazard::new).collect();
        let run = RunState::new(level.number);
        log::info!(
            "Level {} started: {} ground boxes, {} hazards, {} hearts",
            level.number,
            level.ground.len(),
            level.hazards.len(),
            starting_hearts
        );
        Self {
            level,
            tuning,
            starting_hearts,
            player,
            hazards,
            run,
        }
    }

    /// Fresh run on the current level
    pub fn restart(&mut self) {
        let level = Rc::clone(&self.level);
        *self = Self::new(level, self.tuning.clone(), self.starting_hearts);
    }

    /// Fresh run on the next level of `levels`. Returns false (and changes
    /// nothing) when the current level is the last one.
    pub fn advance(&mut self, levels: &LevelSet) -> bool {
        match levels.get(self.level.number + 1) {
            Ok(next) => {
                *self = Self::new(next, self.tuning.clone(), self.starting_hearts);
                true
            }
            Err(_) => {
                log::info!("No level after {}", self.level.number);
                false
            }
        }
    }

    pub fn status(&self) -> RunStatus {
        self.run.status
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.run.elapsed_secs()
    }

    /// Player y beyond which a fall is fatal
    pub fn fall_death_y(&self) -> f32 {
        self.level.height() + self.tuning.fall_death_margin
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.player.aabb(),
            hazards: self
                .hazards
                .iter()
                .filter(|h| h.is_active())
                .map(|h| h.rect)
                .collect(),
            ground: self.level.ground.clone(),
            goal: self.level.goal,
            hearts: self.player.hearts,
            status: self.run.status,
            elapsed_secs: self.elapsed_secs(),
            level_number: self.run.level_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_set() -> LevelSet {
        LevelSet::from_json_str(
            r#"{ "levels": [
                { "start_pos": [100, 500], "ground": [[0, 600, 800, 40]],
                  "obstacles": [[300, 575]], "goal": [760, 520, 40, 80] },
                { "start_pos": [20, 80], "ground": [[0, 200, 400, 40]],
                  "goal": [350, 120, 40, 80] }
            ] }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_new_session() {
        let levels = level_set();
        let state = GameState::new(levels.get(1).unwrap(), Tuning::default(), 3);
        assert_eq!(state.player.body.pos, Vec2::new(100.0, 500.0));
        assert_eq!(state.player.hearts, 3);
        assert_eq!(state.hazards.len(), 1);
        assert_eq!(state.status(), RunStatus::Active);
        assert_eq!(state.elapsed_secs(), 0.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut player = Player::new(Vec2::ZERO, Vec2::splat(50.0), 3);
        assert!(!player.jump(15.0));
        assert_eq!(player.body.vel.y, 0.0);
        assert!(!player.started_moving);

        player.grounded = true;
        assert!(player.jump(15.0));
        assert_eq!(player.body.vel.y, -15.0);
        assert!(player.is_jumping());
        assert!(player.started_moving);

        // No double jump
        player.body.vel.y = -10.0;
        assert!(!player.jump(15.0));
        assert_eq!(player.body.vel.y, -10.0);
    }

    #[test]
    fn test_hit_saturates_at_zero() {
        let mut player = Player::new(Vec2::ZERO, Vec2::splat(50.0), 1);
        assert_eq!(player.hit(), 0);
        assert!(player.is_dead());
        assert_eq!(player.hit(), 0);
    }

    #[test]
    fn test_clock_counts_from_first_start() {
        let mut clock = RunClock::default();
        assert_eq!(clock.elapsed_secs(100), 0.0);

        clock.start(60);
        clock.start(90);
        clock.add_penalty(10.0);
        assert!((clock.elapsed_secs(120) - 11.0).abs() < 1e-4);
    }

    #[test]
    fn test_restart_resets_player_and_hazards() {
        let levels = level_set();
        let mut state = GameState::new(levels.get(1).unwrap(), Tuning::default(), 3);
        state.player.hearts = 1;
        state.player.body.pos = Vec2::new(400.0, 100.0);
        state.hazards[0].touched = true;
        state.run.status = RunStatus::Dead;

        state.restart();
        assert_eq!(state.player.hearts, 3);
        assert_eq!(state.player.body.pos, Vec2::new(100.0, 500.0));
        assert!(state.hazards[0].is_active());
        assert_eq!(state.status(), RunStatus::Active);
    }

    #[test]
    fn test_advance_stops_at_last_level() {
        let levels = level_set();
        let mut state = GameState::new(levels.get(1).unwrap(), Tuning::default(), 3);
        state.run.status = RunStatus::Won;

        assert!(state.advance(&levels));
        assert_eq!(state.level.number, 2);
        assert_eq!(state.run.level_number, 2);
        assert!(state.hazards.is_empty());
        assert_eq!(state.status(), RunStatus::Active);

        state.run.status = RunStatus::Won;
        assert!(!state.advance(&levels));
        assert_eq!(state.level.number, 2);
        assert_eq!(state.status(), RunStatus::Won);
    }

    #[test]
    fn test_snapshot_hides_touched_hazards() {
        let levels = level_set();
        let mut state = GameState::new(levels.get(1).unwrap(), Tuning::default(), 3);
        assert_eq!(state.snapshot().hazards.len(), 1);

        state.hazards[0].touched = true;
        let snap = state.snapshot();
        assert!(snap.hazards.is_empty());
        assert_eq!(snap.ground.len(), 1);
        assert_eq!(snap.goal, Aabb::new(760.0, 520.0, 40.0, 80.0));
    }
}
