//! Fixed timestep simulation tick
//!
//! One call advances the session by one frame:
//! input -> gravity/integration -> collision -> event detection.

use super::aabb::Aabb;
use super::collision::{clamp_world_left, resolve_ground};
use super::state::{GameEvent, GameState, RunStatus};

/// Input intents for a single tick, sampled once per frame (no buffering)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub jump: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Stop the loop; the simulation itself ignores it
    pub quit: bool,
}

impl TickInput {
    /// Horizontal direction: -1, 0 or 1 (both held cancel out)
    pub fn direction(&self) -> f32 {
        (self.move_right as i8 - self.move_left as i8) as f32
    }
}

/// Advance the session by one fixed timestep, returning the events it fired
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Won/Dead wait for an explicit restart or advance
    if !state.run.is_active() {
        return events;
    }

    state.run.time_ticks += 1;

    let GameState {
        player,
        tuning,
        level,
        run,
        ..
    } = state;

    if input.jump {
        player.jump(tuning.jump_impulse);
    }
    player.walk(input.direction(), tuning.move_speed);

    if player.started_moving && !run.clock.is_started() {
        run.clock.start(run.time_ticks);
        log::info!("Run clock started on level {}", run.level_number);
    }

    player.body.step(tuning.gravity);
    clamp_world_left(&mut player.body);

    let report = resolve_ground(&mut player.body, &level.ground, tuning.head_bump_clearance);
    player.grounded = report.grounded;
    player.against_wall = report.hit_wall;
    if report.bumped_head {
        log::debug!("Head bump at ({}, {})", player.body.pos.x, player.body.pos.y);
    }
    clamp_world_left(&mut player.body);

    detect_events(state, &mut events);
    events
}

/// Hazard, goal and fall-death checks for the current player position.
///
/// Does nothing once the run has left the active state, so death and win
/// each fire at most once per run.
pub fn detect_events(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let fall_death_y = state.fall_death_y();
    let GameState {
        player,
        hazards,
        tuning,
        level,
        run,
        ..
    } = state;

    let player_box = player.aabb();

    for hazard in hazards.iter_mut() {
        if !run.is_active() {
            return;
        }
        if !hazard.is_active() || !player_box.intersects(&hazard.rect) {
            continue;
        }

        hazard.touched = true;
        let remaining_hearts = player.hit();
        run.clock.add_penalty(tuning.hit_penalty_secs);
        log::debug!(
            "Hazard hit at ({}, {}), {} hearts left",
            hazard.rect.x,
            hazard.rect.y,
            remaining_hearts
        );
        events.push(GameEvent::HazardHit { remaining_hearts });

        if remaining_hearts == 0 {
            run.status = RunStatus::Dead;
            log::info!("Player died on level {}", run.level_number);
            events.push(GameEvent::Death);
        }
    }

    if run.is_active() && player_box.intersects(&level.goal) {
        let elapsed_secs = run.elapsed_secs();
        run.status = RunStatus::Won;
        log::info!("Level {} cleared in {:.2}s", run.level_number, elapsed_secs);
        events.push(GameEvent::Win { elapsed_secs });
    }

    if run.is_active() && player.body.pos.y > fall_death_y {
        player.hearts = 0;
        run.status = RunStatus::Dead;
        log::info!("Player fell out of level {}", run.level_number);
        events.push(GameEvent::Death);
    }
}

/// How far ahead the autopilot looks for walls and hazards
const AUTOPILOT_LOOKAHEAD: f32 = 24.0;
/// How far ahead the autopilot checks for ground to stand on
const AUTOPILOT_GAP_LOOKAHEAD: f32 = 6.0;

/// Idle/demo input: run right, jump at walls, hazards and gaps
pub fn autopilot_input(state: &GameState) -> TickInput {
    let mut input = TickInput {
        move_right: true,
        ..Default::default()
    };

    if !state.player.grounded {
        return input;
    }

    let p = state.player.aabb();
    let ahead = Aabb::new(p.right(), p.top(), AUTOPILOT_LOOKAHEAD, p.height - 1.0);
    let below_ahead = Aabb::new(p.right(), p.bottom(), AUTOPILOT_GAP_LOOKAHEAD, 1.0);

    let wall =
        state.player.against_wall || state.level.ground.iter().any(|g| ahead.intersects(g));
    let hazard = state
        .hazards
        .iter()
        .any(|h| h.is_active() && ahead.intersects(&h.rect));
    let gap = !state.level.ground.iter().any(|g| below_ahead.intersects(g));

    input.jump = wall || hazard || gap;
    input
}
