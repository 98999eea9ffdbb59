//! Ledge Run entry point
//!
//! Headless runner: loads a level file and plays it with the autopilot at the
//! fixed simulation rate, logging every event.
//!
//! Usage: `ledge-run [levels.json] [settings.json]`

use std::process::ExitCode;

use ledge_run::consts::FRAMES_PER_SECOND;
use ledge_run::sim::{GameEvent, GameState, RunStatus, autopilot_input, tick};
use ledge_run::{LevelSet, Settings, view};

/// Give up on a level after two minutes of simulated time
const MAX_FRAMES_PER_LEVEL: u32 = FRAMES_PER_SECOND * 120;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Ledge Run (headless) starting...");

    let mut args = std::env::args().skip(1);
    let levels_path = args.next().unwrap_or_else(|| "assets/levels.json".to_string());
    let settings_path = args.next().unwrap_or_else(|| "settings.json".to_string());

    let settings = Settings::load(&settings_path);
    log::info!("Difficulty: {}", settings.difficulty.as_str());

    let levels = match LevelSet::load(&levels_path) {
        Ok(levels) => levels,
        Err(e) => {
            log::error!("Failed to load {}: {}", levels_path, e);
            return ExitCode::FAILURE;
        }
    };
    let first = match levels.get(1) {
        Ok(level) => level,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut state = GameState::new(first, settings.tuning.clone(), settings.starting_hearts());
    let outcome = play(&mut state, &levels, &settings, MAX_FRAMES_PER_LEVEL);

    let snapshot = view::screen_space(&state.snapshot(), settings.screen_width);
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Could not encode final snapshot: {}", e),
    }

    if outcome == RunStatus::Won {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Play levels in order until one is lost, the set is cleared, or the
/// autopilot runs out of frames on a level (fed through as a quit input)
fn play(state: &mut GameState, levels: &LevelSet, settings: &Settings, max_frames: u32) -> RunStatus {
    loop {
        let mut frames = 0;
        while state.status() == RunStatus::Active {
            let mut input = autopilot_input(state);
            input.quit = frames >= max_frames;
            if input.quit {
                log::warn!("Autopilot stuck on level {} after {} frames", state.level.number, frames);
                return state.status();
            }

            for event in tick(state, &input) {
                let camera = view::camera_offset_x(state.player.body.pos.x, settings.screen_width);
                match event {
                    GameEvent::HazardHit { remaining_hearts } => {
                        log::info!("Hit! {} hearts left (camera at {:.0})", remaining_hearts, camera)
                    }
                    GameEvent::Death => log::info!("Died at frame {}", state.run.time_ticks),
                    GameEvent::Win { elapsed_secs } => {
                        log::info!("Level {} won in {:.2}s", state.level.number, elapsed_secs)
                    }
                }
            }
            frames += 1;
        }

        match state.status() {
            RunStatus::Won => {
                if !state.advance(levels) {
                    log::info!("All {} levels cleared", levels.len());
                    return RunStatus::Won;
                }
            }
            RunStatus::Dead => return RunStatus::Dead,
            RunStatus::Active => return RunStatus::Active,
        }
    }
}
