//! Game settings and preferences
//!
//! Persisted as a small JSON file next to the level data.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{EASY_HEARTS, NORMAL_HEARTS};
use crate::tuning::Tuning;

/// Difficulty tier (decides the starting hearts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Normal,
    Easy,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Normal => "Normal",
            Difficulty::Easy => "Easy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(Difficulty::Normal),
            "easy" => Some(Difficulty::Easy),
            _ => None,
        }
    }

    /// Hearts a fresh player starts with
    pub fn starting_hearts(&self) -> u32 {
        match self {
            Difficulty::Normal => NORMAL_HEARTS,
            Difficulty::Easy => EASY_HEARTS,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Viewport width used for camera follow
    pub screen_width: f32,
    /// Physics overrides
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            screen_width: 1280.0,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    pub fn starting_hearts(&self) -> u32 {
        self.difficulty.starting_hearts()
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or malformed
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
