//! Level file loading and validation
//!
//! Levels are authored as JSON:
//!
//! ```json
//! { "levels": [ {
//!     "start_pos": [100, 500],
//!     "ground": [[0, 600, 800, 40]],
//!     "obstacles": [[400, 575]],
//!     "goal": [760, 520, 40, 80]
//! } ] }
//! ```
//!
//! Everything is checked here, at load time. The simulation only ever sees a
//! validated `Level`.

use std::path::Path;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::HAZARD_SIZE;
use crate::sim::Aabb;

/// Errors raised while loading level data
#[derive(Debug, Error)]
pub enum LevelError {
    /// Level lookup by a field name the format does not define
    #[error("unknown level field: {0}")]
    UnknownField(String),
    /// The file parsed but holds no levels
    #[error("level file contains no levels")]
    NoLevels,
    /// Level number outside the file
    #[error("level {number} out of range (file has {count})")]
    LevelOutOfRange { number: usize, count: usize },
    /// A rectangle with zero, negative or non-finite extent
    #[error("level {level}: invalid {what} ({width} x {height})")]
    InvalidRect {
        level: usize,
        what: String,
        width: f32,
        height: f32,
    },
    /// A coordinate that is NaN or infinite
    #[error("level {level}: non-finite {what}")]
    NonFinite { level: usize, what: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Level exactly as authored
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawLevel {
    pub start_pos: [f32; 2],
    pub ground: Vec<[f32; 4]>,
    #[serde(default)]
    pub obstacles: Vec<[f32; 2]>,
    pub goal: [f32; 4],
}

/// One named field of a raw level
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelField<'a> {
    StartPos([f32; 2]),
    Obstacles(&'a [[f32; 2]]),
    Goal([f32; 4]),
    Ground(&'a [[f32; 4]]),
}

impl RawLevel {
    /// Field names accepted by `field`
    pub const FIELDS: [&'static str; 4] = ["start_pos", "obstacles", "goal", "ground"];

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Result<LevelField<'_>, LevelError> {
        match name {
            "start_pos" => Ok(LevelField::StartPos(self.start_pos)),
            "obstacles" => Ok(LevelField::Obstacles(&self.obstacles)),
            "goal" => Ok(LevelField::Goal(self.goal)),
            "ground" => Ok(LevelField::Ground(&self.ground)),
            other => Err(LevelError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct LevelFile {
    levels: Vec<RawLevel>,
}

/// A validated level: static geometry, hazard boxes and spawn point
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    /// 1-based level number
    pub number: usize,
    pub start: Vec2,
    pub ground: Vec<Aabb>,
    pub hazards: Vec<Aabb>,
    pub goal: Aabb,
    height: f32,
}

impl Level {
    /// Validate a raw level and convert it to typed geometry
    pub fn from_raw(number: usize, raw: &RawLevel) -> Result<Self, LevelError> {
        let start = Vec2::from(raw.start_pos);
        if !start.is_finite() {
            return Err(LevelError::NonFinite {
                level: number,
                what: "start_pos".to_string(),
            });
        }

        let ground = raw
            .ground
            .iter()
            .enumerate()
            .map(|(i, r)| checked_rect(number, &format!("ground[{i}]"), *r))
            .collect::<Result<Vec<_>, _>>()?;

        let hazards = raw
            .obstacles
            .iter()
            .enumerate()
            .map(|(i, &[x, y])| {
                checked_rect(number, &format!("obstacles[{i}]"), [x, y, HAZARD_SIZE, HAZARD_SIZE])
            })
            .collect::<Result<Vec<_>, _>>()?;

        let goal = checked_rect(number, "goal", raw.goal)?;

        let height = ground
            .iter()
            .map(Aabb::bottom)
            .fold(goal.bottom(), f32::max);

        Ok(Self {
            number,
            start,
            ground,
            hazards,
            goal,
            height,
        })
    }

    /// Lowest point of the level geometry (greatest bottom edge)
    pub fn height(&self) -> f32 {
        self.height
    }
}

fn checked_rect(level: usize, what: &str, [x, y, w, h]: [f32; 4]) -> Result<Aabb, LevelError> {
    let rect = Aabb::new(x, y, w, h);
    if !(x.is_finite() && y.is_finite()) {
        return Err(LevelError::NonFinite {
            level,
            what: what.to_string(),
        });
    }
    if !rect.is_valid() {
        return Err(LevelError::InvalidRect {
            level,
            what: what.to_string(),
            width: w,
            height: h,
        });
    }
    Ok(rect)
}

/// All levels of a level file, validated and shared read-only
#[derive(Debug, Clone)]
pub struct LevelSet {
    raw: Vec<RawLevel>,
    levels: Vec<Rc<Level>>,
}

impl LevelSet {
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let file: LevelFile = serde_json::from_str(json)?;
        if file.levels.is_empty() {
            return Err(LevelError::NoLevels);
        }

        let levels = file
            .levels
            .iter()
            .enumerate()
            .map(|(i, raw)| Level::from_raw(i + 1, raw).map(Rc::new))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!("Loaded {} levels", levels.len());
        Ok(Self {
            raw: file.levels,
            levels,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::info!("Reading levels from {}", path.display());
        Self::from_json_str(&json)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level by 1-based number
    pub fn get(&self, number: usize) -> Result<Rc<Level>, LevelError> {
        number
            .checked_sub(1)
            .and_then(|i| self.levels.get(i))
            .cloned()
            .ok_or(LevelError::LevelOutOfRange {
                number,
                count: self.levels.len(),
            })
    }

    /// Raw field lookup by 1-based level number and field name
    pub fn level_info(&self, number: usize, field: &str) -> Result<LevelField<'_>, LevelError> {
        let raw = number
            .checked_sub(1)
            .and_then(|i| self.raw.get(i))
            .ok_or(LevelError::LevelOutOfRange {
                number,
                count: self.raw.len(),
            })?;
        raw.field(field)
    }
}
