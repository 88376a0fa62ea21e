//! Race data model
//!
//! Plain records shared by the simulation, the stores and the game host.
//!
//! Coordinate system: screen space of the 800x600 arena
//! - X: right (positive = right)
//! - Y: down (positive = down)
//! - Heading: degrees, 0 = up (decreasing Y), clockwise positive

use crate::units::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub type CarId = u32;
pub type ResultId = u32;

/// Number of laps in every race
pub const TOTAL_LAPS: u32 = 3;

/// Track name recorded with results when the host does not override it
pub const DEFAULT_TRACK: &str = "circuit-alpha";

// === Cars ===

/// A selectable car with its performance attributes
///
/// The three stats use a 0-100 scale. They are not validated here; the
/// catalog that hands out profiles owns their sanity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarProfile {
    pub id: CarId,
    pub name: String,
    pub description: String,
    /// CSS hex color used for the sprite
    pub color: String,
    pub max_speed: f64,
    pub acceleration: f64,
    pub handling: f64,
}

/// Car fields supplied when creating or replacing a catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub color: String,
    pub max_speed: f64,
    pub acceleration: f64,
    pub handling: f64,
}

impl CarDraft {
    pub fn into_profile(self, id: CarId) -> CarProfile {
        CarProfile {
            id,
            name: self.name,
            description: self.description,
            color: self.color,
            max_speed: self.max_speed,
            acceleration: self.acceleration,
            handling: self.handling,
        }
    }
}

// === Race state ===

/// Car pose in the arena
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub heading: Degrees,
}

impl Position {
    /// Grid slot every race starts from: bottom of the circuit, facing up
    pub const START: Position = Position {
        x: 400.0,
        y: 500.0,
        heading: Degrees(0.0),
    };

    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self {
            x,
            y,
            heading: Degrees(heading),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

/// Race lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    NotStarted,
    InProgress,
    Finished,
}

/// Everything the renderer and HUD need to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceState {
    /// Car chosen for the session, shared with the catalog's copy
    pub selected_car: Option<Arc<CarProfile>>,
    pub phase: Phase,
    /// Race clock; frozen as the final time once finished
    pub elapsed: Seconds,
    pub current_speed: f64,
    pub position: Position,
    /// 1-based lap currently being driven
    pub current_lap: u32,
    pub total_laps: u32,
    pub lap_progress: Percent,
}

impl Default for RaceState {
    fn default() -> Self {
        Self {
            selected_car: None,
            phase: Phase::NotStarted,
            elapsed: Seconds(0.0),
            current_speed: 0.0,
            position: Position::START,
            current_lap: 1,
            total_laps: TOTAL_LAPS,
            lap_progress: Percent(0.0),
        }
    }
}

// === Input ===

/// Logical control signal, independent of the device that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Accelerate,
    Brake,
    SteerLeft,
    SteerRight,
}

impl Intent {
    pub const ALL: [Intent; 4] = [
        Intent::Accelerate,
        Intent::Brake,
        Intent::SteerLeft,
        Intent::SteerRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Accelerate => "accelerate",
            Intent::Brake => "brake",
            Intent::SteerLeft => "steer_left",
            Intent::SteerRight => "steer_right",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known intent
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown intent: {0}")]
pub struct UnknownIntent(pub String);

impl FromStr for Intent {
    type Err = UnknownIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "accelerate" => Ok(Intent::Accelerate),
            "brake" => Ok(Intent::Brake),
            "steer_left" | "steerleft" => Ok(Intent::SteerLeft),
            "steer_right" | "steerright" => Ok(Intent::SteerRight),
            _ => Err(UnknownIntent(s.to_string())),
        }
    }
}

/// The four control intents as read by one simulated frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputIntentSet {
    pub accelerate: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
}

impl InputIntentSet {
    pub fn get(&self, intent: Intent) -> bool {
        match intent {
            Intent::Accelerate => self.accelerate,
            Intent::Brake => self.brake,
            Intent::SteerLeft => self.steer_left,
            Intent::SteerRight => self.steer_right,
        }
    }

    pub fn set(&mut self, intent: Intent, active: bool) {
        match intent {
            Intent::Accelerate => self.accelerate = active,
            Intent::Brake => self.brake = active,
            Intent::SteerLeft => self.steer_left = active,
            Intent::SteerRight => self.steer_right = active,
        }
    }

    /// Builder-style helper, mostly for tests and scripted input
    pub fn with(mut self, intent: Intent) -> Self {
        self.set(intent, true);
        self
    }

    pub fn is_idle(&self) -> bool {
        !(self.accelerate || self.brake || self.steer_left || self.steer_right)
    }
}

// === Results ===

/// Finished race submitted to the result store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRaceResult {
    pub car_id: CarId,
    pub player_name: String,
    pub final_time_seconds: f64,
    pub track: String,
}

/// Stored race result with the identity and timestamp assigned by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceRecord {
    pub id: ResultId,
    pub car_id: CarId,
    pub player_name: String,
    pub final_time_seconds: f64,
    pub track: String,
    pub date: DateTime<Utc>,
}

impl RaceRecord {
    pub fn from_new(id: ResultId, result: NewRaceResult, date: DateTime<Utc>) -> Self {
        Self {
            id,
            car_id: result.car_id,
            player_name: result.player_name,
            final_time_seconds: result.final_time_seconds,
            track: result.track,
            date,
        }
    }
}

// === Settings ===

/// Player audio preferences, stored as given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub audio_enabled: bool,
    pub music_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            audio_enabled: true,
            music_enabled: true,
        }
    }
}

/// Format a race time the way the HUD shows it: `m:ss.ss`
pub fn format_race_time(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let mins = (seconds / 60.0).floor();
    let secs = seconds - mins * 60.0;
    format!("{}:{:05.2}", mins as u64, secs)
}
