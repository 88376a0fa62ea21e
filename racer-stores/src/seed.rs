//! Initial store contents
//!
//! Either the built-in demo garage or a JSON file of the form
//! `{"cars": [...], "results": [...], "settings": {...}, "race": {...}}`
//! where every key is optional. `race` is a saved race state for the host
//! to resume; the stores never see it.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use racer_core::model::{CarProfile, RaceRecord, RaceState, Settings, DEFAULT_TRACK};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub cars: Vec<CarProfile>,
    #[serde(default)]
    pub results: Vec<RaceRecord>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<RaceState>,
}

impl SeedData {
    /// Four demo cars and a short leaderboard
    pub fn demo() -> Self {
        let car = |id, name: &str, description: &str, color: &str, stats: (f64, f64, f64)| {
            CarProfile {
                id,
                name: name.to_string(),
                description: description.to_string(),
                color: color.to_string(),
                max_speed: stats.0,
                acceleration: stats.1,
                handling: stats.2,
            }
        };
        let cars = vec![
            car(1, "Lightning", "Balanced all-rounder", "#FF1744", (85.0, 75.0, 70.0)),
            car(2, "Thunder", "Raw top speed, heavy in the corners", "#2979FF", (100.0, 60.0, 45.0)),
            car(3, "Viper", "Quick off the line", "#00E676", (75.0, 95.0, 65.0)),
            car(4, "Phantom", "Sticks to the racing line", "#D500F9", (70.0, 70.0, 95.0)),
        ];

        // 2024-01-15T12:00:00Z, one day apart
        let day = |n: i64| {
            DateTime::<Utc>::from_timestamp(1_705_320_000 + n * 86_400, 0).unwrap_or_default()
        };
        let result = |id, car_id, player: &str, time: f64, date| RaceRecord {
            id,
            car_id,
            player_name: player.to_string(),
            final_time_seconds: time,
            track: DEFAULT_TRACK.to_string(),
            date,
        };
        let results = vec![
            result(1, 1, "Ace", 92.45, day(0)),
            result(2, 2, "Blaze", 88.12, day(1)),
            result(3, 3, "Comet", 95.80, day(2)),
            result(4, 4, "Drift", 90.33, day(3)),
            result(5, 2, "Ace", 86.97, day(4)),
            result(6, 1, "Echo", 99.01, day(5)),
        ];

        Self {
            cars,
            results,
            settings: Settings::default(),
            race: None,
        }
    }
}

/// Read seed data from a JSON file
pub fn load_seed_file(path: &Path) -> Result<SeedData> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let seed = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))?;
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_ids_are_unique() {
        let seed = SeedData::demo();
        let mut ids: Vec<u32> = seed.cars.iter().map(|c| c.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), seed.cars.len());
        assert!(seed
            .results
            .iter()
            .all(|r| seed.cars.iter().any(|c| c.id == r.car_id)));
    }

    #[test]
    fn test_partial_seed_json() {
        let seed: SeedData = serde_json::from_str(
            r##"{"cars":[{"id":9,"name":"Solo","color":"#000000","description":"",
                "max_speed":50,"acceleration":50,"handling":50}]}"##,
        )
        .unwrap();
        assert_eq!(seed.cars.len(), 1);
        assert!(seed.results.is_empty());
        assert_eq!(seed.settings, Settings::default());
        assert!(seed.race.is_none());
    }

    #[test]
    fn test_seed_with_saved_race() {
        let seed: SeedData = serde_json::from_str(
            r##"{"settings":{"audio_enabled":false,"music_enabled":true},
                "race":{"selected_car":null,"phase":"InProgress","elapsed":12.5,
                "current_speed":40,"position":{"x":150,"y":320,"heading":0},
                "current_lap":2,"total_laps":3,"lap_progress":55}}"##,
        )
        .unwrap();
        let race = seed.race.unwrap();
        assert_eq!(race.current_lap, 2);
        assert_eq!(race.elapsed.0, 12.5);
        assert!(seed.cars.is_empty());
        assert!(!seed.settings.audio_enabled);
    }
}
