//! Integration tests for the in-memory stores

use racer_core::model::{CarDraft, NewRaceResult, Settings};
use racer_core::StoreError;
use racer_stores::{
    load_seed_file, SeedData, StoreLatency, StoreSet, DEFAULT_LEADERBOARD_LIMIT,
};
use std::time::{Duration, Instant};

fn new_result(car_id: u32, time: f64) -> NewRaceResult {
    NewRaceResult {
        car_id,
        player_name: "Player".to_string(),
        final_time_seconds: time,
        track: "circuit-alpha".to_string(),
    }
}

#[test]
fn test_demo_catalog_lists_cars() {
    let stores = StoreSet::demo();
    let cars = stores.cars.list_cars().unwrap();
    assert_eq!(cars.len(), 4);
    assert_eq!(cars[0].name, "Lightning");

    let thunder = stores.cars.get_car(2).unwrap().expect("car 2 should exist");
    assert_eq!(thunder.name, "Thunder");
}

#[test]
fn test_demo_leaderboard_is_fastest_first() {
    let stores = StoreSet::demo();
    let board = stores
        .results
        .leaderboard(DEFAULT_LEADERBOARD_LIMIT)
        .unwrap();

    assert_eq!(board.len(), DEFAULT_LEADERBOARD_LIMIT);
    assert!(board
        .windows(2)
        .all(|w| w[0].final_time_seconds <= w[1].final_time_seconds));
    assert_eq!(
        stores.results.best_result().unwrap().unwrap().id,
        board[0].id
    );
}

#[test]
fn test_new_record_enters_leaderboard() {
    let stores = StoreSet::demo();
    let record = stores.results.record_result(new_result(3, 45.5)).unwrap();

    assert_eq!(record.id, 7);
    assert_eq!(record.track, "circuit-alpha");
    let board = stores.results.leaderboard(1).unwrap();
    assert_eq!(board[0].id, record.id);
}

#[test]
fn test_car_crud_round() {
    let stores = StoreSet::in_memory(SeedData::default(), StoreLatency::NONE);
    let draft = CarDraft {
        name: "Custom".to_string(),
        description: "Built in the garage".to_string(),
        color: "#FFD600".to_string(),
        max_speed: 90.0,
        acceleration: 80.0,
        handling: 70.0,
    };

    let created = stores.cars.create_car(draft.clone()).unwrap();
    assert_eq!(created.id, 1);

    let mut faster = draft;
    faster.max_speed = 99.0;
    let updated = stores.cars.update_car(created.id, faster).unwrap();
    assert_eq!(updated.max_speed, 99.0);

    let removed = stores.cars.delete_car(created.id).unwrap();
    assert_eq!(removed, updated);
    assert!(stores.cars.list_cars().unwrap().is_empty());
    assert!(stores.cars.delete_car(created.id).unwrap_err().is_not_found());
}

#[test]
fn test_delete_missing_result() {
    let stores = StoreSet::demo();
    assert_eq!(
        stores.results.delete_result(42),
        Err(StoreError::ResultNotFound(42))
    );
    assert_eq!(stores.results.get_result(42).unwrap(), None);
}

#[test]
fn test_settings_are_stored_unvalidated() {
    let stores = StoreSet::demo();
    let silent = Settings {
        audio_enabled: false,
        music_enabled: false,
    };
    assert_eq!(stores.settings.save_settings(silent).unwrap(), silent);
    assert_eq!(stores.settings.load_settings().unwrap(), silent);
}

#[test]
fn test_latency_is_applied() {
    let stores = StoreSet::in_memory(SeedData::demo(), StoreLatency::from_millis(10));

    let started = Instant::now();
    stores.cars.list_cars().unwrap();
    assert!(started.elapsed() >= Duration::from_millis(20));
}

#[test]
fn test_load_seed_file() {
    let path = std::env::temp_dir().join(format!("racer-seed-{}.json", std::process::id()));
    let seed = SeedData::demo();
    std::fs::write(&path, serde_json::to_string(&seed).unwrap()).unwrap();

    let loaded = load_seed_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.cars, seed.cars);
    assert_eq!(loaded.results.len(), seed.results.len());
}

#[test]
fn test_load_missing_seed_file_fails() {
    let err = load_seed_file(std::path::Path::new("/nonexistent/racer-seed.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read seed file"));
}
