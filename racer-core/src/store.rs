//! Collaborator store trait definitions
//!
//! The race core never owns catalog, result or settings data. Hosts inject
//! implementations of these traits (see the `racer-stores` crate for the
//! in-memory ones) and call them around the simulation, never from inside a
//! tick.

use crate::error::StoreResult;
use crate::model::{CarDraft, CarId, CarProfile, NewRaceResult, RaceRecord, ResultId, Settings};

/// Read/write access to the car catalog
pub trait CarCatalog: Send + Sync {
    /// All cars in catalog order
    fn list_cars(&self) -> StoreResult<Vec<CarProfile>>;

    /// Look up one car
    ///
    /// Returns:
    /// - `Ok(Some(car))` if the id exists
    /// - `Ok(None)` if it does not
    /// - `Err(_)` if the catalog itself failed
    fn get_car(&self, id: CarId) -> StoreResult<Option<CarProfile>>;

    /// Add a car, assigning the next free id
    fn create_car(&self, draft: CarDraft) -> StoreResult<CarProfile>;

    /// Replace the fields of an existing car, keeping its id
    fn update_car(&self, id: CarId, draft: CarDraft) -> StoreResult<CarProfile>;

    /// Remove a car and return what was removed
    fn delete_car(&self, id: CarId) -> StoreResult<CarProfile>;
}

/// Persistence for finished races and the leaderboard built from them
pub trait ResultStore: Send + Sync {
    /// Store a finished race, assigning identity and timestamp
    fn record_result(&self, result: NewRaceResult) -> StoreResult<RaceRecord>;

    /// Up to `limit` records ordered by ascending final time
    fn leaderboard(&self, limit: usize) -> StoreResult<Vec<RaceRecord>>;

    /// All records in insertion order
    fn list_results(&self) -> StoreResult<Vec<RaceRecord>>;

    fn get_result(&self, id: ResultId) -> StoreResult<Option<RaceRecord>>;

    /// Fastest record, if any
    fn best_result(&self) -> StoreResult<Option<RaceRecord>>;

    /// Replace the submitted fields of a record, keeping id and date
    fn update_result(&self, id: ResultId, result: NewRaceResult) -> StoreResult<RaceRecord>;

    fn delete_result(&self, id: ResultId) -> StoreResult<RaceRecord>;
}

/// Player settings; values are applied without validation
pub trait SettingsStore: Send + Sync {
    fn load_settings(&self) -> StoreResult<Settings>;

    fn save_settings(&self, settings: Settings) -> StoreResult<Settings>;
}
