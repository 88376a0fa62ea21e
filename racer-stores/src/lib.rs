//! In-memory stores for Arcade Racer
//!
//! Implementations of the collaborator traits from `racer-core`, each behind
//! a lock and with optional artificial latency so hosts behave as they would
//! against a remote backend.

pub mod catalog;
pub mod latency;
pub mod results;
pub mod seed;
pub mod settings;

pub use catalog::InMemoryCarCatalog;
pub use latency::{StoreLatency, StoreOp};
pub use results::{InMemoryResultStore, DEFAULT_LEADERBOARD_LIMIT};
pub use seed::{load_seed_file, SeedData};
pub use settings::InMemorySettingsStore;

use racer_core::{CarCatalog, ResultStore, SettingsStore};
use std::sync::Arc;

/// The three stores a game host needs, as shared trait objects
#[derive(Clone)]
pub struct StoreSet {
    pub cars: Arc<dyn CarCatalog>,
    pub results: Arc<dyn ResultStore>,
    pub settings: Arc<dyn SettingsStore>,
}

impl StoreSet {
    pub fn in_memory(seed: SeedData, latency: StoreLatency) -> Self {
        tracing::info!(
            "Seeding stores with {} cars and {} results",
            seed.cars.len(),
            seed.results.len()
        );
        Self {
            cars: Arc::new(InMemoryCarCatalog::new(seed.cars, latency)),
            results: Arc::new(InMemoryResultStore::new(seed.results, latency)),
            settings: Arc::new(InMemorySettingsStore::new(seed.settings, latency)),
        }
    }

    /// Demo data, no latency
    pub fn demo() -> Self {
        Self::in_memory(SeedData::demo(), StoreLatency::NONE)
    }
}
