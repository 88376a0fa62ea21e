//! Arcade Racer Core Library
//!
//! This crate provides the race simulation (input sampling, kinematics, lap
//! tracking, lifecycle state machine), the shared data model, and the store
//! traits that hosts implement for car catalog, results and settings.

pub mod error;
pub mod input;
pub mod kinematics;
pub mod lap;
pub mod model;
pub mod race;
pub mod session;
pub mod store;
pub mod units;

pub use error::{StoreError, StoreResult};
pub use model::{CarProfile, InputIntentSet, Intent, Phase, Position, RaceState};
pub use race::{RaceController, RaceEvent, SelectOutcome, StartOutcome};
pub use session::{FrameOutcome, RaceSession};
pub use store::{CarCatalog, ResultStore, SettingsStore};
