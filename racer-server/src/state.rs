//! Application state management

use crate::notice::RaceNotice;
use racer_core::model::DEFAULT_TRACK;
use racer_core::{RaceSession, RaceState};
use racer_stores::StoreSet;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio_util::sync::CancellationToken;

/// What gets written next to a finished race
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceHostConfig {
    pub player_name: String,
    pub track: String,
}

impl Default for RaceHostConfig {
    fn default() -> Self {
        Self {
            player_name: "Player".to_string(),
            track: DEFAULT_TRACK.to_string(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The one race session; every tick and every control call goes through this lock
    pub session: Arc<Mutex<RaceSession>>,

    /// Car catalog, result store and settings
    pub stores: StoreSet,

    pub host: Arc<RaceHostConfig>,

    /// Broadcast channel for race snapshots, one per tick
    pub race_tx: broadcast::Sender<RaceState>,

    /// Broadcast channel for lap, finish and result notices
    pub notice_tx: broadcast::Sender<RaceNotice>,

    /// Cancellation token for the running race loop task
    pub race_cancel: Arc<RwLock<Option<CancellationToken>>>,
}

impl AppState {
    pub fn new(stores: StoreSet, host: RaceHostConfig) -> Self {
        // a couple of seconds of snapshots for slow subscribers
        let (race_tx, _) = broadcast::channel(128);
        let (notice_tx, _) = broadcast::channel(32);

        Self {
            session: Arc::new(Mutex::new(RaceSession::new())),
            stores,
            host: Arc::new(host),
            race_tx,
            notice_tx,
            race_cancel: Arc::new(RwLock::new(None)),
        }
    }

    /// Demo stores without latency, default host settings
    pub fn demo() -> Self {
        Self::new(StoreSet::demo(), RaceHostConfig::default())
    }

    pub fn subscribe_race(&self) -> broadcast::Receiver<RaceState> {
        self.race_tx.subscribe()
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<RaceNotice> {
        self.notice_tx.subscribe()
    }

    /// Push a snapshot; nobody listening is fine
    pub fn publish_state(&self, state: RaceState) {
        let _ = self.race_tx.send(state);
    }

    pub fn publish_notice(&self, notice: RaceNotice) {
        let _ = self.notice_tx.send(notice);
    }
}
