//! In-memory race result store and leaderboard

use crate::latency::{StoreLatency, StoreOp};
use chrono::Utc;
use racer_core::model::{NewRaceResult, RaceRecord, ResultId};
use racer_core::{ResultStore, StoreError, StoreResult};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Leaderboard length when the caller does not ask for one
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 5;

pub struct InMemoryResultStore {
    results: RwLock<Vec<RaceRecord>>,
    latency: StoreLatency,
}

impl InMemoryResultStore {
    pub fn new(results: Vec<RaceRecord>, latency: StoreLatency) -> Self {
        Self {
            results: RwLock::new(results),
            latency,
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<RaceRecord>>> {
        self.results
            .read()
            .map_err(|_| StoreError::Storage("result store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<RaceRecord>>> {
        self.results
            .write()
            .map_err(|_| StoreError::Storage("result store lock poisoned".to_string()))
    }
}

/// Records ordered fastest first; ties keep insertion order
fn by_time(records: &[RaceRecord]) -> Vec<RaceRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| a.final_time_seconds.total_cmp(&b.final_time_seconds));
    sorted
}

impl ResultStore for InMemoryResultStore {
    fn record_result(&self, result: NewRaceResult) -> StoreResult<RaceRecord> {
        self.latency.pause(StoreOp::Write);
        let mut results = self.write()?;
        let id = results.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let record = RaceRecord::from_new(id, result, Utc::now());
        debug!(
            "Recorded result {} for car {}: {:.2}s",
            record.id, record.car_id, record.final_time_seconds
        );
        results.push(record.clone());
        Ok(record)
    }

    fn leaderboard(&self, limit: usize) -> StoreResult<Vec<RaceRecord>> {
        self.latency.pause(StoreOp::List);
        let mut board = by_time(&self.read()?);
        board.truncate(limit);
        Ok(board)
    }

    fn list_results(&self) -> StoreResult<Vec<RaceRecord>> {
        self.latency.pause(StoreOp::List);
        Ok(self.read()?.clone())
    }

    fn get_result(&self, id: ResultId) -> StoreResult<Option<RaceRecord>> {
        self.latency.pause(StoreOp::Get);
        Ok(self.read()?.iter().find(|r| r.id == id).cloned())
    }

    fn best_result(&self) -> StoreResult<Option<RaceRecord>> {
        self.latency.pause(StoreOp::Get);
        Ok(by_time(&self.read()?).into_iter().next())
    }

    fn update_result(&self, id: ResultId, result: NewRaceResult) -> StoreResult<RaceRecord> {
        self.latency.pause(StoreOp::Write);
        let mut results = self.write()?;
        let slot = results
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::ResultNotFound(id))?;
        *slot = RaceRecord::from_new(id, result, slot.date);
        debug!("Updated result {}", id);
        Ok(slot.clone())
    }

    fn delete_result(&self, id: ResultId) -> StoreResult<RaceRecord> {
        self.latency.pause(StoreOp::Delete);
        let mut results = self.write()?;
        let index = results
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::ResultNotFound(id))?;
        debug!("Deleted result {}", id);
        Ok(results.remove(index))
    }
}
