//! Artificial store latency
//!
//! The in-memory stores stand in for a remote backend, so every call can be
//! made to wait like one. Each operation kind carries a fixed weight; the
//! actual pause is `base * weight`. With a base of 100 ms the pauses are
//! 200 ms for listings, 150 ms for single lookups, 300 ms for writes,
//! 250 ms for deletes, 100 ms for loading settings and 50 ms for saving them.

use std::time::Duration;

/// Kind of store call, used to pick a pause length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    List,
    Get,
    Write,
    Delete,
    LoadSettings,
    SaveSettings,
}

impl StoreOp {
    fn weight(self) -> f64 {
        match self {
            StoreOp::List => 2.0,
            StoreOp::Get => 1.5,
            StoreOp::Write => 3.0,
            StoreOp::Delete => 2.5,
            StoreOp::LoadSettings => 1.0,
            StoreOp::SaveSettings => 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreLatency {
    base: Duration,
}

impl StoreLatency {
    /// No pauses at all
    pub const NONE: StoreLatency = StoreLatency {
        base: Duration::ZERO,
    };

    pub fn new(base: Duration) -> Self {
        Self { base }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn base(&self) -> Duration {
        self.base
    }

    pub fn delay_for(&self, op: StoreOp) -> Duration {
        self.base.mul_f64(op.weight())
    }

    /// Block the calling thread for the length of `op`
    ///
    /// Stores are synchronous; async hosts call them from a blocking task.
    pub fn pause(&self, op: StoreOp) {
        let delay = self.delay_for(op);
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}
