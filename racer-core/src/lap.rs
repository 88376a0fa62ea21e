//! Lap progress tracker
//!
//! The circuit is treated as one polar revolution around a fixed center:
//! progress is the car's angle around that center, not distance driven.
//! Jumping across the seam therefore looks exactly like finishing a lap.

use crate::model::Position;
use crate::units::Percent;
use std::f64::consts::PI;

/// Center of the circuit in arena coordinates
pub const TRACK_CENTER: (f64, f64) = (400.0, 300.0);

/// Progress must have been above this on the previous frame...
pub const SEAM_ENTRY_PERCENT: f64 = 80.0;
/// ...and below this on the current one to count as a lap crossing
pub const SEAM_EXIT_PERCENT: f64 = 20.0;

/// Polar progress of `position` around `center`, in [0, 100)
pub fn compute_progress(position: &Position, center: (f64, f64)) -> Percent {
    let angle = (position.y - center.1).atan2(position.x - center.0);
    let normalized = (angle + PI) / (2.0 * PI);
    Percent::wrapped(normalized * 100.0)
}

/// True if going from `previous` to `current` wraps over the start line
///
/// Any jump from the top fifth to the bottom fifth counts, so progress that
/// skips the exact 100 -> 0 point still registers.
pub fn is_lap_crossing(previous: Percent, current: Percent) -> bool {
    previous.0 > SEAM_ENTRY_PERCENT && current.0 < SEAM_EXIT_PERCENT
}

/// Remembers the last progress value and reports seam crossings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LapTracker {
    center: (f64, f64),
    last: Percent,
}

/// What one tracker update observed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LapUpdate {
    pub progress: Percent,
    pub crossed: bool,
}

impl LapTracker {
    pub fn new() -> Self {
        Self::with_center(TRACK_CENTER)
    }

    pub fn with_center(center: (f64, f64)) -> Self {
        Self {
            center,
            last: Percent(0.0),
        }
    }

    /// Forget history, as at the start of a race
    pub fn reset(&mut self) {
        self.last = Percent(0.0);
    }

    pub fn last_progress(&self) -> Percent {
        self.last
    }

    /// Feed a new position; the tracker never touches race state itself
    pub fn update(&mut self, position: &Position) -> LapUpdate {
        let progress = compute_progress(position, self.center);
        self.observe(progress)
    }

    /// Feed a progress value directly
    pub fn observe(&mut self, progress: Percent) -> LapUpdate {
        let crossed = is_lap_crossing(self.last, progress);
        self.last = progress;
        LapUpdate { progress, crossed }
    }
}

impl Default for LapTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress_at(x: f64, y: f64) -> f64 {
        compute_progress(&Position::new(x, y, 0.0), TRACK_CENTER).0
    }

    #[test]
    fn test_progress_cardinal_points() {
        // left of center: atan2(0, -) = pi -> wraps to 0
        assert!(progress_at(100.0, 300.0).abs() < 1e-9);
        // above center: atan2(-, 0) = -pi/2 -> 25
        assert!((progress_at(400.0, 100.0) - 25.0).abs() < 1e-9);
        // right of center: atan2(0, +) = 0 -> 50
        assert!((progress_at(700.0, 300.0) - 50.0).abs() < 1e-9);
        // below center (start grid): pi/2 -> 75
        assert!((progress_at(400.0, 500.0) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_always_in_range() {
        for i in 0..360 {
            let a = (i as f64).to_radians();
            let p = progress_at(400.0 + a.cos() * 150.0, 300.0 + a.sin() * 150.0);
            assert!((0.0..100.0).contains(&p), "progress {} out of range", p);
        }
    }

    #[test]
    fn test_crossing_fires_once_on_wraparound() {
        let mut tracker = LapTracker::new();
        let sequence = [60.0, 85.0, 90.0, 95.0, 5.0, 10.0, 15.0];
        let crossings: Vec<bool> = sequence
            .iter()
            .map(|p| tracker.observe(Percent(*p)).crossed)
            .collect();

        assert_eq!(crossings, vec![false, false, false, false, true, false, false]);
    }

    #[test]
    fn test_no_crossing_without_seam_jump() {
        assert!(!is_lap_crossing(Percent(80.0), Percent(10.0)));
        assert!(!is_lap_crossing(Percent(90.0), Percent(20.0)));
        assert!(!is_lap_crossing(Percent(5.0), Percent(95.0)));
        assert!(is_lap_crossing(Percent(80.1), Percent(19.9)));
    }

    #[test]
    fn test_reset_clears_history() {
        let mut tracker = LapTracker::new();
        tracker.observe(Percent(95.0));
        tracker.reset();
        assert!(!tracker.observe(Percent(5.0)).crossed);
    }

    #[test]
    fn test_update_uses_position() {
        let mut tracker = LapTracker::new();
        tracker.observe(Percent(99.0));
        // just above the left-hand seam point
        let update = tracker.update(&Position::new(100.0, 299.0, 0.0));
        assert!(update.progress.0 < 1.0);
        assert!(update.crossed);
    }
}
