//! Race lifecycle controller
//!
//! Owns the [`RaceState`] and is the only writer of it. Drives the
//! NotStarted -> InProgress -> Finished state machine, accumulates race time
//! and turns lap crossings into [`RaceEvent`]s.
//!
//! Time is fixed-step: every tick is exactly 1/60 s of race time no matter
//! how late the host delivered it. Timed results are therefore reproducible
//! from the input sequence alone.

use crate::kinematics;
use crate::lap::LapTracker;
use crate::model::{CarId, CarProfile, InputIntentSet, Phase, Position, RaceState};
use crate::units::{Percent, Seconds};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Nominal simulation rate
pub const TICK_RATE_HZ: f64 = 60.0;

/// Race time added by one tick
pub const FRAME_SECONDS: f64 = 1.0 / TICK_RATE_HZ;

/// Notification produced by a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RaceEvent {
    /// A lap boundary was crossed and `lap` is now being driven
    LapComplete { lap: u32, total_laps: u32 },
    /// The final lap was completed; `final_time` is the frozen race clock
    RaceComplete { car_id: CarId, final_time: Seconds },
}

/// Result of [`RaceController::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartOutcome {
    Started,
    /// No car selected; nothing changed, the caller should offer car selection
    NeedsCarSelection,
}

/// Result of [`RaceController::select_car`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectOutcome {
    Selected,
    /// Cars cannot be swapped mid-race; nothing changed
    RaceInProgress,
}

/// Single owner of the race state
#[derive(Debug, Clone)]
pub struct RaceController {
    state: RaceState,
    tracker: LapTracker,
    /// Ticks committed since the last start
    frames: u64,
}

impl RaceController {
    pub fn new() -> Self {
        Self {
            state: RaceState::default(),
            tracker: LapTracker::new(),
            frames: 0,
        }
    }

    /// Rebuild a controller around an existing state
    ///
    /// The lap tracker is primed with the state's progress and the frame
    /// counter with its elapsed time, so ticking continues seamlessly.
    pub fn resume(state: RaceState) -> Self {
        let mut tracker = LapTracker::new();
        tracker.observe(state.lap_progress);
        let frames = (state.elapsed.0 * TICK_RATE_HZ).round().max(0.0) as u64;
        Self {
            state,
            tracker,
            frames,
        }
    }

    pub fn state(&self) -> &RaceState {
        &self.state
    }

    /// Owned copy for renderers and the HUD
    pub fn snapshot(&self) -> RaceState {
        self.state.clone()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_racing(&self) -> bool {
        self.state.phase == Phase::InProgress
    }

    pub fn selected_car(&self) -> Option<&Arc<CarProfile>> {
        self.state.selected_car.as_ref()
    }

    /// Choose the car for the next race
    ///
    /// Allowed before a race and after one has finished. The phase is left
    /// alone either way.
    pub fn select_car(&mut self, car: Arc<CarProfile>) -> SelectOutcome {
        if self.is_racing() {
            return SelectOutcome::RaceInProgress;
        }
        self.state.selected_car = Some(car);
        SelectOutcome::Selected
    }

    /// Begin a fresh race with the selected car
    ///
    /// Always resets clock, lap, progress, speed and pose, so it doubles as
    /// "restart" from any phase.
    pub fn start(&mut self) -> StartOutcome {
        if self.state.selected_car.is_none() {
            return StartOutcome::NeedsCarSelection;
        }

        self.state.phase = Phase::InProgress;
        self.state.elapsed = Seconds(0.0);
        self.state.current_lap = 1;
        self.state.lap_progress = Percent(0.0);
        self.state.current_speed = 0.0;
        self.state.position = Position::START;
        self.tracker.reset();
        self.frames = 0;

        StartOutcome::Started
    }

    /// Leave the current race so another car can be picked
    ///
    /// The current selection stays until [`select_car`](Self::select_car)
    /// replaces it. Returns the phase that was left.
    pub fn change_car(&mut self) -> Phase {
        let previous = self.state.phase;
        self.state.phase = Phase::NotStarted;
        self.state.current_speed = 0.0;
        previous
    }

    /// Advance the race by one frame
    ///
    /// A no-op outside [`Phase::InProgress`]. On the frame that completes the
    /// last lap the race finishes with the clock frozen at its previous value
    /// and the motion of that frame is discarded.
    pub fn tick(&mut self, intents: &InputIntentSet) -> Option<RaceEvent> {
        if !self.is_racing() {
            return None;
        }
        let car = self.state.selected_car.clone()?;

        let motion = kinematics::advance(
            &car,
            self.state.current_speed,
            self.state.position,
            intents,
        );
        let lap = self.tracker.update(&motion.position);

        let mut event = None;
        if lap.crossed {
            if self.state.current_lap < self.state.total_laps {
                self.state.current_lap += 1;
                event = Some(RaceEvent::LapComplete {
                    lap: self.state.current_lap,
                    total_laps: self.state.total_laps,
                });
            } else {
                self.state.phase = Phase::Finished;
                return Some(RaceEvent::RaceComplete {
                    car_id: car.id,
                    final_time: self.state.elapsed,
                });
            }
        }

        self.state.current_speed = motion.speed;
        self.state.position = motion.position;
        self.state.lap_progress = lap.progress;
        self.frames += 1;
        // derived from the frame count so 180 ticks are exactly 3.0 s
        self.state.elapsed = Seconds(self.frames as f64 / TICK_RATE_HZ);

        event
    }
}

impl Default for RaceController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Intent;

    fn car_a() -> Arc<CarProfile> {
        Arc::new(CarProfile {
            id: 1,
            name: "Car A".to_string(),
            description: String::new(),
            color: "#FF1744".to_string(),
            max_speed: 100.0,
            acceleration: 50.0,
            handling: 60.0,
        })
    }

    fn accelerate() -> InputIntentSet {
        InputIntentSet::default().with(Intent::Accelerate)
    }

    /// Lower-left of the circuit, just below the seam, heading up
    fn near_seam_state(lap: u32) -> RaceState {
        RaceState {
            selected_car: Some(car_a()),
            phase: Phase::InProgress,
            elapsed: Seconds(40.0),
            current_speed: 100.0,
            position: Position::new(150.0, 310.0, 0.0),
            current_lap: lap,
            total_laps: 3,
            lap_progress: Percent(99.4),
        }
    }

    #[test]
    fn test_start_without_car_needs_selection() {
        let mut race = RaceController::new();
        assert_eq!(race.start(), StartOutcome::NeedsCarSelection);
        assert_eq!(race.phase(), Phase::NotStarted);
    }

    #[test]
    fn test_select_car_keeps_phase() {
        let mut race = RaceController::new();
        assert_eq!(race.select_car(car_a()), SelectOutcome::Selected);
        assert_eq!(race.phase(), Phase::NotStarted);
        assert_eq!(race.selected_car().unwrap().name, "Car A");
    }

    #[test]
    fn test_selected_car_is_shared_not_copied() {
        let car = car_a();
        let mut race = RaceController::new();
        race.select_car(Arc::clone(&car));
        assert!(Arc::ptr_eq(race.selected_car().unwrap(), &car));
    }

    #[test]
    fn test_select_car_rejected_mid_race() {
        let mut race = RaceController::new();
        race.select_car(car_a());
        race.start();

        let mut other = (*car_a()).clone();
        other.id = 2;
        assert_eq!(
            race.select_car(Arc::new(other)),
            SelectOutcome::RaceInProgress
        );
        assert_eq!(race.selected_car().unwrap().id, 1);
    }

    #[test]
    fn test_start_resets_state() {
        let mut race = RaceController::resume(near_seam_state(2));
        race.change_car();
        assert_eq!(race.start(), StartOutcome::Started);

        let state = race.state();
        assert_eq!(state.phase, Phase::InProgress);
        assert_eq!(state.elapsed, Seconds(0.0));
        assert_eq!(state.current_lap, 1);
        assert_eq!(state.lap_progress, Percent(0.0));
        assert_eq!(state.current_speed, 0.0);
        assert_eq!(state.position, Position::START);
    }

    #[test]
    fn test_tick_is_noop_before_start() {
        let mut race = RaceController::new();
        race.select_car(car_a());
        let before = race.snapshot();

        assert_eq!(race.tick(&accelerate()), None);
        assert_eq!(race.snapshot(), before);
    }

    #[test]
    fn test_accelerate_for_three_seconds() {
        let mut race = RaceController::new();
        race.select_car(car_a());
        race.start();

        for _ in 0..180 {
            assert_eq!(race.tick(&accelerate()), None);
        }

        assert_eq!(race.state().current_speed, 100.0);
        assert_eq!(race.state().elapsed, Seconds(3.0));
        assert_eq!(race.state().current_lap, 1);
    }

    #[test]
    fn test_lap_crossing_advances_lap() {
        let mut race = RaceController::resume(near_seam_state(1));

        let event = race.tick(&accelerate());

        assert_eq!(
            event,
            Some(RaceEvent::LapComplete {
                lap: 2,
                total_laps: 3
            })
        );
        assert_eq!(race.state().current_lap, 2);
        assert_eq!(race.phase(), Phase::InProgress);
        assert!(race.state().lap_progress.0 < 20.0);
    }

    #[test]
    fn test_final_lap_crossing_finishes_and_freezes() {
        let mut race = RaceController::resume(near_seam_state(3));
        let before = race.snapshot();

        let event = race.tick(&accelerate());

        assert_eq!(
            event,
            Some(RaceEvent::RaceComplete {
                car_id: 1,
                final_time: Seconds(40.0)
            })
        );
        let after = race.snapshot();
        assert_eq!(after.phase, Phase::Finished);
        assert_eq!(after.elapsed, before.elapsed);
        assert_eq!(after.current_lap, 3);

        // a stray tick after the finish must not move anything
        assert_eq!(race.tick(&accelerate()), None);
        assert_eq!(race.state().position, after.position);
        assert_eq!(race.state().current_speed, after.current_speed);
        assert_eq!(race.state().elapsed, after.elapsed);
    }

    #[test]
    fn test_select_and_restart_after_finish() {
        let mut race = RaceController::resume(near_seam_state(3));
        race.tick(&accelerate());
        assert_eq!(race.phase(), Phase::Finished);

        assert_eq!(race.select_car(car_a()), SelectOutcome::Selected);
        assert_eq!(race.phase(), Phase::Finished);
        assert_eq!(race.start(), StartOutcome::Started);
        assert_eq!(race.phase(), Phase::InProgress);
        assert_eq!(race.state().elapsed, Seconds(0.0));
    }

    #[test]
    fn test_change_car_leaves_race() {
        let mut race = RaceController::new();
        race.select_car(car_a());
        race.start();
        race.tick(&accelerate());

        assert_eq!(race.change_car(), Phase::InProgress);
        assert_eq!(race.phase(), Phase::NotStarted);
        assert!(race.selected_car().is_some());
        assert_eq!(race.tick(&accelerate()), None);
    }

    #[test]
    fn test_resume_restores_frame_count() {
        let mut race = RaceController::resume(near_seam_state(1));
        race.tick(&InputIntentSet::default());
        assert!((race.state().elapsed.0 - (40.0 + FRAME_SECONDS)).abs() < 1e-9);
    }
}
