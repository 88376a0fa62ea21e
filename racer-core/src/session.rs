//! Race session: the per-frame driver
//!
//! Bundles the input sampler with the race controller so that one frame
//! reads one consistent intent snapshot and runs exactly one tick. Hosts
//! call [`RaceSession::on_frame`] from their redraw callback (or a timer)
//! and stop scheduling frames once [`RaceSession::is_running`] turns false.

use crate::input::InputSampler;
use crate::model::{CarProfile, Intent, Phase, RaceState};
use crate::race::{RaceController, RaceEvent, SelectOutcome, StartOutcome};
use std::sync::Arc;

/// What one frame callback did
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// No race in progress; nothing was touched
    Idle,
    /// One tick ran
    Ticked {
        event: Option<RaceEvent>,
        /// False once this tick ended the race; the host should stop scheduling
        still_running: bool,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RaceSession {
    controller: RaceController,
    input: InputSampler,
}

impl RaceSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue a race from a saved state with no controls held
    pub fn resume(state: RaceState) -> Self {
        Self {
            controller: RaceController::resume(state),
            input: InputSampler::new(),
        }
    }

    pub fn controller(&self) -> &RaceController {
        &self.controller
    }

    pub fn input(&self) -> &InputSampler {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputSampler {
        &mut self.input
    }

    pub fn snapshot(&self) -> RaceState {
        self.controller.snapshot()
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_racing()
    }

    pub fn set_intent(&mut self, intent: Intent, active: bool) {
        self.input.set_intent(intent, active);
    }

    pub fn select_car(&mut self, car: Arc<CarProfile>) -> SelectOutcome {
        self.controller.select_car(car)
    }

    /// Begin a fresh race; controls held before the start are dropped
    pub fn start(&mut self) -> StartOutcome {
        let outcome = self.controller.start();
        if outcome == StartOutcome::Started {
            self.input.release_all();
        }
        outcome
    }

    /// Leave the race and drop any held controls
    pub fn change_car(&mut self) -> Phase {
        self.input.release_all();
        self.controller.change_car()
    }

    /// Run one frame: snapshot input, tick once
    pub fn on_frame(&mut self) -> FrameOutcome {
        if !self.controller.is_racing() {
            return FrameOutcome::Idle;
        }

        let intents = self.input.snapshot();
        let event = self.controller.tick(&intents);
        let still_running = self.controller.is_racing();
        if !still_running {
            self.input.release_all();
        }
        FrameOutcome::Ticked {
            event,
            still_running,
        }
    }
}
