//! Input sampler
//!
//! Collects press/release signals from keyboard and touch/pointer controls
//! into one [`InputIntentSet`] that the race tick reads once per frame.
//!
//! Semantics are last-write-wins per intent. Holding `ArrowUp` and the touch
//! accelerate button together, then releasing either one, releases
//! accelerate. That is an accepted limitation, not a bug.

use crate::model::{InputIntentSet, Intent};
use serde::{Deserialize, Serialize};

/// Where a control signal came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    Keyboard,
    Touch,
}

/// Map a keyboard `KeyboardEvent.code` to an intent
pub fn intent_for_key(code: &str) -> Option<Intent> {
    match code {
        "ArrowUp" | "KeyW" => Some(Intent::Accelerate),
        "ArrowDown" | "KeyS" => Some(Intent::Brake),
        "ArrowLeft" | "KeyA" => Some(Intent::SteerLeft),
        "ArrowRight" | "KeyD" => Some(Intent::SteerRight),
        _ => None,
    }
}

/// Map an on-screen control button name to an intent
pub fn intent_for_button(button: &str) -> Option<Intent> {
    match button {
        "accelerate" => Some(Intent::Accelerate),
        "brake" => Some(Intent::Brake),
        "left" => Some(Intent::SteerLeft),
        "right" => Some(Intent::SteerRight),
        _ => None,
    }
}

/// Holds the currently asserted intents
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    intents: InputIntentSet,
    last_source: Option<InputSource>,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest state of one control
    pub fn set_intent(&mut self, intent: Intent, active: bool) {
        self.intents.set(intent, active);
    }

    /// Record a keyboard event; unknown key codes are ignored
    ///
    /// Returns the intent the key mapped to, if any.
    pub fn key(&mut self, code: &str, pressed: bool) -> Option<Intent> {
        let intent = intent_for_key(code)?;
        self.set_intent(intent, pressed);
        self.last_source = Some(InputSource::Keyboard);
        Some(intent)
    }

    /// Record a touch/pointer button event; unknown buttons are ignored
    pub fn button(&mut self, button: &str, pressed: bool) -> Option<Intent> {
        let intent = intent_for_button(button)?;
        self.set_intent(intent, pressed);
        self.last_source = Some(InputSource::Touch);
        Some(intent)
    }

    /// Current intents; reading never changes them
    pub fn snapshot(&self) -> InputIntentSet {
        self.intents
    }

    /// Device that produced the most recent mapped event
    pub fn last_source(&self) -> Option<InputSource> {
        self.last_source
    }

    /// Drop every held intent
    pub fn release_all(&mut self) {
        self.intents = InputIntentSet::default();
    }
}
