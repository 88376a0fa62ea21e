//! In-memory player settings

use crate::latency::{StoreLatency, StoreOp};
use racer_core::model::Settings;
use racer_core::{SettingsStore, StoreError, StoreResult};
use std::sync::RwLock;
use tracing::debug;

pub struct InMemorySettingsStore {
    settings: RwLock<Settings>,
    latency: StoreLatency,
}

impl InMemorySettingsStore {
    pub fn new(settings: Settings, latency: StoreLatency) -> Self {
        Self {
            settings: RwLock::new(settings),
            latency,
        }
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn load_settings(&self) -> StoreResult<Settings> {
        self.latency.pause(StoreOp::LoadSettings);
        self.settings
            .read()
            .map(|s| *s)
            .map_err(|_| StoreError::Storage("settings lock poisoned".to_string()))
    }

    fn save_settings(&self, settings: Settings) -> StoreResult<Settings> {
        self.latency.pause(StoreOp::SaveSettings);
        let mut current = self
            .settings
            .write()
            .map_err(|_| StoreError::Storage("settings lock poisoned".to_string()))?;
        *current = settings;
        debug!(
            "Saved settings: audio={} music={}",
            settings.audio_enabled, settings.music_enabled
        );
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_round_trip() {
        let store = InMemorySettingsStore::new(Settings::default(), StoreLatency::NONE);
        assert_eq!(store.load_settings().unwrap(), Settings::default());

        let muted = Settings {
            audio_enabled: false,
            music_enabled: true,
        };
        store.save_settings(muted).unwrap();
        assert_eq!(store.load_settings().unwrap(), muted);
    }
}
