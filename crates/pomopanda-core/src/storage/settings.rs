use tracing::warn;

use super::KeyValueStore;
use crate::error::StorageError;
use crate::timer::TimerSettings;

/// Key of the settings document.
pub const SETTINGS_KEY: &str = "pomodoroSettings";

/// Load/save of the single current settings record.
pub trait SettingsStore {
    /// Stored settings, or defaults when the document is absent, unreadable,
    /// malformed, or holds an invalid duration.
    fn load_settings(&self) -> TimerSettings;

    /// Overwrite the stored settings.
    ///
    /// # Errors
    /// Returns an error if the document cannot be written.
    fn save_settings(&self, settings: &TimerSettings) -> Result<(), StorageError>;
}

impl<K: KeyValueStore + ?Sized> SettingsStore for K {
    fn load_settings(&self) -> TimerSettings {
        let raw = match self.kv_get(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return TimerSettings::default(),
            Err(e) => {
                warn!(error = %e, "failed to read settings, using defaults");
                return TimerSettings::default();
            }
        };

        let settings = match serde_json::from_str::<TimerSettings>(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "malformed settings document, using defaults");
                return TimerSettings::default();
            }
        };

        if let Err(e) = settings.validate() {
            warn!(error = %e, "stored settings are invalid, using defaults");
            return TimerSettings::default();
        }
        settings
    }

    fn save_settings(&self, settings: &TimerSettings) -> Result<(), StorageError> {
        let json = serde_json::to_string(settings).map_err(|e| StorageError::Encode {
            key: SETTINGS_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.kv_set(SETTINGS_KEY, &json)
    }
}
