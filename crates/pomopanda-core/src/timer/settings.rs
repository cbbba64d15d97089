//! User-editable timer settings.
//!
//! The field names on the wire are fixed (`workMinutes`, `breakMinutes`, ...)
//! because the record is persisted as a JSON document. Documents written by
//! the old web front end used different names; those are accepted as aliases
//! on read and never written.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSettings {
    #[serde(alias = "workTime")]
    pub work_minutes: u32,
    #[serde(alias = "breakTime")]
    pub break_minutes: u32,
    #[serde(alias = "longBreakTime")]
    pub long_break_minutes: u32,
    #[serde(alias = "allowNotifications")]
    pub notifications_enabled: bool,
    #[serde(alias = "hideTitle")]
    pub hide_title_in_chrome: bool,
}

fn default_work_minutes() -> u32 {
    25
}
fn default_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            notifications_enabled: true,
            hide_title_in_chrome: false,
        }
    }
}

impl TimerSettings {
    /// Reject any non-positive duration.
    ///
    /// # Errors
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let durations = [
            ("workMinutes", self.work_minutes),
            ("breakMinutes", self.break_minutes),
            ("longBreakMinutes", self.long_break_minutes),
        ];
        for (field, value) in durations {
            if value == 0 {
                return Err(ValidationError::NonPositiveDuration { field, value });
            }
        }
        Ok(())
    }
}
