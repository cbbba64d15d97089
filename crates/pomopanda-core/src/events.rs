use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::SessionRecord;
use crate::timer::{Phase, TimerSettings, TimerState};

/// Every state change of the timer produces an Event.
/// Front ends render events instead of reading controller state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// One second elapsed in a running phase.
    TimerTicked {
        phase: Phase,
        remaining_secs: u64,
    },
    /// The countdown of `phase` reached zero.
    PhaseCompleted {
        phase: Phase,
        was_work: bool,
        completed_work_cycles: u32,
        at: DateTime<Utc>,
    },
    SessionRecorded {
        record: SessionRecord,
    },
    /// The next phase is loaded. `running` is false when auto advance is off.
    PhaseAdvanced {
        from: Phase,
        to: Phase,
        remaining_secs: u64,
        running: bool,
        at: DateTime<Utc>,
    },
    SettingsApplied {
        settings: TimerSettings,
        /// Whether the current countdown was resized to the new duration.
        resized: bool,
        at: DateTime<Utc>,
    },
    SettingsRejected {
        reason: String,
        at: DateTime<Utc>,
    },
    TaskChanged {
        label: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        settings: TimerSettings,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Whether the countdown source must be re-armed after this event.
    pub fn rearms_countdown(&self) -> bool {
        matches!(
            self,
            Event::TimerStarted { .. } | Event::PhaseAdvanced { running: true, .. }
        )
    }
}
