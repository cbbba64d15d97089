//! Timer controller implementation.
//!
//! The controller is a tick-driven state machine. It does not use internal
//! threads or clocks - the caller is responsible for calling `tick()` once per
//! elapsed second while the timer runs (see [`super::driver`]).
//!
//! ## Phase Transitions
//!
//! ```text
//! Work -> ShortBreak -> Work -> ... -> Work (4th) -> LongBreak -> Work
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = TimerController::new(store, SilentNotifier);
//! timer.start();
//! // Once per second:
//! for event in timer.tick() { /* render */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::phase::Phase;
use super::settings::TimerSettings;
use crate::error::Result;
use crate::events::Event;
use crate::notify::{Completion, Notifier};
use crate::storage::{HistoryStore, SessionRecord, SettingsStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    pub remaining_secs: u64,
    pub is_running: bool,
    pub completed_work_cycles: u32,
    pub current_task_label: String,
}

impl TimerState {
    /// Fresh state: a full, stopped work phase.
    pub fn initial(settings: &TimerSettings) -> Self {
        Self {
            phase: Phase::Work,
            remaining_secs: Phase::Work.duration_secs(settings),
            is_running: false,
            completed_work_cycles: 0,
            current_task_label: String::new(),
        }
    }
}

/// Pomodoro timer controller.
///
/// Owns the timer state and the settings record; writes settings and
/// completed sessions through `store` and announces completions through
/// `notifier`.
pub struct TimerController<S, N> {
    store: S,
    notifier: N,
    settings: TimerSettings,
    state: TimerState,
    /// Set once the running work phase has been written to history.
    /// Cleared on every entry to `Phase::Work`.
    session_recorded: bool,
    auto_advance: bool,
}

impl<S, N> TimerController<S, N>
where
    S: SettingsStore + HistoryStore,
    N: Notifier,
{
    /// Create a controller with the settings found in `store`.
    ///
    /// Starts stopped, at the beginning of a work phase.
    pub fn new(store: S, notifier: N) -> Self {
        let settings = store.load_settings();
        debug!(?settings, "timer controller created");
        Self {
            state: TimerState::initial(&settings),
            store,
            notifier,
            settings,
            session_recorded: false,
            auto_advance: true,
        }
    }

    /// Whether the next phase starts running on its own after a completion.
    pub fn with_auto_advance(mut self, auto_advance: bool) -> Self {
        self.auto_advance = auto_advance;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.state.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn completed_work_cycles(&self) -> u32 {
        self.state.completed_work_cycles
    }

    pub fn current_task(&self) -> &str {
        &self.state.current_task_label
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state.clone(),
            settings: self.settings.clone(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.state.is_running {
            return None;
        }
        self.state.is_running = true;
        debug!(phase = %self.state.phase, remaining = self.state.remaining_secs, "timer started");
        Some(Event::TimerStarted {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.is_running {
            return None;
        }
        self.state.is_running = false;
        debug!(phase = %self.state.phase, remaining = self.state.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and return to a fresh work phase with no cycles and no task.
    pub fn reset(&mut self) -> Event {
        self.state = TimerState::initial(&self.settings);
        self.session_recorded = false;
        debug!("timer reset");
        Event::TimerReset {
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Does nothing while stopped. When the countdown reaches zero the phase
    /// completes within the same call.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.state.is_running {
            return Vec::new();
        }

        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
        let mut events = vec![Event::TimerTicked {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_secs,
        }];

        if self.state.remaining_secs == 0 {
            events.extend(self.complete_phase());
        }
        events
    }

    /// Validate, persist and adopt new settings.
    ///
    /// A stopped timer is resized to the full new length of its phase; a
    /// running one keeps counting and picks the new lengths up from the next
    /// phase on.
    ///
    /// # Errors
    /// Returns a validation error for non-positive durations, or a storage
    /// error if the settings cannot be written. Either way nothing changes.
    pub fn apply_settings(&mut self, settings: TimerSettings) -> Result<Event> {
        settings.validate()?;
        self.store.save_settings(&settings)?;
        self.settings = settings;

        let resized = !self.state.is_running;
        if resized {
            self.state.remaining_secs = self.state.phase.duration_secs(&self.settings);
        }
        info!(settings = ?self.settings, resized, "settings applied");
        Ok(Event::SettingsApplied {
            settings: self.settings.clone(),
            resized,
            at: Utc::now(),
        })
    }

    /// Change the length of one phase, keeping every other setting.
    ///
    /// # Errors
    /// See [`TimerController::apply_settings`].
    pub fn set_phase_minutes(&mut self, phase: Phase, minutes: u32) -> Result<Event> {
        let mut settings = self.settings.clone();
        match phase {
            Phase::Work => settings.work_minutes = minutes,
            Phase::ShortBreak => settings.break_minutes = minutes,
            Phase::LongBreak => settings.long_break_minutes = minutes,
        }
        self.apply_settings(settings)
    }

    /// Label attached to the next recorded session.
    pub fn set_current_task(&mut self, label: impl Into<String>) -> Event {
        self.state.current_task_label = label.into();
        Event::TaskChanged {
            label: self.state.current_task_label.clone(),
            at: Utc::now(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Handle the countdown of the current phase reaching zero.
    fn complete_phase(&mut self) -> Vec<Event> {
        let finished = self.state.phase;
        if finished.is_work() && self.session_recorded {
            debug!("work completion already recorded, ignoring");
            return Vec::new();
        }

        let now = Utc::now();
        self.state.remaining_secs = 0;
        let mut events = Vec::with_capacity(3);

        let next = if finished.is_work() {
            self.session_recorded = true;
            self.state.completed_work_cycles += 1;
            events.push(Event::PhaseCompleted {
                phase: finished,
                was_work: true,
                completed_work_cycles: self.state.completed_work_cycles,
                at: now,
            });

            let record = SessionRecord::new(
                now,
                self.settings.work_minutes,
                &self.state.current_task_label,
            );
            match self.store.append(&record) {
                Ok(()) => {
                    info!(task = %record.task_label, minutes = record.duration_minutes, "session recorded");
                    events.push(Event::SessionRecorded { record });
                }
                Err(e) => warn!(error = %e, "failed to record session"),
            }

            Phase::break_after(self.state.completed_work_cycles)
        } else {
            events.push(Event::PhaseCompleted {
                phase: finished,
                was_work: false,
                completed_work_cycles: self.state.completed_work_cycles,
                at: now,
            });
            Phase::Work
        };

        if let Err(e) = self
            .notifier
            .notify(&Completion::new(finished, next), &self.settings)
        {
            warn!(error = %e, "completion notification failed");
        }

        // Stop fully before the next phase is armed.
        self.state.is_running = false;
        self.enter_phase(next);
        self.state.is_running = self.auto_advance;

        debug!(from = %finished, to = %next, running = self.state.is_running, "phase advanced");
        events.push(Event::PhaseAdvanced {
            from: finished,
            to: next,
            remaining_secs: self.state.remaining_secs,
            running: self.state.is_running,
            at: now,
        });
        events
    }

    fn enter_phase(&mut self, phase: Phase) {
        self.state.phase = phase;
        self.state.remaining_secs = phase.duration_secs(&self.settings);
        if phase.is_work() {
            self.session_recorded = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, StorageError};
    use crate::notify::{NotifyError, SilentNotifier};
    use crate::storage::{KeyValueStore, MemoryStore, HISTORY_KEY, UNNAMED_TASK};
    use proptest::prelude::*;
    use std::cell::RefCell;

    fn settings(work: u32, short: u32, long: u32) -> TimerSettings {
        TimerSettings {
            work_minutes: work,
            break_minutes: short,
            long_break_minutes: long,
            ..TimerSettings::default()
        }
    }

    fn controller_with(s: TimerSettings) -> TimerController<MemoryStore, SilentNotifier> {
        let store = MemoryStore::new();
        store.save_settings(&s).unwrap();
        TimerController::new(store, SilentNotifier)
    }

    /// Tick until the running phase completes; returns the events of that tick.
    fn run_out<S, N>(timer: &mut TimerController<S, N>) -> Vec<Event>
    where
        S: SettingsStore + HistoryStore,
        N: Notifier,
    {
        timer.start();
        loop {
            let events = timer.tick();
            if events
                .iter()
                .any(|e| matches!(e, Event::PhaseAdvanced { .. }))
            {
                return events;
            }
            assert!(!events.is_empty(), "timer stopped before completion");
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        seen: RefCell<Vec<Completion>>,
    }

    impl Notifier for &RecordingNotifier {
        fn notify(&self, completion: &Completion, _: &TimerSettings) -> Result<(), NotifyError> {
            self.seen.borrow_mut().push(*completion);
            Ok(())
        }
    }

    struct FailingNotifier;

    impl Notifier for FailingNotifier {
        fn notify(&self, _: &Completion, _: &TimerSettings) -> Result<(), NotifyError> {
            Err(NotifyError::Delivery("no notification daemon".into()))
        }
    }

    /// Accepts everything except writes to `reject_key`.
    struct RejectingStore {
        inner: MemoryStore,
        reject_key: &'static str,
    }

    impl KeyValueStore for RejectingStore {
        fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.kv_get(key)
        }

        fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == self.reject_key {
                return Err(StorageError::Locked);
            }
            self.inner.kv_set(key, value)
        }
    }

    #[test]
    fn starts_stopped_at_full_work_phase() {
        let timer = controller_with(settings(25, 5, 15));
        let state = timer.state();
        assert_eq!(state.phase, Phase::Work);
        assert_eq!(state.remaining_secs, 25 * 60);
        assert!(!state.is_running);
        assert_eq!(state.completed_work_cycles, 0);
        assert_eq!(state.current_task_label, "");
    }

    #[test]
    fn uses_defaults_without_stored_settings() {
        let timer = TimerController::new(MemoryStore::new(), SilentNotifier);
        assert_eq!(timer.settings(), &TimerSettings::default());
        assert_eq!(timer.remaining_secs(), 25 * 60);
    }

    #[test]
    fn start_pause_resume() {
        let mut timer = controller_with(settings(25, 5, 15));
        assert!(timer.start().is_some());
        assert!(timer.is_running());
        assert!(timer.start().is_none(), "second start is a no-op");

        timer.tick();
        timer.tick();
        assert!(timer.pause().is_some());
        assert!(!timer.is_running());
        assert!(timer.pause().is_none());
        assert_eq!(timer.remaining_secs(), 25 * 60 - 2);

        assert!(timer.tick().is_empty(), "ticks are ignored while paused");
        assert_eq!(timer.remaining_secs(), 25 * 60 - 2);

        timer.start();
        timer.tick();
        assert_eq!(timer.remaining_secs(), 25 * 60 - 3);
    }

    #[test]
    fn last_tick_completes_in_same_step() {
        let mut timer = controller_with(settings(1, 5, 15));
        timer.start();
        for _ in 0..59 {
            timer.tick();
        }
        assert_eq!(timer.remaining_secs(), 1);

        let events = timer.tick();
        assert_eq!(
            events[0],
            Event::TimerTicked {
                phase: Phase::Work,
                remaining_secs: 0
            }
        );
        assert!(matches!(
            events[1],
            Event::PhaseCompleted {
                phase: Phase::Work,
                was_work: true,
                completed_work_cycles: 1,
                ..
            }
        ));
        assert!(matches!(events[2], Event::SessionRecorded { .. }));
        assert!(matches!(
            events[3],
            Event::PhaseAdvanced {
                from: Phase::Work,
                to: Phase::ShortBreak,
                remaining_secs: 300,
                running: true,
                ..
            }
        ));
        assert_eq!(timer.phase(), Phase::ShortBreak);
        assert!(timer.is_running());
    }

    #[test]
    fn four_sessions_end_in_long_break() {
        let mut timer = controller_with(settings(25, 5, 15));
        let mut phases = vec![timer.phase()];
        while phases.len() < 8 {
            run_out(&mut timer);
            phases.push(timer.phase());
        }
        assert_eq!(
            phases,
            [
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::LongBreak,
            ]
        );
        assert_eq!(timer.remaining_secs(), 15 * 60);
        assert_eq!(timer.completed_work_cycles(), 4);
        assert_eq!(timer.store().load_all().unwrap().len(), 4);

        run_out(&mut timer);
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.remaining_secs(), 25 * 60);
    }

    #[test]
    fn work_completion_records_one_session() {
        let mut timer = controller_with(settings(1, 1, 1));
        timer.set_current_task("write report");
        run_out(&mut timer);

        let history = timer.store().load_all().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].duration_minutes, 1);
        assert_eq!(history[0].task_label, "write report");

        // Break completion records nothing.
        run_out(&mut timer);
        assert_eq!(timer.store().load_all().unwrap().len(), 1);
    }

    #[test]
    fn repeated_completion_does_not_double_record() {
        let mut timer = controller_with(settings(1, 1, 1));
        timer.start();
        timer.state.remaining_secs = 0;
        timer.session_recorded = true;

        assert!(timer.complete_phase().is_empty());
        assert!(timer.complete_phase().is_empty());
        assert!(timer.store().load_all().unwrap().is_empty());
        assert_eq!(timer.completed_work_cycles(), 0);
        assert_eq!(timer.phase(), Phase::Work);
    }

    #[test]
    fn guard_is_set_after_work_and_cleared_on_return_to_work() {
        let mut timer = controller_with(settings(1, 1, 1));
        run_out(&mut timer);
        assert!(timer.session_recorded);
        assert_eq!(timer.phase(), Phase::ShortBreak);

        run_out(&mut timer);
        assert!(!timer.session_recorded);
        assert_eq!(timer.phase(), Phase::Work);

        run_out(&mut timer);
        assert_eq!(timer.store().load_all().unwrap().len(), 2);
    }

    #[test]
    fn blank_task_is_recorded_as_unnamed() {
        let mut timer = controller_with(settings(1, 1, 1));
        run_out(&mut timer);
        let history = timer.store().load_all().unwrap();
        assert_eq!(history[0].task_label, UNNAMED_TASK);
    }

    #[test]
    fn recorded_duration_uses_settings_at_completion() {
        let mut timer = controller_with(settings(2, 1, 1));
        timer.start();
        timer.tick();
        timer
            .apply_settings(settings(1, 1, 1))
            .expect("valid settings");
        // Running: the countdown keeps its length.
        assert_eq!(timer.remaining_secs(), 119);
        run_out(&mut timer);
        let history = timer.store().load_all().unwrap();
        assert_eq!(history[0].duration_minutes, 1);
    }

    #[test]
    fn reset_clears_everything() {
        let mut timer = controller_with(settings(1, 1, 1));
        timer.set_current_task("essay");
        run_out(&mut timer);
        timer.tick();

        let event = timer.reset();
        assert!(matches!(event, Event::TimerReset { remaining_secs: 60, .. }));
        assert_eq!(timer.state(), &TimerState::initial(timer.settings()));
        assert!(!timer.session_recorded);
        assert_eq!(timer.current_task(), "");
    }

    #[test]
    fn apply_settings_resizes_stopped_timer() {
        let mut timer = controller_with(settings(25, 5, 15));
        timer.start();
        timer.tick();
        timer.pause();

        let event = timer.apply_settings(settings(30, 5, 15)).unwrap();
        assert!(matches!(event, Event::SettingsApplied { resized: true, .. }));
        assert_eq!(timer.remaining_secs(), 30 * 60);
    }

    #[test]
    fn apply_settings_resizes_break_phases() {
        let mut timer = controller_with(settings(1, 5, 15));
        run_out(&mut timer);
        timer.pause();
        assert_eq!(timer.phase(), Phase::ShortBreak);
        timer.apply_settings(settings(1, 7, 15)).unwrap();
        assert_eq!(timer.remaining_secs(), 7 * 60);

        let mut timer = controller_with(settings(1, 1, 15));
        for _ in 0..7 {
            run_out(&mut timer);
        }
        timer.pause();
        assert_eq!(timer.phase(), Phase::LongBreak);
        timer.apply_settings(settings(1, 1, 20)).unwrap();
        assert_eq!(timer.remaining_secs(), 20 * 60);
    }

    #[test]
    fn apply_settings_while_running_waits_for_next_phase() {
        let mut timer = controller_with(settings(1, 5, 15));
        timer.start();
        timer.tick();

        let event = timer.apply_settings(settings(1, 9, 15)).unwrap();
        assert!(matches!(event, Event::SettingsApplied { resized: false, .. }));
        assert_eq!(timer.remaining_secs(), 59);

        run_out(&mut timer);
        assert_eq!(timer.phase(), Phase::ShortBreak);
        assert_eq!(timer.remaining_secs(), 9 * 60);
    }

    #[test]
    fn apply_settings_persists() {
        let mut timer = controller_with(settings(25, 5, 15));
        let wanted = TimerSettings {
            work_minutes: 45,
            break_minutes: 10,
            long_break_minutes: 20,
            notifications_enabled: false,
            hide_title_in_chrome: true,
        };
        timer.apply_settings(wanted.clone()).unwrap();
        assert_eq!(timer.store().load_settings(), wanted);

        let reloaded = TimerController::new(timer.store(), SilentNotifier);
        assert_eq!(reloaded.settings(), &wanted);
    }

    #[test]
    fn invalid_settings_are_rejected_unchanged() {
        let mut timer = controller_with(settings(25, 5, 15));
        let before_state = timer.state().clone();

        let err = timer.apply_settings(settings(25, 0, 15)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(timer.settings(), &settings(25, 5, 15));
        assert_eq!(timer.store().load_settings(), settings(25, 5, 15));
        assert_eq!(timer.state(), &before_state);

        assert!(timer.set_phase_minutes(Phase::Work, 0).is_err());
        assert_eq!(timer.settings().work_minutes, 25);
    }

    #[test]
    fn settings_write_failure_leaves_settings_unchanged() {
        let store = RejectingStore {
            inner: MemoryStore::new(),
            reject_key: crate::storage::SETTINGS_KEY,
        };
        let mut timer = TimerController::new(store, SilentNotifier);
        let err = timer.apply_settings(settings(40, 5, 15)).unwrap_err();
        assert!(matches!(err, CoreError::Storage(_)));
        assert_eq!(timer.settings(), &TimerSettings::default());
        assert_eq!(timer.remaining_secs(), 25 * 60);
    }

    #[test]
    fn set_phase_minutes_changes_one_field() {
        let mut timer = controller_with(settings(25, 5, 15));
        timer.set_phase_minutes(Phase::LongBreak, 20).unwrap();
        assert_eq!(timer.settings(), &settings(25, 5, 20));
    }

    #[test]
    fn history_failure_does_not_disturb_timer() {
        let store = RejectingStore {
            inner: MemoryStore::new(),
            reject_key: HISTORY_KEY,
        };
        store.save_settings(&settings(1, 1, 1)).unwrap();
        let mut timer = TimerController::new(store, SilentNotifier);

        let events = run_out(&mut timer);
        assert!(!events
            .iter()
            .any(|e| matches!(e, Event::SessionRecorded { .. })));
        assert_eq!(timer.phase(), Phase::ShortBreak);
        assert_eq!(timer.completed_work_cycles(), 1);
        assert!(timer.is_running());
    }

    #[test]
    fn notifier_sees_every_completion() {
        let notifier = RecordingNotifier::default();
        let store = MemoryStore::new();
        store.save_settings(&settings(1, 1, 1)).unwrap();
        let mut timer = TimerController::new(store, &notifier);

        run_out(&mut timer);
        run_out(&mut timer);
        assert_eq!(
            *notifier.seen.borrow(),
            [
                Completion::new(Phase::Work, Phase::ShortBreak),
                Completion::new(Phase::ShortBreak, Phase::Work),
            ]
        );
    }

    #[test]
    fn notifier_failure_is_swallowed() {
        let store = MemoryStore::new();
        store.save_settings(&settings(1, 1, 1)).unwrap();
        let mut timer = TimerController::new(store, FailingNotifier);

        run_out(&mut timer);
        assert_eq!(timer.phase(), Phase::ShortBreak);
        assert_eq!(timer.store().load_all().unwrap().len(), 1);
    }

    #[test]
    fn without_auto_advance_next_phase_waits() {
        let mut timer = controller_with(settings(1, 1, 1)).with_auto_advance(false);
        let events = run_out(&mut timer);
        assert!(matches!(
            events.last(),
            Some(Event::PhaseAdvanced { running: false, .. })
        ));
        assert!(!timer.is_running());
        assert_eq!(timer.phase(), Phase::ShortBreak);
        assert_eq!(timer.remaining_secs(), 60);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut timer = controller_with(settings(25, 5, 15));
        timer.set_current_task("inbox zero");
        match timer.snapshot() {
            Event::StateSnapshot {
                state, settings: s, ..
            } => {
                assert_eq!(state.current_task_label, "inbox zero");
                assert_eq!(state.remaining_secs, 25 * 60);
                assert_eq!(s, settings(25, 5, 15));
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }

    #[derive(Debug, Clone)]
    enum Op {
        Start,
        Pause,
        Tick(u16),
        Task(String),
        Reset,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Start),
            Just(Op::Pause),
            (0u16..400).prop_map(Op::Tick),
            "[a-z ]{0,12}".prop_map(Op::Task),
            Just(Op::Reset),
        ]
    }

    proptest! {
        #[test]
        fn reset_always_yields_fresh_work_phase(
            work in 1u32..=120,
            short in 1u32..=30,
            long in 1u32..=60,
            ops in proptest::collection::vec(op(), 0..12),
        ) {
            let mut timer = controller_with(settings(work, short, long));
            for op in ops {
                match op {
                    Op::Start => { timer.start(); }
                    Op::Pause => { timer.pause(); }
                    Op::Tick(n) => for _ in 0..n { timer.tick(); },
                    Op::Task(label) => { timer.set_current_task(label); }
                    Op::Reset => { timer.reset(); }
                }
            }
            timer.reset();
            prop_assert_eq!(timer.phase(), Phase::Work);
            prop_assert_eq!(timer.remaining_secs(), u64::from(work) * 60);
            prop_assert!(!timer.is_running());
            prop_assert_eq!(timer.completed_work_cycles(), 0);
        }

        #[test]
        fn long_break_follows_every_fourth_session(sessions in 1u32..=16) {
            let mut timer = controller_with(settings(1, 1, 1));
            for n in 1..=sessions {
                run_out(&mut timer);
                prop_assert_eq!(timer.completed_work_cycles(), n);
                let expected = if n % 4 == 0 { Phase::LongBreak } else { Phase::ShortBreak };
                prop_assert_eq!(timer.phase(), expected);
                run_out(&mut timer);
                prop_assert_eq!(timer.phase(), Phase::Work);
            }
            prop_assert_eq!(timer.store().load_all().unwrap().len() as u32, sessions);
        }
    }
}
