//! Completion notifications.
//!
//! The controller hands every completed phase to a [`Notifier`]. Delivery is
//! fire-and-forget: an error returned here is logged by the controller and
//! never affects the timer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timer::{Phase, TimerSettings};

/// A phase that just ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub phase: Phase,
    pub was_work: bool,
    pub next_phase: Phase,
}

impl Completion {
    pub fn new(phase: Phase, next_phase: Phase) -> Self {
        Self {
            phase,
            was_work: phase.is_work(),
            next_phase,
        }
    }

    /// Notification body text.
    pub fn message(&self) -> &'static str {
        if self.was_work {
            "Work session completed!"
        } else {
            "Break completed!"
        }
    }
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("notification delivery failed: {0}")]
    Delivery(String),

    #[error("sound playback failed: {0}")]
    Sound(String),
}

pub trait Notifier {
    /// Announce a completed phase. `settings` carries the user's
    /// notification preference at the time of completion.
    fn notify(&self, completion: &Completion, settings: &TimerSettings) -> Result<(), NotifyError>;
}

/// Notifier that does nothing. Used headless and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _completion: &Completion, _settings: &TimerSettings) -> Result<(), NotifyError> {
        Ok(())
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, completion: &Completion, settings: &TimerSettings) -> Result<(), NotifyError> {
        (**self).notify(completion, settings)
    }
}
