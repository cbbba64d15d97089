//! Async countdown driver.
//!
//! Owns the periodic tick source and feeds the controller from a single task:
//! commands and ticks never run concurrently. Whenever the timer starts or
//! moves on to a new phase the interval is re-armed in place, so the next
//! tick lands one full period later and a tick scheduled for the old phase
//! can never hit the new one.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use super::engine::TimerController;
use super::phase::Phase;
use super::settings::TimerSettings;
use crate::error::CoreError;
use crate::events::Event;
use crate::notify::Notifier;
use crate::storage::{HistoryStore, SettingsStore};

/// Shortest tick period; `tokio::time::interval` rejects zero.
const MIN_TICK: Duration = Duration::from_millis(1);

/// Requests accepted by [`drive`].
#[derive(Debug)]
pub enum Command {
    Start,
    Pause,
    /// Start when stopped, pause when running.
    Toggle,
    Reset,
    SetTask(String),
    /// Change one phase length. Rejections come back as
    /// [`Event::SettingsRejected`].
    SetDuration { phase: Phase, minutes: u32 },
    ApplySettings {
        settings: TimerSettings,
        reply: oneshot::Sender<Result<(), CoreError>>,
    },
    Snapshot,
    Quit,
}

/// Run the countdown until [`Command::Quit`] arrives or every command
/// sender is dropped.
///
/// A zero `tick_every` is raised to one millisecond.
///
/// A [`Event::StateSnapshot`] is emitted first. Events are dropped silently
/// once the receiving side is gone.
pub async fn drive<S, N>(
    controller: &mut TimerController<S, N>,
    mut commands: mpsc::Receiver<Command>,
    events: mpsc::UnboundedSender<Event>,
    tick_every: Duration,
) where
    S: SettingsStore + HistoryStore,
    N: Notifier,
{
    let tick_every = tick_every.max(MIN_TICK);
    let mut countdown = time::interval_at(Instant::now() + tick_every, tick_every);
    countdown.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let emit = |event: Event| {
        let _ = events.send(event);
    };
    emit(controller.snapshot());

    loop {
        tokio::select! {
            biased;

            command = commands.recv() => {
                let command = match command {
                    Some(Command::Quit) | None => break,
                    Some(command) => command,
                };
                for event in apply_command(controller, command) {
                    if event.rearms_countdown() {
                        countdown.reset();
                    }
                    emit(event);
                }
            }

            _ = countdown.tick(), if controller.is_running() => {
                for event in controller.tick() {
                    if event.rearms_countdown() {
                        countdown.reset();
                    }
                    emit(event);
                }
            }
        }
    }
    debug!("countdown driver stopped");
}

fn apply_command<S, N>(controller: &mut TimerController<S, N>, command: Command) -> Vec<Event>
where
    S: SettingsStore + HistoryStore,
    N: Notifier,
{
    match command {
        Command::Start => controller.start().into_iter().collect(),
        Command::Pause => controller.pause().into_iter().collect(),
        Command::Toggle => {
            if controller.is_running() {
                controller.pause().into_iter().collect()
            } else {
                controller.start().into_iter().collect()
            }
        }
        Command::Reset => vec![controller.reset()],
        Command::SetTask(label) => vec![controller.set_current_task(label)],
        Command::SetDuration { phase, minutes } => {
            match controller.set_phase_minutes(phase, minutes) {
                Ok(event) => vec![event],
                Err(e) => {
                    warn!(error = %e, "settings change rejected");
                    vec![Event::SettingsRejected {
                        reason: e.to_string(),
                        at: Utc::now(),
                    }]
                }
            }
        }
        Command::ApplySettings { settings, reply } => {
            let result = controller.apply_settings(settings);
            let events = match &result {
                Ok(event) => vec![event.clone()],
                Err(e) => vec![Event::SettingsRejected {
                    reason: e.to_string(),
                    at: Utc::now(),
                }],
            };
            let _ = reply.send(result.map(|_| ()));
            events
        }
        Command::Snapshot => vec![controller.snapshot()],
        Command::Quit => Vec::new(),
    }
}
