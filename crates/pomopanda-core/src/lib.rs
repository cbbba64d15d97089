//! # Pomopanda Core Library
//!
//! Core logic for the Pomopanda Pomodoro timer. The `pomopanda` CLI is a thin
//! terminal front end over this crate.
//!
//! ## Architecture
//!
//! - **Timer Controller**: a tick-driven state machine cycling Work, Short
//!   Break and Long Break; the caller invokes `tick()` once per second
//! - **Driver**: async loop owning the tick source and a command channel
//! - **Storage**: key-value persistence (SQLite) for the settings record and
//!   the session history, plus TOML application config
//! - **Stats**: totals and rolling daily average over the history
//!
//! ## Key Components
//!
//! - [`TimerController`]: Core timer state machine
//! - [`Database`]: SQLite key-value backend
//! - [`AppConfig`]: Application configuration management
//! - [`Notifier`]: Completion notification seam

pub mod error;
pub mod events;
pub mod notify;
pub mod stats;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use notify::{Completion, Notifier, NotifyError, SilentNotifier};
pub use stats::HistoryStats;
pub use storage::{
    AppConfig, Database, HistoryStore, KeyValueStore, MemoryStore, SessionRecord, SettingsStore,
};
pub use timer::{format_clock, Phase, TimerController, TimerSettings, TimerState};
