pub mod driver;
mod engine;
mod phase;
mod settings;

pub use driver::{drive, Command};
pub use engine::{TimerController, TimerState};
pub use phase::{format_clock, Phase, CYCLES_PER_LONG_BREAK};
pub use settings::TimerSettings;
