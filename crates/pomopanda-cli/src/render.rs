//! Terminal rendering of timer events.
//!
//! The countdown is drawn on a single status line that is rewritten in
//! place; one-off messages (completions, recorded sessions, rejections) are
//! printed on their own line above it.

use std::io::{self, Write};

use pomopanda_core::{format_clock, Event, Phase, TimerSettings};

/// Window title while the countdown is stopped.
pub const IDLE_TITLE: &str = "Pomodoro Timer";

/// What the terminal currently shows, rebuilt from events.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub phase: Phase,
    pub remaining_secs: u64,
    pub running: bool,
    pub completed_work_cycles: u32,
    pub task: String,
    pub settings: TimerSettings,
}

/// Output produced for one event.
#[derive(Debug, PartialEq)]
pub struct Frame {
    pub message: Option<String>,
    pub redraw: bool,
}

impl View {
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            phase: Phase::Work,
            remaining_secs: Phase::Work.duration_secs(&settings),
            running: false,
            completed_work_cycles: 0,
            task: String::new(),
            settings,
        }
    }

    pub fn apply(&mut self, event: &Event) -> Frame {
        let redraw = Frame {
            message: None,
            redraw: true,
        };
        match event {
            Event::StateSnapshot { state, settings, .. } => {
                self.phase = state.phase;
                self.remaining_secs = state.remaining_secs;
                self.running = state.is_running;
                self.completed_work_cycles = state.completed_work_cycles;
                self.task = state.current_task_label.clone();
                self.settings = settings.clone();
                redraw
            }
            Event::TimerStarted {
                phase,
                remaining_secs,
                ..
            }
            | Event::TimerPaused {
                phase,
                remaining_secs,
                ..
            } => {
                self.phase = *phase;
                self.remaining_secs = *remaining_secs;
                self.running = matches!(event, Event::TimerStarted { .. });
                redraw
            }
            Event::TimerTicked {
                phase,
                remaining_secs,
            } => {
                self.phase = *phase;
                self.remaining_secs = *remaining_secs;
                redraw
            }
            Event::TimerReset { remaining_secs, .. } => {
                self.phase = Phase::Work;
                self.remaining_secs = *remaining_secs;
                self.running = false;
                self.completed_work_cycles = 0;
                self.task.clear();
                redraw
            }
            Event::PhaseCompleted {
                phase,
                completed_work_cycles,
                ..
            } => {
                self.completed_work_cycles = *completed_work_cycles;
                Frame {
                    message: Some(format!("{} complete", phase.label())),
                    redraw: false,
                }
            }
            Event::SessionRecorded { record } => Frame {
                message: Some(format!(
                    "Recorded {} min: {}",
                    record.duration_minutes, record.task_label
                )),
                redraw: false,
            },
            Event::PhaseAdvanced {
                to,
                remaining_secs,
                running,
                ..
            } => {
                self.phase = *to;
                self.remaining_secs = *remaining_secs;
                self.running = *running;
                redraw
            }
            Event::SettingsApplied {
                settings, resized, ..
            } => {
                self.settings = settings.clone();
                if *resized {
                    self.remaining_secs = self.phase.duration_secs(settings);
                }
                redraw
            }
            Event::SettingsRejected { reason, .. } => Frame {
                message: Some(format!("Rejected: {reason}")),
                redraw: true,
            },
            Event::TaskChanged { label, .. } => {
                self.task = label.clone();
                redraw
            }
        }
    }

    pub fn status_line(&self) -> String {
        let mut line = format!(
            "{} {} [{}] cycles: {}",
            self.phase.label(),
            format_clock(self.remaining_secs),
            if self.running { "running" } else { "paused" },
            self.completed_work_cycles
        );
        if !self.task.is_empty() {
            line.push_str(" | ");
            line.push_str(&self.task);
        }
        line
    }

    /// Window title, or `None` when the user hides it. The countdown only
    /// shows while running.
    pub fn title(&self) -> Option<String> {
        if self.settings.hide_title_in_chrome {
            return None;
        }
        if !self.running {
            return Some(IDLE_TITLE.to_string());
        }
        Some(format!(
            "{} - {}",
            format_clock(self.remaining_secs),
            self.phase.title()
        ))
    }
}

/// Writes frames to a terminal.
pub struct Terminal<W> {
    out: W,
    view: View,
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W, settings: TimerSettings) -> Self {
        Self {
            out,
            view: View::new(settings),
        }
    }

    pub fn render(&mut self, event: &Event) -> io::Result<()> {
        let frame = self.view.apply(event);
        if let Some(message) = &frame.message {
            writeln!(self.out, "\r\x1b[2K{message}")?;
        }
        if frame.redraw || frame.message.is_some() {
            write!(self.out, "\r\x1b[2K{}", self.view.status_line())?;
            if let Some(title) = self.view.title() {
                write!(self.out, "\x1b]0;{title}\x07")?;
            }
        }
        self.out.flush()
    }

    /// Leave the status line and clear the title.
    pub fn finish(&mut self) -> io::Result<()> {
        writeln!(self.out, "\x1b]0;\x07")?;
        self.out.flush()
    }
}
