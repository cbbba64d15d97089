use serde::{Deserialize, Serialize};

use super::settings::TimerSettings;

/// Long break after every this many completed work phases.
pub const CYCLES_PER_LONG_BREAK: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn is_work(self) -> bool {
        self == Phase::Work
    }

    /// Configured length of this phase in minutes.
    pub fn duration_min(self, settings: &TimerSettings) -> u32 {
        match self {
            Phase::Work => settings.work_minutes,
            Phase::ShortBreak => settings.break_minutes,
            Phase::LongBreak => settings.long_break_minutes,
        }
    }

    /// Configured length of this phase in seconds.
    ///
    /// Uses saturating arithmetic so absurd minute values cannot overflow.
    pub fn duration_secs(self, settings: &TimerSettings) -> u64 {
        u64::from(self.duration_min(settings)).saturating_mul(60)
    }

    /// The break that follows the `completed_cycles`-th work phase.
    pub fn break_after(completed_cycles: u32) -> Phase {
        if completed_cycles > 0 && completed_cycles % CYCLES_PER_LONG_BREAK == 0 {
            Phase::LongBreak
        } else {
            Phase::ShortBreak
        }
    }

    /// Heading shown above the countdown.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Work Time",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }

    /// Short name used in window titles.
    pub fn title(self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::ShortBreak => "Break",
            Phase::LongBreak => "LongBreak",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Formats seconds as `MM:SS`. Minutes are not wrapped at 60.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn break_cadence() {
        let expected = [
            (1, Phase::ShortBreak),
            (2, Phase::ShortBreak),
            (3, Phase::ShortBreak),
            (4, Phase::LongBreak),
            (5, Phase::ShortBreak),
            (7, Phase::ShortBreak),
            (8, Phase::LongBreak),
            (12, Phase::LongBreak),
        ];
        for (cycles, phase) in expected {
            assert_eq!(Phase::break_after(cycles), phase, "after cycle {cycles}");
        }
    }

    #[test]
    fn durations_follow_settings() {
        let settings = TimerSettings {
            work_minutes: 50,
            break_minutes: 10,
            long_break_minutes: 30,
            ..TimerSettings::default()
        };
        assert_eq!(Phase::Work.duration_secs(&settings), 3000);
        assert_eq!(Phase::ShortBreak.duration_secs(&settings), 600);
        assert_eq!(Phase::LongBreak.duration_secs(&settings), 1800);
    }

    #[test]
    fn titles_and_labels() {
        assert_eq!(Phase::Work.title(), "Work");
        assert_eq!(Phase::ShortBreak.title(), "Break");
        assert_eq!(Phase::LongBreak.title(), "LongBreak");
        assert_eq!(Phase::LongBreak.label(), "Long Break");
        assert_eq!(Phase::Work.to_string(), "Work Time");
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(120 * 60), "120:00");
    }

    #[test]
    fn phase_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&Phase::ShortBreak).unwrap(),
            "\"shortBreak\""
        );
    }
}
