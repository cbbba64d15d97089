use clap::Subcommand;
use pomopanda_core::storage::Database;
use pomopanda_core::{SettingsStore, SilentNotifier, TimerController, TimerSettings};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the current settings as JSON
    Show,
    /// Change one or more settings
    Set {
        /// Work phase length in minutes
        #[arg(long)]
        work: Option<u32>,
        /// Short break length in minutes
        #[arg(long = "break")]
        break_minutes: Option<u32>,
        /// Long break length in minutes
        #[arg(long)]
        long_break: Option<u32>,
        /// Raise a desktop notification when a phase completes
        #[arg(long)]
        notifications: Option<bool>,
        /// Keep the countdown out of the terminal title
        #[arg(long)]
        hide_title: Option<bool>,
    },
    /// Restore the default settings
    Reset,
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        SettingsAction::Show => {
            let settings = db.load_settings();
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsAction::Set {
            work,
            break_minutes,
            long_break,
            notifications,
            hide_title,
        } => {
            let mut controller = TimerController::new(db, SilentNotifier);
            let current = controller.settings().clone();
            let updated = TimerSettings {
                work_minutes: work.unwrap_or(current.work_minutes),
                break_minutes: break_minutes.unwrap_or(current.break_minutes),
                long_break_minutes: long_break.unwrap_or(current.long_break_minutes),
                notifications_enabled: notifications.unwrap_or(current.notifications_enabled),
                hide_title_in_chrome: hide_title.unwrap_or(current.hide_title_in_chrome),
            };
            controller.apply_settings(updated)?;
            println!("{}", serde_json::to_string_pretty(controller.settings())?);
        }
        SettingsAction::Reset => {
            let mut controller = TimerController::new(db, SilentNotifier);
            controller.apply_settings(TimerSettings::default())?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
