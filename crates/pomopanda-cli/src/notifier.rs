//! Desktop notification and terminal bell on phase completion.

use std::io::Write;

use notify_rust::Notification;
use pomopanda_core::storage::NotificationsConfig;
use pomopanda_core::{Completion, Notifier, NotifyError, TimerSettings};

const SUMMARY: &str = "Pomodoro Timer";

pub struct DesktopNotifier {
    app_name: String,
    sound: bool,
}

impl DesktopNotifier {
    pub fn new(config: &NotificationsConfig) -> Self {
        Self {
            app_name: config.app_name.clone(),
            sound: config.sound,
        }
    }

    fn ring_bell(&self) -> Result<(), NotifyError> {
        let mut stderr = std::io::stderr();
        stderr
            .write_all(b"\x07")
            .and_then(|()| stderr.flush())
            .map_err(|e| NotifyError::Sound(e.to_string()))
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, completion: &Completion, settings: &TimerSettings) -> Result<(), NotifyError> {
        if self.sound {
            self.ring_bell()?;
        }
        if !settings.notifications_enabled {
            return Ok(());
        }
        Notification::new()
            .summary(SUMMARY)
            .body(completion.message())
            .appname(&self.app_name)
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError::Delivery(e.to_string()))
    }
}
