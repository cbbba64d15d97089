//! Append-only log of completed work sessions.
//!
//! The whole log is one JSON array under [`HISTORY_KEY`]. Appending reads the
//! array, pushes the record and writes the array back; records are never
//! edited or removed one by one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::KeyValueStore;
use crate::error::StorageError;

/// Key of the history document.
pub const HISTORY_KEY: &str = "pomodoroHistory";

/// Label recorded when no task was set.
pub const UNNAMED_TASK: &str = "Unnamed task";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "timestampISO8601", alias = "date")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "durationMinutes", alias = "duration")]
    pub duration_minutes: u32,
    #[serde(rename = "taskLabel", alias = "task", default = "unnamed_task")]
    pub task_label: String,
}

fn unnamed_task() -> String {
    UNNAMED_TASK.to_string()
}

impl SessionRecord {
    /// Build a record, substituting [`UNNAMED_TASK`] for a blank label.
    pub fn new(timestamp: DateTime<Utc>, duration_minutes: u32, task_label: &str) -> Self {
        let task_label = task_label.trim();
        Self {
            timestamp,
            duration_minutes,
            task_label: if task_label.is_empty() {
                UNNAMED_TASK.to_string()
            } else {
                task_label.to_string()
            },
        }
    }
}

pub trait HistoryStore {
    /// Append one record at the end of the log.
    ///
    /// # Errors
    /// Returns an error if the log cannot be read or written. Nothing is
    /// written when the read fails, so an unreadable log is never clobbered.
    fn append(&self, record: &SessionRecord) -> Result<(), StorageError>;

    /// Every record in insertion order. Absent or malformed logs are empty.
    ///
    /// # Errors
    /// Returns an error only if the backend itself fails.
    fn load_all(&self) -> Result<Vec<SessionRecord>, StorageError>;

    /// Drop every record.
    ///
    /// # Errors
    /// Returns an error if the empty log cannot be written.
    fn clear_all(&self) -> Result<(), StorageError>;
}

impl<K: KeyValueStore + ?Sized> HistoryStore for K {
    fn append(&self, record: &SessionRecord) -> Result<(), StorageError> {
        // Entries are carried over as raw JSON so ones this version cannot
        // read survive the rewrite.
        let mut entries = match self.kv_get(HISTORY_KEY)? {
            Some(raw) => match serde_json::from_str::<serde_json::Value>(&raw) {
                Ok(serde_json::Value::Array(entries)) => entries,
                _ => {
                    if !raw.trim().is_empty() {
                        warn!("history document is not an array, starting a new log");
                    }
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        entries.push(serde_json::to_value(record).map_err(encode_error)?);
        let json = serde_json::to_string(&entries).map_err(encode_error)?;
        self.kv_set(HISTORY_KEY, &json)
    }

    fn load_all(&self) -> Result<Vec<SessionRecord>, StorageError> {
        Ok(self
            .kv_get(HISTORY_KEY)?
            .map(|raw| parse_records(&raw))
            .unwrap_or_default())
    }

    fn clear_all(&self) -> Result<(), StorageError> {
        write_records(self, &[])
    }
}

fn write_records<K: KeyValueStore + ?Sized>(
    store: &K,
    records: &[SessionRecord],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(records).map_err(encode_error)?;
    store.kv_set(HISTORY_KEY, &json)
}

fn encode_error(e: serde_json::Error) -> StorageError {
    StorageError::Encode {
        key: HISTORY_KEY.to_string(),
        message: e.to_string(),
    }
}

/// Lenient parse: a non-array document is empty, bad entries are skipped.
fn parse_records(raw: &str) -> Vec<SessionRecord> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    let entries = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(entries)) => entries,
        Ok(_) => {
            warn!("history document is not an array, treating as empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "malformed history document, treating as empty");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed history entry");
                None
            }
        })
        .collect()
}
