use chrono::{Local, Utc};
use clap::Subcommand;
use pomopanda_core::storage::Database;
use pomopanda_core::{HistoryStats, HistoryStore, SessionRecord};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List completed work sessions, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Only show the most recent N sessions
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Totals and the 7-day daily average
    Stats,
    /// Delete every recorded session
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        HistoryAction::List { json, limit } => {
            let shown = newest_first(db.load_all()?, limit);

            if json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else if shown.is_empty() {
                println!("No sessions recorded.");
            } else {
                for record in &shown {
                    println!(
                        "{}  {:>3} min  {}",
                        record.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                        record.duration_minutes,
                        record.task_label
                    );
                }
            }
        }
        HistoryAction::Stats => {
            let records = db.load_all()?;
            let stats = HistoryStats::compute(&records, Utc::now());
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        HistoryAction::Clear { yes } => {
            if !yes {
                return Err("refusing to clear history without --yes".into());
            }
            db.clear_all()?;
            println!("history cleared");
        }
    }
    Ok(())
}

/// Reverse the log and keep at most `limit` records.
fn newest_first(mut records: Vec<SessionRecord>, limit: Option<usize>) -> Vec<SessionRecord> {
    records.reverse();
    if let Some(n) = limit {
        records.truncate(n);
    }
    records
}
