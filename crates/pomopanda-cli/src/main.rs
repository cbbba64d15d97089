use clap::{Parser, Subcommand};
use pomopanda_core::AppConfig;
use tracing_subscriber::EnvFilter;

mod commands;
mod notifier;
mod render;

#[derive(Parser)]
#[command(name = "pomopanda", version, about = "Pomodoro timer in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive countdown
    Run(commands::run::RunArgs),
    /// Timer durations and notification preferences
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Completed work sessions
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Application configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// `RUST_LOG` wins; otherwise the filter from the application config.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let config = AppConfig::load_or_default();
        EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("warn"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::History { action } => commands::history::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
