use std::io::BufRead;
use std::time::Duration;

use clap::Args;
use pomopanda_core::storage::Database;
use pomopanda_core::timer::{drive, Command};
use pomopanda_core::{AppConfig, Notifier, Phase, TimerController};
use tokio::sync::mpsc;
use tracing::debug;

use crate::notifier::DesktopNotifier;
use crate::render::Terminal;

const USAGE: &str = "commands: s(tart) p(ause) <enter>=toggle r(eset) t(ask) <label> \
                     work|break|long <minutes> q(uit)";

#[derive(Args)]
pub struct RunArgs {
    /// Label recorded with completed work sessions
    #[arg(long)]
    task: Option<String>,
    /// Load the timer without starting the countdown
    #[arg(long)]
    paused: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let db = Database::open()?;
    let notifier = DesktopNotifier::new(&config.notifications);
    let mut controller =
        TimerController::new(db, notifier).with_auto_advance(config.timer.auto_advance);
    if let Some(label) = args.task {
        controller.set_current_task(label);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let tick_every = Duration::from_millis(config.timer.tick_interval_ms);
    let mut terminal = Terminal::new(std::io::stdout(), controller.settings().clone());

    eprintln!("{USAGE}");
    runtime.block_on(session(&mut controller, &mut terminal, !args.paused, tick_every))?;
    terminal.finish()?;
    Ok(())
}

async fn session<N: Notifier>(
    controller: &mut TimerController<Database, N>,
    terminal: &mut Terminal<std::io::Stdout>,
    start: bool,
    tick_every: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let (commands, rx) = mpsc::channel(32);
    let (events, mut erx) = mpsc::unbounded_channel();

    if start {
        commands.send(Command::Start).await?;
    }
    spawn_stdin_reader(commands.clone());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = commands.send(Command::Quit).await;
        }
    });

    let render = async {
        while let Some(event) = erx.recv().await {
            terminal.render(&event)?;
        }
        Ok::<_, std::io::Error>(())
    };
    let ((), rendered) = tokio::join!(drive(controller, rx, events, tick_every), render);
    rendered?;
    Ok(())
}

/// Stdin is read on its own thread; a blocked read must not hold up the
/// runtime on exit.
fn spawn_stdin_reader(commands: mpsc::Sender<Command>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match parse_line(&line) {
                Ok(command) => {
                    if commands.blocking_send(command).is_err() {
                        return;
                    }
                }
                Err(message) => eprintln!("\n{message}\n{USAGE}"),
            }
        }
        debug!("stdin closed");
        let _ = commands.blocking_send(Command::Quit);
    });
}

/// Map one line of interactive input to a driver command.
fn parse_line(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "" => Command::Toggle,
        "s" | "start" => Command::Start,
        "p" | "pause" => Command::Pause,
        "r" | "reset" => Command::Reset,
        "q" | "quit" => Command::Quit,
        "t" | "task" => Command::SetTask(rest.to_string()),
        "work" | "break" | "long" => {
            let phase = match word {
                "work" => Phase::Work,
                "break" => Phase::ShortBreak,
                _ => Phase::LongBreak,
            };
            let minutes = rest
                .parse::<u32>()
                .map_err(|_| format!("expected minutes after '{word}', got '{rest}'"))?;
            Command::SetDuration { phase, minutes }
        }
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(command)
}
