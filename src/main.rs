//! Strictly Hanoi - terminal front-end and session tools.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use strictly_hanoi::{
    Board, DEFAULT_DISKS, FileKv, GameController, HanoiConfig, Route, SessionStore, SystemClock,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

/// Controller over the on-disk session slot.
type DiskController = GameController<FileKv, SystemClock>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = HanoiConfig::load_or_default(&cli.config)?;
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => tui::run_tui(config).await,
        Command::Status => {
            initialize_stderr_tracing(&config);
            print_status(&config)
        }
        Command::Restart => {
            initialize_stderr_tracing(&config);
            restart_session(&config)
        }
    }
}

/// Builds a controller backed by the configured data directory.
#[instrument(skip(config), fields(data_dir = %config.data_dir().display()))]
fn open_controller(config: &HanoiConfig) -> Result<DiskController> {
    let backend = FileKv::open(config.data_dir()).context("Failed to open session store")?;
    Ok(GameController::new(
        SessionStore::new(backend),
        SystemClock,
        DEFAULT_DISKS,
    ))
}

/// Prints the stored record and the view derived from it.
#[instrument(skip(config))]
fn print_status(config: &HanoiConfig) -> Result<()> {
    let controller = open_controller(config)?;

    let Some(record) = controller.store().try_load()? else {
        println!("No session stored.");
        return Ok(());
    };

    println!("{}", serde_json::to_string_pretty(&record)?);

    if let Some(pegs) = record.pegs().clone() {
        match Board::from_ranks(pegs) {
            Ok(board) => println!("{}", board.display()),
            Err(e) => println!("Stored board is invalid: {}", e),
        }
    }

    if let Some(view) = controller.completion_view() {
        println!(
            "Completed in {} moves (minimum {}), time {}",
            view.moves(),
            view.minimum_moves(),
            view.duration_label()
        );
    } else {
        let elapsed = record.elapsed_ms(chrono::Utc::now().timestamp_millis());
        println!(
            "In progress: {} moves, elapsed {}",
            record.moves(),
            strictly_hanoi::format_hms(elapsed)
        );
    }
    Ok(())
}

/// Overwrites the stored session with a fresh playing record.
#[instrument(skip(config))]
fn restart_session(config: &HanoiConfig) -> Result<()> {
    let mut controller = open_controller(config)?;

    if controller.start() == Route::Completed {
        info!("Discarding completed session");
    }
    controller.request_restart();
    controller.confirm_restart();

    println!("Session restarted.");
    Ok(())
}

/// Logs to stderr for the one-shot subcommands.
#[instrument(skip(config))]
fn initialize_stderr_tracing(config: &HanoiConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
