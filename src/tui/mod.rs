//! Terminal UI for Strictly Hanoi

mod app;
mod input;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use strictly_hanoi::{
    DEFAULT_DISKS, FileKv, GameController, HanoiConfig, SessionStore, SystemClock, TimerEvent,
};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{error, info, instrument};

use app::App;

/// How long to wait for terminal input before servicing timers.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Run the terminal UI against the configured session store.
pub async fn run_tui(config: HanoiConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_filter())),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(data_dir = %config.data_dir().display(), "Starting Strictly Hanoi TUI");

    let backend = FileKv::open(config.data_dir()).context("Failed to open session store")?;
    let controller = GameController::new(SessionStore::new(backend), SystemClock, DEFAULT_DISKS);

    let (timer_tx, timer_rx) = mpsc::unbounded_channel();
    let app = App::new(controller, timer_tx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, timer_rx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "TUI loop error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Draws, services timer events, then waits briefly for input.
#[instrument(skip_all)]
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App<FileKv, SystemClock>,
    mut timer_rx: UnboundedReceiver<TimerEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        while let Ok(event) = timer_rx.try_recv() {
            app.handle_timer(event);
        }

        let polled = tokio::task::block_in_place(|| event::poll(INPUT_POLL))?;
        if polled {
            let size = terminal.size()?;
            let columns = ui::peg_columns(Rect::new(0, 0, size.width, size.height));
            let action = match event::read()? {
                Event::Key(key) => input::key_action(app.route(), app.restart_pending(), key),
                Event::Mouse(mouse) => input::mouse_action(app.route(), mouse, &columns),
                _ => None,
            };
            if let Some(action) = action {
                app.handle_action(action);
            }
        } else {
            tokio::task::yield_now().await;
        }

        if app.should_quit() {
            info!("Leaving TUI");
            return Ok(());
        }
    }
}
