//! Terminal dashboard.
//!
//! The UI loop owns all view state ([`App`]) and is the only place it is
//! mutated. Requests run on a [`DashboardWorker`]; results come back over a
//! channel and are applied between frames.
//!
//! - Terminal setup and restoration
//! - Channel creation for worker communication
//! - The event loop with input handling and rendering
//! - Shutdown coordination

pub mod app;
pub mod input;
pub mod ui;
pub mod worker;

pub use app::{App, Theme};
pub use worker::DashboardWorker;

use std::fs::{self, OpenOptions};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use envdash_core::{Command, DashboardEvent, DeviceClient, Tab};

/// Set up the terminal for TUI rendering.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Where the dashboard writes its log.
pub fn log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("envdash")
        .join("dashboard.log")
}

/// Send tracing output to the log file so it does not corrupt the screen.
///
/// `RUST_LOG` is honoured; `verbose` raises the default level to debug.
pub fn init_file_logging(verbose: bool) -> Result<PathBuf> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // A subscriber may already be installed (e.g. by an embedding binary)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    Ok(path)
}

/// Run the dashboard against the device at `url`.
///
/// 1. Creates the command and event channels
/// 2. Spawns the background worker
/// 3. Issues the startup requests (status, then the start tab)
/// 4. Runs the event loop until the user quits
/// 5. Shuts the worker down and waits for it
pub async fn run(url: &str, timeout: Duration, tab: Tab, theme: Theme) -> Result<()> {
    let client = DeviceClient::with_timeout(url, timeout)
        .with_context(|| format!("Cannot use device URL '{}'", url))?;
    info!("Starting dashboard for {}", client.base_url());

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(32);
    let (event_tx, mut event_rx) = mpsc::channel::<DashboardEvent>(32);

    let worker = DashboardWorker::new(Arc::new(client), cmd_rx, event_tx);
    let worker_handle = tokio::spawn(worker.run());

    let mut app = App::new(tab, url, theme);
    for request in app.startup() {
        send_command(&mut app, &cmd_tx, Command::Fetch(request));
    }

    let mut terminal = setup_terminal()?;

    let result = run_event_loop(&mut terminal, &mut app, &cmd_tx, &mut event_rx);

    // A full queue drops the shutdown; closing the channel stops the worker too
    let _ = cmd_tx.try_send(Command::Shutdown);
    drop(cmd_tx);

    restore_terminal()?;

    let _ = worker_handle.await;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    command_tx: &mpsc::Sender<Command>,
    event_rx: &mut mpsc::Receiver<DashboardEvent>,
) -> Result<()> {
    while !app.should_quit() {
        app.tick_spinner();
        app.clean_expired_messages();

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let action = input::handle_key(key.code, app.show_help);
            if let Some(cmd) = input::apply_action(app, action) {
                send_command(app, command_tx, cmd);
            }
        }

        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }
    }

    Ok(())
}

/// Hand `cmd` to the worker.
///
/// A fetch has already marked its resource as loading, so one that cannot
/// be queued is reported as failed instead of being dropped.
fn send_command(app: &mut App, command_tx: &mpsc::Sender<Command>, cmd: Command) {
    let Err(err) = command_tx.try_send(cmd) else {
        return;
    };
    let reason = match &err {
        TrySendError::Full(_) => "request queue is full",
        TrySendError::Closed(_) => "request worker has stopped",
    };
    if let Command::Fetch(request) = err.into_inner() {
        warn!(resource = %request.resource(), "Could not queue fetch: {reason}");
        app.handle_event(DashboardEvent::Failed {
            request,
            error: reason.to_string(),
        });
    }
}
