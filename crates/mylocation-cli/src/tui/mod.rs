//! Interactive location screen.
//!
//! This module ties together the screen state, input mapping, rendering and
//! the background worker. It handles:
//!
//! - Terminal setup and restoration
//! - Channel creation for worker communication
//! - The main event loop with input handling and rendering
//! - Graceful shutdown coordination

pub mod app;
pub mod errors;
pub mod input;
pub mod ui;
pub mod worker;

pub use app::App;
pub use worker::LocationWorker;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    ExecutableCommand,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::info;

use mylocation_core::{Command, LocationProvider, PositionOptions, ScreenEvent};
use mylocation_store::{LocationStore, PreferenceStore};

/// Everything the screen needs to start.
pub struct TuiOptions {
    pub db_path: PathBuf,
    pub prefs_path: PathBuf,
    pub provider: Arc<dyn LocationProvider>,
    pub position: PositionOptions,
}

/// Set up the terminal for TUI rendering.
///
/// Enables raw mode, mouse capture, and switches to the alternate screen buffer.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
///
/// Disables mouse capture, raw mode and returns to the main screen buffer.
pub fn restore_terminal() -> Result<()> {
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run the location screen until the user quits.
///
/// 1. Opens the database and preference store
/// 2. Spawns the background worker
/// 3. Asks it to mount (schema, list, theme)
/// 4. Runs the main event loop
/// 5. Shuts the worker down
pub async fn run(options: TuiOptions) -> Result<()> {
    let store = LocationStore::open(&options.db_path).with_context(|| {
        format!(
            "Failed to open location database {}",
            options.db_path.display()
        )
    })?;
    let prefs = PreferenceStore::open(&options.prefs_path);
    info!(
        db = %options.db_path.display(),
        prefs = %options.prefs_path.display(),
        "Starting location screen"
    );

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(32);
    let (event_tx, mut event_rx) = mpsc::channel::<ScreenEvent>(32);

    let mut app = App::new(options.provider.name());
    let worker = LocationWorker::new(cmd_rx, event_tx, store, prefs, options.provider)
        .with_position_options(options.position);
    let worker_handle = tokio::spawn(worker.run());

    let mut terminal = setup_terminal()?;

    let _ = cmd_tx.try_send(Command::Mount);

    let result = run_event_loop(&mut terminal, &mut app, &cmd_tx, &mut event_rx).await;

    let _ = cmd_tx.try_send(Command::Shutdown);

    restore_terminal()?;

    let _ = worker_handle.await;

    result
}

/// Main event loop for the TUI.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    command_tx: &mpsc::Sender<Command>,
    event_rx: &mut mpsc::Receiver<ScreenEvent>,
) -> Result<()> {
    while !app.should_quit() {
        app.tick_spinner();
        app.clean_expired_messages();

        terminal.draw(|f| ui::draw(f, app))?;

        // Poll for keyboard and mouse events with timeout
        if event::poll(Duration::from_millis(100))? {
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(
                    key.code,
                    app.alert.is_some(),
                    app.pending_confirmation.is_some(),
                ),
                Event::Mouse(mouse_event) => input::handle_mouse(mouse_event),
                _ => input::Action::None,
            };
            if let Some(cmd) = input::apply_action(app, action) {
                let _ = command_tx.try_send(cmd);
            }
        }

        // Non-blocking receive of worker events
        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }
    }

    Ok(())
}
