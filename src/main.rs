// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Playlist Editor TUI.
//!
//! A terminal-based editor for the `.m3u` playlists in a music collection.
//!
//! The left pane lists the playlists found in the configured music
//! directories; selecting one shows its tracks in the right pane, where they
//! can be sorted, removed and added to. Every change is written straight back
//! to the playlist file.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle and UI rendering.
//! * A **Background Worker** handles scanning, tag reading and playlist file
//!   access via command processing.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Usage
//!
//! ```text
//! songlist [MUSIC_DIR]...
//! ```
//!
//! Directories given on the command line replace the configured ones for
//! this run; the first time they are given they are also saved as the
//! configured directories.

mod actions;
mod commander;
mod components;
mod config;
mod library;
mod logging;
mod m3u;
mod model;
mod render;
mod rows;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env, io,
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};
use tracing::{info, warn};

use crate::{
    actions::{
        commands::AppCommand,
        events::{AppEvent, Focus, process_events},
    },
    commander::Commander,
    components::{PlaylistList, TrackList},
    config::AppConfig,
    rows::RowKey,
    theme::Theme,
};

/// A one-line message shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Info(String),
    Error(String),
}

/// Application state.
struct App {
    config: AppConfig,
    theme: Theme,
    focus: Focus,

    event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,

    command_tx: Sender<AppCommand>,

    commander: Commander,
    playlist_list: PlaylistList,
    track_list: TrackList,

    /// The playlist whose tracks are in the track list.
    loaded_playlist: Option<RowKey>,
    status: Option<Status>,
}

impl App {
    /// Create a new instance of application state.
    fn new(config: AppConfig, command_tx: Sender<AppCommand>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let playlist_list = PlaylistList::new(config.playlist_row_options(), event_tx.clone());
        let track_list = TrackList::new(config.track_row_options());

        let mut app = Self {
            config,
            theme: Theme::default(),
            focus: Focus::Playlists,
            event_tx,
            event_rx,
            command_tx,
            commander: Commander::new(),
            playlist_list,
            track_list,
            loaded_playlist: None,
            status: None,
        };
        app.set_focus(Focus::Playlists);
        app
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.playlist_list.is_active = focus == Focus::Playlists;
        self.track_list.is_active = focus == Focus::Tracks;
    }

    fn set_status(&mut self, message: String) {
        self.status = Some(Status::Info(message));
    }

    fn set_error(&mut self, message: String) {
        self.status = Some(Status::Error(message));
    }
}

/// The entry point of the application.
///
/// Sets up the communication channels, initializes the application state,
/// manages the terminal lifecycle, and returns an error if any part of the
/// execution fails.
fn main() -> Result<()> {
    let saved = config::load_config();
    let config = saved.clone().with_music_dirs(env::args().skip(1).collect());

    let _log_guard = logging::init_logging(&config)?;
    info!(music_dirs = ?config.music_dirs, "starting");

    if saved.music_dirs.is_empty() && !config.music_dirs.is_empty() {
        if let Err(e) = config::save_config(&config) {
            warn!("Failed to save configuration: {e}");
        }
    }

    let (command_tx, command_rx) = mpsc::channel();

    let mut app = App::new(config, command_tx);

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, command_rx);
    restore_terminal(&mut terminal);

    info!("exiting");

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&hex);
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`]. It is best-effort
/// and does not return a result, as it runs during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A command worker to process [`AppCommand`]s.
/// * An input thread to poll for system keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    command_rx: Receiver<AppCommand>,
) -> Result<()> {
    let command_event_tx = app.event_tx.clone();
    actions::commands::spawn_command_worker(&app.config, command_rx, command_event_tx);

    // Spawn a thread to translate raw key events to application events. Only
    // presses are forwarded, some terminals also report releases.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                if key.kind == KeyEventKind::Press && tx_keys.send(AppEvent::Key(key)).is_err() {
                    break;
                }
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(Duration::from_millis(250));
        }
    });

    // Initial scan to populate the playlist list
    app.command_tx
        .send(AppCommand::ScanPlaylists)
        .context("Command worker is not running")?;

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
