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

//! Application event distribution and orchestration.
//!
//! This module defines the central event-handling logic for the application,
//! bridging user input, the selection callbacks of the row collections and
//! results posted back by the command worker.
//!
//! # Architecture
//!
//! 1. **Capture**: Events are received via the [`AppEvent`] enum through a
//!    channel.
//! 2. **Process**: [`handle_event`] updates the [`App`] state and sends
//!    commands to the worker.
//! 3. **Render**: After each event is processed, the UI is re-drawn using the
//!    `ratatui` terminal.
//!
//! Selection callbacks only post events, so a callback never reaches into
//! another component while the collection that fired it is borrowed.

use std::{
    ffi::OsStr,
    io::Stdout,
    path::{Path, PathBuf},
};

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};
use tracing::{debug, error};

use crate::{
    App,
    actions::commands::AppCommand,
    commander::{Command, CommanderEvent},
    components::{PlaylistListAction, TrackListAction, TrackSort},
    m3u,
    model::{PlaylistLocation, TrackInfo},
    render::draw,
    rows::RowKey,
};

/// Which list receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Playlists,
    Tracks,
}

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Tick,

    PlaylistsScanned(Vec<PlaylistLocation>),
    PlaylistSelected(RowKey, PlaylistLocation),
    PlaylistDeselected(RowKey),
    PlaylistLoaded {
        key: RowKey,
        list_path: PathBuf,
        tracks: Vec<TrackInfo>,
    },
    PlaylistCreated(PlaylistLocation),
    PlaylistDeleted {
        key: RowKey,
        list_path: PathBuf,
    },
    PlaylistSaved(PathBuf),

    TracksRead {
        key: RowKey,
        list_path: PathBuf,
        tracks: Vec<TrackInfo>,
    },

    Error(String),

    ExitApplication,
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        handle_event(app, event)?;

        // Render after every event processed
        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

pub(crate) fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,

        AppEvent::Tick | AppEvent::ExitApplication => {}

        AppEvent::PlaylistsScanned(playlists) => {
            app.loaded_playlist = None;
            app.track_list.clear();

            let count = playlists.len();
            app.playlist_list.set_playlists(playlists);
            app.set_status(format!("{count} playlists found"));
        }

        AppEvent::PlaylistSelected(key, location) => {
            // The selection may have moved on since this was posted
            if app.playlist_list.is_selected(key) {
                app.loaded_playlist = None;
                app.track_list.clear();
                app.command_tx.send(AppCommand::LoadPlaylist { key, location })?;
            }
        }

        AppEvent::PlaylistDeselected(key) => {
            if app.loaded_playlist == Some(key) {
                app.loaded_playlist = None;
                app.track_list.clear();
            }
        }

        AppEvent::PlaylistLoaded { key, list_path, tracks } => {
            if is_current(app, key, &list_path) {
                app.track_list.set_tracks(tracks);
                app.loaded_playlist = Some(key);
            } else {
                debug!(%key, "discarding tracks of a playlist no longer selected");
            }
        }

        AppEvent::PlaylistCreated(location) => {
            let name = location.name();
            app.playlist_list.add_playlist(location);
            app.set_status(format!("Created {name}"));
        }

        AppEvent::PlaylistDeleted { key, list_path } => {
            let Some(key) = app.playlist_list.locate(key, &list_path) else {
                debug!(playlist = %list_path.display(), "deleted playlist is no longer listed");
                return Ok(());
            };

            if app.loaded_playlist == Some(key) {
                app.loaded_playlist = None;
                app.track_list.clear();
            }
            app.playlist_list.remove_playlist(key);
            app.set_status(format!("Deleted {}", list_path.display()));
        }

        AppEvent::PlaylistSaved(list_path) => {
            debug!(playlist = %list_path.display(), "saved");
        }

        AppEvent::TracksRead { key, list_path, tracks } => {
            if is_current(app, key, &list_path) && app.loaded_playlist == Some(key) {
                let count = tracks.len();
                app.track_list.append_tracks(tracks);
                save_tracks(app)?;
                app.set_status(format!("Added {count} tracks"));
            } else {
                debug!(%key, "discarding tracks read for a playlist no longer selected");
            }
        }

        AppEvent::Error(message) => {
            error!("{message}");
            app.set_error(message);
        }
    }

    Ok(())
}

fn is_current(app: &App, key: RowKey, list_path: &Path) -> bool {
    app.playlist_list
        .selected()
        .is_some_and(|(selected, location)| selected == key && location.list_path == list_path)
}

/// Routes a key press to the command line, then global keys, then the
/// focused list.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let event = Event::Key(key);

    match app.commander.handle_event(&event) {
        CommanderEvent::Ignored => {}
        CommanderEvent::Handled => return Ok(()),
        CommanderEvent::Submitted(Ok(command)) => return run_command(app, command),
        CommanderEvent::Submitted(Err(e)) => {
            app.set_error(e.to_string());
            return Ok(());
        }
    }

    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Tab | KeyCode::BackTab => {
            let focus = match app.focus {
                Focus::Playlists => Focus::Tracks,
                Focus::Tracks => Focus::Playlists,
            };
            app.set_focus(focus);
        }

        _ => match app.focus {
            Focus::Playlists => {
                if let Some(PlaylistListAction::DeleteSelected) = app.playlist_list.process_event(&event) {
                    delete_selected_playlist(app)?;
                }
            }
            Focus::Tracks => {
                if let Some(TrackListAction::Removed(path)) = app.track_list.process_event(&event) {
                    debug!(track = %path.display(), "track removed");
                    save_tracks(app)?;
                }
            }
        },
    }

    Ok(())
}

fn run_command(app: &mut App, command: Command) -> Result<()> {
    debug!(?command, "running command");

    match command {
        Command::Quit => app.event_tx.send(AppEvent::ExitApplication)?,

        Command::Rescan => app.command_tx.send(AppCommand::ScanPlaylists)?,

        Command::NewPlaylist(name) => {
            if Path::new(&name).file_name() != Some(OsStr::new(&name)) {
                app.set_error(format!("Invalid playlist name: {name}"));
                return Ok(());
            }

            let dir = app
                .playlist_list
                .selected()
                .map(|(_, location)| location.base_path.clone())
                .or_else(|| app.config.music_dir_paths().into_iter().next());
            let Some(dir) = dir else {
                app.set_error("No music directory configured".to_string());
                return Ok(());
            };

            let file_name = if m3u::is_playlist(Path::new(&name)) {
                name
            } else {
                format!("{name}.{}", m3u::M3U_EXTENSION)
            };
            app.command_tx.send(AppCommand::CreatePlaylist(dir.join(file_name)))?;
        }

        Command::DeletePlaylist => delete_selected_playlist(app)?,

        Command::AddTracks(paths) => {
            let selected = app
                .playlist_list
                .selected()
                .map(|(key, location)| (key, location.clone()));
            let Some((key, location)) = selected else {
                app.set_error("No playlist selected".to_string());
                return Ok(());
            };
            if app.loaded_playlist != Some(key) {
                app.set_error("Playlist is still loading".to_string());
                return Ok(());
            }

            app.command_tx.send(AppCommand::ReadTracks {
                key,
                location,
                paths,
                first_index: app.track_list.next_index(),
            })?;
        }

        Command::Sort { column, descending } => {
            app.track_list.sort_with(TrackSort { column, descending });
        }
    }

    Ok(())
}

fn delete_selected_playlist(app: &mut App) -> Result<()> {
    let Some((key, location)) = app.playlist_list.selected() else {
        app.set_error("No playlist selected".to_string());
        return Ok(());
    };

    app.command_tx.send(AppCommand::DeletePlaylist {
        key,
        location: location.clone(),
    })?;

    Ok(())
}

/// Asks the worker to write the track list, in its current order, back to
/// the loaded playlist.
fn save_tracks(app: &mut App) -> Result<()> {
    let Some((key, location)) = app.playlist_list.selected() else {
        return Ok(());
    };
    if app.loaded_playlist != Some(key) {
        return Ok(());
    }

    app.command_tx.send(AppCommand::SavePlaylist {
        location: location.clone(),
        tracks: app.track_list.paths(),
    })?;

    Ok(())
}
