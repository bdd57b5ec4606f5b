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

//! Asynchronous application command processing.
//!
//! Scanning directories, reading tags and writing playlist files can all
//! block, so they run on a dedicated worker thread. The worker translates
//! [`AppCommand`] requests into file system operations and broadcasts the
//! results back to the application as [`AppEvent`]s.

use std::{
    fs,
    path::PathBuf,
    sync::mpsc::{Receiver, Sender},
    thread,
};

use anyhow::{Context, Result, bail};
use tracing::{debug, info, warn};

use crate::{
    actions::events::AppEvent,
    config::AppConfig,
    library::{scan, tags},
    m3u,
    model::PlaylistLocation,
    rows::RowKey,
};

#[derive(Debug)]
pub(crate) enum AppCommand {
    ScanPlaylists,
    LoadPlaylist {
        key: RowKey,
        location: PlaylistLocation,
    },
    CreatePlaylist(PathBuf),
    DeletePlaylist {
        key: RowKey,
        location: PlaylistLocation,
    },
    /// Read the tags of files about to be added to a playlist.
    ReadTracks {
        key: RowKey,
        location: PlaylistLocation,
        paths: Vec<PathBuf>,
        first_index: usize,
    },
    SavePlaylist {
        location: PlaylistLocation,
        tracks: Vec<PathBuf>,
    },
}

/// Spawns a background thread to process application commands.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `command_rx` - The receiving end of the command channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_command_worker(
    config: &AppConfig,
    command_rx: Receiver<AppCommand>,
    event_tx: Sender<AppEvent>,
) {
    let config = config.clone();

    thread::spawn(move || {
        while let Ok(request) = command_rx.recv() {
            if let Err(e) = handle_command(&config, request, &event_tx) {
                warn!("Command failed: {e:#}");
                let _ = event_tx.send(AppEvent::Error(format!("{e:#}")));
            }
        }
    });
}

/// Orchestrates the execution of a single command.
///
/// This function implements the logic for each command and sends the result
/// back through the application event channel.
pub(crate) fn handle_command(config: &AppConfig, command: AppCommand, event_tx: &Sender<AppEvent>) -> Result<()> {
    match command {
        AppCommand::ScanPlaylists => {
            let playlists = scan::scan_playlists(&config.music_dir_paths(), config.scan_depth);
            info!(count = playlists.len(), "scanned music directories");
            event_tx.send(AppEvent::PlaylistsScanned(playlists))?;
        }

        AppCommand::LoadPlaylist { key, location } => {
            let paths = m3u::read_playlist(&location.list_path, &location.base_path)?;
            let tracks = tags::read_tracks(0, &paths);
            debug!(%key, tracks = tracks.len(), "playlist loaded");
            event_tx.send(AppEvent::PlaylistLoaded {
                key,
                list_path: location.list_path,
                tracks,
            })?;
        }

        AppCommand::CreatePlaylist(list_path) => {
            if list_path.exists() {
                bail!("Playlist {} already exists", list_path.display());
            }
            m3u::create_playlist(&list_path)?;
            info!(playlist = %list_path.display(), "playlist created");
            event_tx.send(AppEvent::PlaylistCreated(PlaylistLocation::new(list_path)))?;
        }

        AppCommand::DeletePlaylist { key, location } => {
            fs::remove_file(&location.list_path)
                .with_context(|| format!("Failed to delete {}", location.list_path.display()))?;
            info!(playlist = %location.list_path.display(), "playlist deleted");
            event_tx.send(AppEvent::PlaylistDeleted {
                key,
                list_path: location.list_path,
            })?;
        }

        AppCommand::ReadTracks {
            key,
            location,
            paths,
            first_index,
        } => {
            // Relative arguments are taken relative to the playlist
            let paths: Vec<PathBuf> = paths.iter().map(|path| location.base_path.join(path)).collect();

            let (accepted, rejected): (Vec<PathBuf>, Vec<PathBuf>) = scan::expand_audio_paths(&paths)
                .into_iter()
                .filter(|path| {
                    let exists = path.is_file();
                    if !exists {
                        warn!("No such file: {}", path.display());
                    }
                    exists
                })
                .partition(|path| m3u::relative_path(path, &location.base_path).is_ok());

            for path in &rejected {
                warn!(
                    "Not adding {}, it is outside {}",
                    path.display(),
                    location.base_path.display()
                );
            }

            let tracks = tags::read_tracks(first_index, &accepted);
            event_tx.send(AppEvent::TracksRead {
                key,
                list_path: location.list_path.clone(),
                tracks,
            })?;

            if !rejected.is_empty() {
                bail!(
                    "{} file(s) outside {} were not added",
                    rejected.len(),
                    location.base_path.display()
                );
            }
        }

        AppCommand::SavePlaylist { location, tracks } => {
            m3u::write_playlist(&location.list_path, &location.base_path, &tracks)?;
            debug!(playlist = %location.list_path.display(), tracks = tracks.len(), "playlist saved");
            event_tx.send(AppEvent::PlaylistSaved(location.list_path))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{path::Path, sync::mpsc};

    use super::*;

    fn write(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn run(config: &AppConfig, command: AppCommand) -> (Result<()>, Vec<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        let result = handle_command(config, command, &tx);
        (result, rx.try_iter().collect())
    }

    #[test]
    fn scan_reports_playlists_in_music_dirs() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("mix.m3u"), "#EXTM3U\n");
        let config = AppConfig::default().with_music_dirs(vec![dir.path().display().to_string()]);

        let (result, events) = run(&config, AppCommand::ScanPlaylists);

        assert!(result.is_ok());
        match events.as_slice() {
            [AppEvent::PlaylistsScanned(playlists)] => {
                assert_eq!(playlists.len(), 1);
                assert_eq!(playlists[0].name(), "mix");
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn load_reads_tracks_in_playlist_order() {
        let dir = tempfile::tempdir().unwrap();
        let list_path = dir.path().join("mix.m3u");
        write(&dir.path().join("b.mp3"), "");
        write(&dir.path().join("a.mp3"), "");
        write(&list_path, "#EXTM3U\n#EXTINF:,\nb.mp3\n#EXTINF:,\na.mp3\n");

        let key = RowKey::new(3);
        let (result, events) = run(
            &AppConfig::default(),
            AppCommand::LoadPlaylist {
                key,
                location: PlaylistLocation::new(list_path.clone()),
            },
        );

        assert!(result.is_ok());
        match events.as_slice() {
            [AppEvent::PlaylistLoaded { key: loaded, list_path: path, tracks }] => {
                assert_eq!(*loaded, key);
                assert_eq!(path, &list_path);
                let titles: Vec<&str> = tracks.iter().map(|t| t.title.as_str()).collect();
                assert_eq!(titles, vec!["b.mp3", "a.mp3"]);
                assert_eq!(tracks[1].index, 1);
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn load_fails_for_missing_playlist() {
        let dir = tempfile::tempdir().unwrap();

        let (result, events) = run(
            &AppConfig::default(),
            AppCommand::LoadPlaylist {
                key: RowKey::new(0),
                location: PlaylistLocation::new(dir.path().join("gone.m3u")),
            },
        );

        assert!(result.is_err());
        assert!(events.is_empty());
    }

    #[test]
    fn create_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let list_path = dir.path().join("new.m3u");

        let (result, events) = run(&AppConfig::default(), AppCommand::CreatePlaylist(list_path.clone()));
        assert!(result.is_ok());
        assert!(matches!(events.as_slice(), [AppEvent::PlaylistCreated(location)] if location.list_path == list_path));
        assert_eq!(fs::read_to_string(&list_path).unwrap(), "#EXTM3U\n");

        let (result, _) = run(&AppConfig::default(), AppCommand::CreatePlaylist(list_path));
        assert!(result.is_err());
    }

    #[test]
    fn delete_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let list_path = dir.path().join("old.m3u");
        write(&list_path, "#EXTM3U\n");

        let (result, events) = run(
            &AppConfig::default(),
            AppCommand::DeletePlaylist {
                key: RowKey::new(2),
                location: PlaylistLocation::new(list_path.clone()),
            },
        );

        assert!(result.is_ok());
        assert!(matches!(
            events.as_slice(),
            [AppEvent::PlaylistDeleted { key, list_path: path }] if *key == RowKey::new(2) && *path == list_path
        ));
        assert!(!list_path.exists());
    }

    #[test]
    fn read_tracks_rejects_files_outside_the_playlist_directory() {
        let music = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        write(&music.path().join("album").join("one.mp3"), "");
        write(&music.path().join("album").join("cover.jpg"), "");
        write(&elsewhere.path().join("stray.mp3"), "");

        let (result, events) = run(
            &AppConfig::default(),
            AppCommand::ReadTracks {
                key: RowKey::new(0),
                location: PlaylistLocation::new(music.path().join("mix.m3u")),
                paths: vec![PathBuf::from("album"), elsewhere.path().join("stray.mp3")],
                first_index: 5,
            },
        );

        assert!(result.is_err());
        match events.as_slice() {
            [AppEvent::TracksRead { tracks, .. }] => {
                assert_eq!(tracks.len(), 1);
                assert_eq!(tracks[0].index, 5);
                assert_eq!(tracks[0].path, music.path().join("album").join("one.mp3"));
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn save_writes_relative_entries() {
        let dir = tempfile::tempdir().unwrap();
        let list_path = dir.path().join("mix.m3u");

        let (result, events) = run(
            &AppConfig::default(),
            AppCommand::SavePlaylist {
                location: PlaylistLocation::new(list_path.clone()),
                tracks: vec![dir.path().join("x").join("song.mp3")],
            },
        );

        assert!(result.is_ok());
        assert!(matches!(events.as_slice(), [AppEvent::PlaylistSaved(path)] if *path == list_path));

        let expected = format!("#EXTM3U\n#EXTINF:,\n{}\n", Path::new("x").join("song.mp3").display());
        assert_eq!(fs::read_to_string(&list_path).unwrap(), expected);
    }
}
