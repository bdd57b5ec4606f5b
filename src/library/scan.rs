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

//! Playlist and audio file discovery.
//!
//! This module walks the configured music directories with `WalkDir`,
//! collecting playlist files for the playlist list and audio files when a
//! whole directory is added to a playlist.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{m3u, model::PlaylistLocation};

const AUDIO_EXTENSIONS: [&str; 8] = ["mp3", "flac", "ogg", "opus", "m4a", "aac", "wav", "wma"];

/// Finds every playlist beneath the given music directories.
///
/// Directories that do not exist are skipped. A depth of 1 lists only the
/// files directly inside each directory. The result is sorted by path, so
/// playlists keep a stable order between scans.
pub(crate) fn scan_playlists<P: AsRef<Path>>(music_dirs: &[P], max_depth: usize) -> Vec<PlaylistLocation> {
    let mut playlists: Vec<PlaylistLocation> = music_dirs
        .iter()
        .map(AsRef::<Path>::as_ref)
        .filter(|dir| {
            let exists = dir.is_dir();
            if !exists {
                debug!(dir = %dir.display(), "music directory missing, skipped");
            }
            exists
        })
        .flat_map(|dir| {
            WalkDir::new(dir)
                .min_depth(1)
                .max_depth(max_depth.max(1))
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        warn!("Skipping unreadable entry: {e}");
                        None
                    }
                })
                .filter(|entry| entry.file_type().is_file() && m3u::is_playlist(entry.path()))
                .map(|entry| PlaylistLocation::new(entry.into_path()))
        })
        .collect();

    playlists.sort_by(|a, b| a.list_path.cmp(&b.list_path));
    playlists.dedup();

    debug!(count = playlists.len(), "playlists scanned");

    playlists
}

pub(crate) fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| AUDIO_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}

/// Expands the given paths into audio files.
///
/// Files are kept in the order given; directories contribute the audio files
/// beneath them, sorted by path.
pub(crate) fn expand_audio_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = vec![];

    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && is_audio_file(e.path()))
                .map(|e| e.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }

    files
}
