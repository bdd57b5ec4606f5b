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

//! Track metadata extraction using `Lofty`.

use std::path::{Path, PathBuf};

use lofty::prelude::*;
use lofty::probe::Probe;
use tracing::warn;

use crate::model::TrackInfo;

/// Reads the tags of a single track.
///
/// A track whose tags cannot be read is still returned, titled after its
/// file name, so it stays part of the playlist.
pub(crate) fn read_track(index: usize, path: &Path) -> TrackInfo {
    let tagged_file = match Probe::open(path).and_then(|p| p.read()) {
        Ok(file) => file,
        Err(e) => {
            warn!("Unreadable tags for {}: {e}", path.display());
            return TrackInfo {
                index,
                title: fallback_title(path),
                artist: None,
                album: None,
                duration: 0,
                path: path.to_path_buf(),
            };
        }
    };

    let duration = tagged_file.properties().duration().as_secs();
    let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());

    let title = tag
        .and_then(|t| t.title())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| fallback_title(path));

    TrackInfo {
        index,
        title,
        artist: tag.and_then(|t| t.artist()).map(|a| a.to_string()),
        album: tag.and_then(|t| t.album()).map(|a| a.to_string()),
        duration,
        path: path.to_path_buf(),
    }
}

/// Reads the tags of every track, numbering them from `first_index`.
pub(crate) fn read_tracks(first_index: usize, paths: &[PathBuf]) -> Vec<TrackInfo> {
    paths
        .iter()
        .enumerate()
        .map(|(offset, path)| read_track(first_index + offset, path))
        .collect()
}

fn fallback_title(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_track_falls_back_to_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Not Really Audio.mp3");
        std::fs::write(&path, b"definitely not an mp3").unwrap();

        let track = read_track(3, &path);

        assert_eq!(track.index, 3);
        assert_eq!(track.title, "Not Really Audio.mp3");
        assert_eq!(track.artist, None);
        assert_eq!(track.duration, 0);
        assert_eq!(track.path, path);
    }

    #[test]
    fn missing_tracks_are_kept_and_numbered() {
        let paths = vec![PathBuf::from("/gone/a.mp3"), PathBuf::from("/gone/b.mp3")];

        let tracks = read_tracks(5, &paths);

        let summary: Vec<(usize, &str)> = tracks.iter().map(|t| (t.index, t.title.as_str())).collect();
        assert_eq!(summary, vec![(5, "a.mp3"), (6, "b.mp3")]);
    }
}
