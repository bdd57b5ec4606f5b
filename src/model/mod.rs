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

//! Domain models and core data structures.
//!
//! This module defines the entities the editor works with: where a playlist
//! file lives, and the tag information shown for each of its tracks.

use std::{
    cmp::Ordering,
    path::{Path, PathBuf},
};

/// A playlist file and the directory its entries are relative to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlaylistLocation {
    pub(crate) list_path: PathBuf,
    pub(crate) base_path: PathBuf,
}

impl PlaylistLocation {
    pub(crate) fn new(list_path: PathBuf) -> Self {
        let base_path = list_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Self { list_path, base_path }
    }

    /// The playlist's file stem, as shown in the list.
    pub(crate) fn name(&self) -> String {
        self.list_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.list_path.display().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TrackInfo {
    /// Position of the track in the playlist file when it was loaded.
    pub(crate) index: usize,
    pub(crate) title: String,
    pub(crate) artist: Option<String>,
    pub(crate) album: Option<String>,
    /// Duration in whole seconds.
    pub(crate) duration: u64,
    pub(crate) path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrackColumn {
    Index,
    Title,
    Artist,
    Album,
    Duration,
}

impl TrackColumn {
    pub(crate) const ALL: [TrackColumn; 5] = [
        TrackColumn::Index,
        TrackColumn::Title,
        TrackColumn::Artist,
        TrackColumn::Album,
        TrackColumn::Duration,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            TrackColumn::Index => "#",
            TrackColumn::Title => "Title",
            TrackColumn::Artist => "Artist",
            TrackColumn::Album => "Album",
            TrackColumn::Duration => "Time",
        }
    }

    pub(crate) fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "index" | "#" => Some(TrackColumn::Index),
            "title" => Some(TrackColumn::Title),
            "artist" => Some(TrackColumn::Artist),
            "album" => Some(TrackColumn::Album),
            "duration" | "time" => Some(TrackColumn::Duration),
            _ => None,
        }
    }

    pub(crate) fn compare(self, a: &TrackInfo, b: &TrackInfo) -> Ordering {
        match self {
            TrackColumn::Index => a.index.cmp(&b.index),
            TrackColumn::Title => a.title.cmp(&b.title),
            TrackColumn::Artist => a.artist.cmp(&b.artist),
            TrackColumn::Album => a.album.cmp(&b.album),
            TrackColumn::Duration => a.duration.cmp(&b.duration),
        }
    }
}
