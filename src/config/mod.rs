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

//! Application configuration.
//!
//! This module manages the application configuration file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::rows::RowOptions;

pub(crate) const CONFIG_NAME: &str = "songlist";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,
    /// Directories scanned for playlists.
    pub(crate) music_dirs: Vec<String>,
    /// How deep to look for playlists; 1 means directly inside a music dir.
    pub(crate) scan_depth: usize,
    /// Blank lines between playlists in the playlist list.
    pub(crate) row_spacing: u16,
    /// Deselect the current row before a list is cleared.
    pub(crate) clear_resets_selection: bool,
    /// Default log filter, overridden by `RUST_LOG`.
    pub(crate) log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            music_dirs: vec![],
            scan_depth: 1,
            row_spacing: 1,
            clear_resets_selection: false,
            log_level: "info".into(),
        }
    }
}

impl AppConfig {
    /// Replaces the configured music directories for this run only.
    pub(crate) fn with_music_dirs(mut self, dirs: Vec<String>) -> Self {
        if !dirs.is_empty() {
            self.music_dirs = dirs;
        }
        self
    }

    pub(crate) fn music_dir_paths(&self) -> Vec<PathBuf> {
        self.music_dirs.iter().map(PathBuf::from).collect()
    }

    pub(crate) fn playlist_row_options(&self) -> RowOptions {
        RowOptions {
            row_spacing: self.row_spacing,
            base_offset: 0,
            clear_resets_selection: self.clear_resets_selection,
        }
    }

    /// Tracks are packed one per line.
    pub(crate) fn track_row_options(&self) -> RowOptions {
        RowOptions {
            row_spacing: 0,
            base_offset: 0,
            clear_resets_selection: self.clear_resets_selection,
        }
    }
}

pub(crate) fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

pub(crate) fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}

/// Directory holding the configuration file, also used for the log file.
pub(crate) fn config_dir() -> Option<PathBuf> {
    confy::get_configuration_file_path(CONFIG_NAME, None)
        .ok()
        .and_then(|path| path.parent().map(PathBuf::from))
}
