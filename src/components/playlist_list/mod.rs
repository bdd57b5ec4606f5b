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

//! The list of playlist files found in the music directories.
//!
//! Each playlist is one row of a [`RowCollection`], with its
//! [`PlaylistLocation`] as payload. Selecting a row marks it active and posts
//! [`AppEvent::PlaylistSelected`], which is what makes the event loop load
//! the playlist's tracks; deselecting posts
//! [`AppEvent::PlaylistDeselected`].

mod event;
mod render;

use std::{path::Path, sync::mpsc::Sender};

use tracing::debug;

use crate::{
    actions::events::AppEvent,
    components::Viewport,
    model::PlaylistLocation,
    rows::{RowCollection, RowItem, RowKey, RowOptions},
};

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PlaylistListAction {
    DeleteSelected,
}

pub(crate) struct PlaylistRow {
    name: String,
    directory: String,
    x: u16,
    y: u32,
    active: bool,
}

impl PlaylistRow {
    const HEIGHT: u16 = 2;

    pub(crate) fn new(location: &PlaylistLocation) -> Self {
        Self {
            name: location.name(),
            directory: location.base_path.display().to_string(),
            x: 1,
            y: 0,
            active: false,
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }
}

impl RowItem for PlaylistRow {
    fn preferred_height(&self) -> u16 {
        Self::HEIGHT
    }

    fn horizontal_position(&self) -> u16 {
        self.x
    }

    fn place_at(&mut self, x: u16, y: u32) {
        self.x = x;
        self.y = y;
    }
}

pub(crate) struct PlaylistList {
    pub(crate) rows: RowCollection<PlaylistRow, PlaylistLocation, Viewport>,
    pub(crate) is_active: bool,
}

impl PlaylistList {
    pub(crate) fn new(options: RowOptions, event_tx: Sender<AppEvent>) -> Self {
        let mut rows: RowCollection<PlaylistRow, PlaylistLocation, Viewport> =
            RowCollection::new(Viewport::default(), options);

        let deselect_tx = event_tx.clone();
        rows.set_on_deselect(move |key, entry| {
            if let Some(entry) = entry {
                entry.item.active = false;
            }
            deselect_tx.send(AppEvent::PlaylistDeselected(key)).ok();
        });

        rows.set_on_select(move |key, entry| {
            let Some(entry) = entry else {
                return;
            };

            entry.item.active = true;
            if let Some(location) = entry.payload {
                debug!(%key, playlist = %location.list_path.display(), "playlist selected");
                event_tx.send(AppEvent::PlaylistSelected(key, location.clone())).ok();
            }
        });

        Self {
            rows,
            is_active: true,
        }
    }

    /// Replaces every row with the scanned playlists and selects the first.
    pub(crate) fn set_playlists(&mut self, playlists: Vec<PlaylistLocation>) {
        // Deselect explicitly so the new first row is announced even when it
        // reuses the key of the old selection.
        self.rows.set_selected(None);
        self.rows.clear_rows();

        self.rows.add_rows(
            playlists
                .into_iter()
                .map(|location| (PlaylistRow::new(&location), Some(location))),
        );

        self.rows.select_first_row();
    }

    /// Adds a playlist, or finds the row already showing it, and selects it.
    pub(crate) fn add_playlist(&mut self, location: PlaylistLocation) -> RowKey {
        let key = match self.find(&location.list_path) {
            Some(key) => key,
            None => self
                .rows
                .add_row(PlaylistRow::new(&location), Some(location), true),
        };

        self.rows.set_selected(Some(key));
        key
    }

    /// Removes a playlist. Only removing the selected one moves the
    /// selection, to the first remaining playlist.
    pub(crate) fn remove_playlist(&mut self, key: RowKey) {
        let was_selected = self.is_selected(key);

        self.rows.remove_row(key, true);

        if was_selected {
            self.rows.select_first_row();
        }
    }

    pub(crate) fn selected(&self) -> Option<(RowKey, &PlaylistLocation)> {
        let key = self.rows.selected_key()?;
        self.rows.payload(key).map(|location| (key, location))
    }

    pub(crate) fn is_selected(&self, key: RowKey) -> bool {
        self.rows.selected_key() == Some(key)
    }

    /// The row showing `list_path`, preferring `key` while it still does.
    ///
    /// Keys restart at zero on every rescan, so a key alone may name another
    /// playlist by the time a worker result arrives.
    pub(crate) fn locate(&self, key: RowKey, list_path: &Path) -> Option<RowKey> {
        let still_there = self
            .rows
            .payload(key)
            .is_some_and(|location| location.list_path == list_path);

        if still_there { Some(key) } else { self.find(list_path) }
    }

    pub(crate) fn find(&self, list_path: &Path) -> Option<RowKey> {
        self.rows.sorted_keys().find(|key| {
            self.rows
                .payload(*key)
                .is_some_and(|location| location.list_path == list_path)
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        path::PathBuf,
        sync::mpsc::{self, Receiver},
    };

    use super::*;

    fn location(path: &str) -> PlaylistLocation {
        PlaylistLocation::new(PathBuf::from(path))
    }

    fn list() -> (PlaylistList, Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        (PlaylistList::new(RowOptions::default(), tx), rx)
    }

    fn drain(rx: &Receiver<AppEvent>) -> Vec<String> {
        rx.try_iter()
            .map(|event| match event {
                AppEvent::PlaylistSelected(key, location) => format!("selected {key} {}", location.name()),
                AppEvent::PlaylistDeselected(key) => format!("deselected {key}"),
                other => format!("{other:?}"),
            })
            .collect()
    }

    #[test]
    fn scanning_selects_and_announces_the_first_playlist() {
        let (mut list, rx) = list();

        list.set_playlists(vec![location("/m/a.m3u"), location("/m/b.m3u")]);

        assert_eq!(drain(&rx), vec!["selected 0 a"]);
        assert_eq!(list.len(), 2);
        assert!(list.rows.row(RowKey::new(0)).unwrap().is_active());
        assert!(!list.rows.row(RowKey::new(1)).unwrap().is_active());
    }

    #[test]
    fn rescanning_announces_the_new_first_row_even_with_the_same_key() {
        let (mut list, rx) = list();
        list.set_playlists(vec![location("/m/a.m3u")]);
        drain(&rx);

        list.set_playlists(vec![location("/m/c.m3u"), location("/m/d.m3u")]);

        assert_eq!(drain(&rx), vec!["deselected 0", "selected 0 c"]);
        assert_eq!(list.selected().map(|(_, l)| l.name()), Some("c".to_string()));
    }

    #[test]
    fn rows_are_laid_out_with_spacing() {
        let (mut list, _rx) = list();

        list.set_playlists(vec![location("/m/a.m3u"), location("/m/b.m3u"), location("/m/c.m3u")]);

        let offsets: Vec<u32> = list.rows.rows().map(|(_, row)| row.y).collect();
        assert_eq!(offsets, vec![0, 3, 6]);
        assert_eq!(list.rows.container().content_height(), 9);
    }

    #[test]
    fn removing_the_selected_playlist_selects_the_first_remaining() {
        let (mut list, rx) = list();
        list.set_playlists(vec![location("/m/a.m3u"), location("/m/b.m3u"), location("/m/c.m3u")]);
        list.rows.set_selected(Some(RowKey::new(1)));
        drain(&rx);

        list.remove_playlist(RowKey::new(1));

        assert_eq!(drain(&rx), vec!["deselected 1", "selected 0 a"]);
        assert!(list.find(Path::new("/m/b.m3u")).is_none());
    }

    #[test]
    fn removing_an_unselected_playlist_keeps_the_selection() {
        let (mut list, rx) = list();
        list.set_playlists(vec![location("/m/a.m3u"), location("/m/b.m3u"), location("/m/c.m3u")]);
        list.rows.set_selected(Some(RowKey::new(2)));
        drain(&rx);

        list.remove_playlist(RowKey::new(1));

        assert!(drain(&rx).is_empty());
        assert_eq!(list.rows.selected_key(), Some(RowKey::new(2)));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn locate_falls_back_to_the_path_when_the_key_moved_on() {
        let (mut list, _rx) = list();
        list.set_playlists(vec![location("/m/b.m3u"), location("/m/c.m3u")]);

        assert_eq!(list.locate(RowKey::new(1), Path::new("/m/c.m3u")), Some(RowKey::new(1)));
        assert_eq!(list.locate(RowKey::new(0), Path::new("/m/c.m3u")), Some(RowKey::new(1)));
        assert_eq!(list.locate(RowKey::new(0), Path::new("/m/a.m3u")), None);
    }

    #[test]
    fn removing_the_last_playlist_leaves_nothing_selected() {
        let (mut list, rx) = list();
        list.set_playlists(vec![location("/m/a.m3u")]);
        drain(&rx);

        list.remove_playlist(RowKey::new(0));

        assert_eq!(drain(&rx), vec!["deselected 0"]);
        assert!(list.selected().is_none());
    }

    #[test]
    fn added_playlists_get_fresh_keys_and_become_selected() {
        let (mut list, rx) = list();
        list.set_playlists(vec![location("/m/a.m3u")]);
        drain(&rx);

        let key = list.add_playlist(location("/m/new.m3u"));

        assert_eq!(key, RowKey::new(1));
        assert_eq!(drain(&rx), vec!["deselected 0", "selected 1 new"]);
    }

    #[test]
    fn adding_a_known_playlist_selects_the_existing_row() {
        let (mut list, _rx) = list();
        list.set_playlists(vec![location("/m/a.m3u"), location("/m/b.m3u")]);

        let key = list.add_playlist(location("/m/b.m3u"));

        assert_eq!(key, RowKey::new(1));
        assert_eq!(list.len(), 2);
        assert!(list.is_selected(key));
    }
}
