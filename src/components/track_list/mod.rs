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

//! The tracks of the selected playlist.
//!
//! Tracks are rows of a [`RowCollection`] keyed in playlist order, with the
//! track's file path as payload. The order of the keys is the order the
//! playlist is saved in, so sorting rebuilds the rows rather than moving
//! them.

mod event;
mod render;

use std::path::PathBuf;

use crate::{
    components::Viewport,
    model::{TrackColumn, TrackInfo},
    rows::{RowCollection, RowItem, RowKey, RowOptions},
};

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum TrackListAction {
    /// The track at this path was removed from the list.
    Removed(PathBuf),
}

pub(crate) struct TrackRow {
    info: TrackInfo,
    x: u16,
    y: u32,
    active: bool,
}

impl TrackRow {
    pub(crate) fn new(info: TrackInfo) -> Self {
        Self {
            info,
            x: 0,
            y: 0,
            active: false,
        }
    }

    pub(crate) fn info(&self) -> &TrackInfo {
        &self.info
    }
}

impl RowItem for TrackRow {
    fn preferred_height(&self) -> u16 {
        1
    }

    fn horizontal_position(&self) -> u16 {
        self.x
    }

    fn place_at(&mut self, x: u16, y: u32) {
        self.x = x;
        self.y = y;
    }
}

/// Column and direction the tracks were last sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TrackSort {
    pub(crate) column: TrackColumn,
    pub(crate) descending: bool,
}

pub(crate) struct TrackList {
    pub(crate) rows: RowCollection<TrackRow, PathBuf, Viewport>,
    pub(crate) is_active: bool,
    sort: Option<TrackSort>,
}

impl TrackList {
    pub(crate) fn new(options: RowOptions) -> Self {
        let mut rows: RowCollection<TrackRow, PathBuf, Viewport> = RowCollection::new(Viewport::default(), options);

        rows.set_on_deselect(|_, entry| {
            if let Some(entry) = entry {
                entry.item.active = false;
            }
        });
        rows.set_on_select(|_, entry| {
            if let Some(entry) = entry {
                entry.item.active = true;
            }
        });

        Self {
            rows,
            is_active: false,
            sort: None,
        }
    }

    /// Replaces the tracks and selects the first one.
    pub(crate) fn set_tracks(&mut self, tracks: Vec<TrackInfo>) {
        self.clear();
        self.push_rows(tracks);
        self.rows.select_first_row();
    }

    /// Appends tracks after the existing ones.
    pub(crate) fn append_tracks(&mut self, tracks: Vec<TrackInfo>) {
        self.push_rows(tracks);

        if self.rows.selected_key().is_none() {
            self.rows.select_first_row();
        }
    }

    pub(crate) fn clear(&mut self) {
        self.rows.set_selected(None);
        self.rows.clear_rows();
        self.rows.relayout_all();
        self.sort = None;
    }

    /// Removes the selected track and selects its neighbour.
    pub(crate) fn remove_selected(&mut self) -> Option<TrackListAction> {
        let key = self.rows.selected_key()?;
        let path = self.rows.payload(key)?.clone();

        let neighbour = self
            .rows
            .sorted_keys()
            .find(|k| *k > key)
            .or_else(|| self.rows.sorted_keys().take_while(|k| *k < key).last());

        self.rows.remove_row(key, true);

        match neighbour {
            Some(_) => self.rows.set_selected(neighbour),
            None => self.rows.select_first_row(),
        }

        Some(TrackListAction::Removed(path))
    }

    /// Sorts by `column`; sorting by the same column again reverses it.
    pub(crate) fn sort_by(&mut self, column: TrackColumn) {
        let descending = self
            .sort
            .is_some_and(|sort| sort.column == column && !sort.descending);
        self.sort_with(TrackSort { column, descending });
    }

    pub(crate) fn sort_with(&mut self, sort: TrackSort) {
        let selected_path = self
            .rows
            .selected_key()
            .and_then(|key| self.rows.payload(key))
            .cloned();

        let mut tracks: Vec<TrackInfo> = self.rows.rows().map(|(_, row)| row.info.clone()).collect();
        tracks.sort_by(|a, b| {
            let ordering = sort.column.compare(a, b);
            if sort.descending { ordering.reverse() } else { ordering }
        });

        self.clear();
        let keys = self.push_rows(tracks);

        let reselect = selected_path
            .and_then(|path| keys.into_iter().find(|key| self.rows.payload(*key) == Some(&path)));
        match reselect {
            Some(key) => self.rows.set_selected(Some(key)),
            None => self.rows.select_first_row(),
        }

        self.sort = Some(sort);
    }

    pub(crate) fn sort(&self) -> Option<TrackSort> {
        self.sort
    }

    /// Track paths in list order, as they should be saved.
    pub(crate) fn paths(&self) -> Vec<PathBuf> {
        self.rows
            .sorted_keys()
            .filter_map(|key| self.rows.payload(key).cloned())
            .collect()
    }

    /// Index to number the next appended track with.
    pub(crate) fn next_index(&self) -> usize {
        self.rows
            .rows()
            .map(|(_, row)| row.info.index + 1)
            .max()
            .unwrap_or(0)
    }

    pub(crate) fn total_duration(&self) -> u64 {
        self.rows.rows().map(|(_, row)| row.info.duration).sum()
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    fn push_rows(&mut self, tracks: Vec<TrackInfo>) -> Vec<RowKey> {
        self.rows.add_rows(tracks.into_iter().map(|info| {
            let path = info.path.clone();
            (TrackRow::new(info), Some(path))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(index: usize, title: &str, artist: &str, duration: u64) -> TrackInfo {
        TrackInfo {
            index,
            title: title.into(),
            artist: Some(artist.into()),
            album: None,
            duration,
            path: PathBuf::from(format!("/m/{title}.mp3")),
        }
    }

    fn titles(list: &TrackList) -> Vec<String> {
        list.rows.rows().map(|(_, row)| row.info.title.clone()).collect()
    }

    fn selected_title(list: &TrackList) -> Option<String> {
        let key = list.rows.selected_key()?;
        list.rows.row(key).map(|row| row.info.title.clone())
    }

    fn sample() -> TrackList {
        let mut list = TrackList::new(RowOptions { row_spacing: 0, ..RowOptions::default() });
        list.set_tracks(vec![
            track(0, "charlie", "zed", 200),
            track(1, "alpha", "yan", 100),
            track(2, "bravo", "xia", 300),
        ]);
        list
    }

    #[test]
    fn tracks_are_packed_one_per_line() {
        let list = sample();

        let offsets: Vec<u32> = list.rows.rows().map(|(_, row)| row.y).collect();
        assert_eq!(offsets, vec![0, 1, 2]);
        assert_eq!(selected_title(&list).as_deref(), Some("charlie"));
        assert_eq!(list.total_duration(), 600);
    }

    #[test]
    fn removing_selects_the_following_track() {
        let mut list = sample();

        let action = list.remove_selected();

        assert_eq!(action, Some(TrackListAction::Removed(PathBuf::from("/m/charlie.mp3"))));
        assert_eq!(titles(&list), vec!["alpha", "bravo"]);
        assert_eq!(selected_title(&list).as_deref(), Some("alpha"));
    }

    #[test]
    fn removing_the_last_track_selects_the_previous_one() {
        let mut list = sample();
        list.rows.select_last_row();

        list.remove_selected();

        assert_eq!(selected_title(&list).as_deref(), Some("alpha"));
        assert_eq!(list.paths(), vec![PathBuf::from("/m/charlie.mp3"), PathBuf::from("/m/alpha.mp3")]);
    }

    #[test]
    fn removing_without_selection_does_nothing() {
        let mut list = sample();
        list.rows.set_selected(None);

        assert_eq!(list.remove_selected(), None);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn sorting_toggles_direction_and_keeps_the_selection() {
        let mut list = sample();
        list.rows.select_next();
        assert_eq!(selected_title(&list).as_deref(), Some("alpha"));

        list.sort_by(TrackColumn::Title);
        assert_eq!(titles(&list), vec!["alpha", "bravo", "charlie"]);
        assert_eq!(selected_title(&list).as_deref(), Some("alpha"));

        list.sort_by(TrackColumn::Title);
        assert_eq!(titles(&list), vec!["charlie", "bravo", "alpha"]);
        assert_eq!(list.sort().map(|s| s.descending), Some(true));

        list.sort_by(TrackColumn::Duration);
        assert_eq!(titles(&list), vec!["alpha", "charlie", "bravo"]);
    }

    #[test]
    fn sorted_order_is_the_saved_order() {
        let mut list = sample();

        list.sort_by(TrackColumn::Artist);

        assert_eq!(
            list.paths(),
            vec![
                PathBuf::from("/m/bravo.mp3"),
                PathBuf::from("/m/alpha.mp3"),
                PathBuf::from("/m/charlie.mp3"),
            ]
        );
    }

    #[test]
    fn appended_tracks_follow_existing_ones() {
        let mut list = sample();

        list.append_tracks(vec![track(list.next_index(), "delta", "w", 10)]);

        assert_eq!(titles(&list), vec!["charlie", "alpha", "bravo", "delta"]);
        assert_eq!(list.next_index(), 4);
        assert_eq!(selected_title(&list).as_deref(), Some("charlie"));
    }

    #[test]
    fn appending_to_an_empty_list_selects_the_first_track() {
        let mut list = TrackList::new(RowOptions::default());

        list.append_tracks(vec![track(0, "solo", "a", 1)]);

        assert_eq!(selected_title(&list).as_deref(), Some("solo"));
    }

    #[test]
    fn clearing_resets_selection_and_extent() {
        let mut list = sample();

        list.clear();

        assert_eq!(list.len(), 0);
        assert_eq!(list.rows.selected_key(), None);
        assert_eq!(list.rows.container().content_height(), 0);
        assert_eq!(list.next_index(), 0);
    }
}
