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

//! Indexed row collection with vertical layout and single selection.
//!
//! A [`RowCollection`] owns an arbitrary number of row items, each identified
//! by a [`RowKey`] handed out in insertion order. It stacks the rows
//! vertically in ascending key order, reports the resulting content extent
//! to its [`ScrollContainer`], and tracks at most one selected row.
//!
//! # Selection
//!
//! Selection moves only through [`RowCollection::set_selected`], with one
//! exception: removing the selected row deselects it first. The deselect
//! handler always runs before the selected value changes, and the select
//! handler after, so a handler observes the row while it is still alive.
//!
//! Removing the selected row leaves the collection unselected; callers that
//! want a replacement call [`RowCollection::select_first_row`] afterwards.

mod store;

use std::fmt;

use tracing::{debug, trace};

pub(crate) use store::{RowEntry, RowStore};

/// Stable identity of a row, independent of its position on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct RowKey(usize);

impl RowKey {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The capabilities a collection needs from the rows it arranges.
pub(crate) trait RowItem {
    /// Height the row wants, in terminal lines.
    fn preferred_height(&self) -> u16;

    /// Current horizontal position, kept as is by layout.
    fn horizontal_position(&self) -> u16;

    fn place_at(&mut self, x: u16, y: u32);

    /// Called once, right before the collection drops the row.
    fn destroy(&mut self) {}
}

/// The view hosting a collection, told about the laid-out content height.
pub(crate) trait ScrollContainer {
    fn refresh_scroll_extent(&mut self, content_height: u32);
}

/// Handler invoked on a selection transition.
///
/// The entry is `None` when no row is stored under the key.
pub(crate) type SelectionHandler<I, P> = Box<dyn FnMut(RowKey, Option<RowEntry<'_, I, P>>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RowOptions {
    /// Blank lines between consecutive rows.
    pub(crate) row_spacing: u16,
    /// Offset of the first row.
    pub(crate) base_offset: u32,
    /// Deselect (firing the handler) before [`RowCollection::clear_rows`]
    /// destroys the rows, instead of leaving the selection untouched.
    pub(crate) clear_resets_selection: bool,
}

impl Default for RowOptions {
    fn default() -> Self {
        Self {
            row_spacing: 1,
            base_offset: 0,
            clear_resets_selection: false,
        }
    }
}

pub(crate) struct RowCollection<I, P, C> {
    store: RowStore<I, P>,
    next_key: usize,
    options: RowOptions,
    selected: Option<RowKey>,
    on_deselect: Option<SelectionHandler<I, P>>,
    on_select: Option<SelectionHandler<I, P>>,
    container: C,
}

impl<I: RowItem, P, C: ScrollContainer> RowCollection<I, P, C> {
    pub(crate) fn new(container: C, options: RowOptions) -> Self {
        Self {
            store: RowStore::new(),
            next_key: 0,
            options,
            selected: None,
            on_deselect: None,
            on_select: None,
            container,
        }
    }

    pub(crate) fn set_on_deselect(
        &mut self,
        handler: impl FnMut(RowKey, Option<RowEntry<'_, I, P>>) + 'static,
    ) {
        self.on_deselect = Some(Box::new(handler));
    }

    pub(crate) fn set_on_select(
        &mut self,
        handler: impl FnMut(RowKey, Option<RowEntry<'_, I, P>>) + 'static,
    ) {
        self.on_select = Some(Box::new(handler));
    }

    /// Adds a row under the next key and returns that key.
    ///
    /// Keys strictly increase until the next [`clear_rows`](Self::clear_rows),
    /// so a key captured before layout can never come to name another row.
    pub(crate) fn add_row(&mut self, item: I, payload: Option<P>, relayout: bool) -> RowKey {
        let key = RowKey::new(self.next_key);
        self.next_key += 1;

        self.store.insert(key, item, payload);
        trace!(%key, "row added");

        if relayout {
            self.relayout_all();
        }

        key
    }

    /// Adds rows in order with a single layout pass at the end.
    pub(crate) fn add_rows(&mut self, rows: impl IntoIterator<Item = (I, Option<P>)>) -> Vec<RowKey> {
        let keys = rows
            .into_iter()
            .map(|(item, payload)| self.add_row(item, payload, false))
            .collect();

        self.relayout_all();

        keys
    }

    /// Destroys the row stored under `key`.
    ///
    /// A selected row is deselected first, while it still exists. The
    /// collection is left unselected.
    pub(crate) fn remove_row(&mut self, key: RowKey, relayout: bool) {
        if !self.store.contains(key) {
            return;
        }

        if self.selected == Some(key) {
            self.fire_deselect(key);
            self.selected = None;
        }

        if let Some(mut item) = self.store.remove(key) {
            item.destroy();
        }
        trace!(%key, "row removed");

        if relayout {
            self.relayout_all();
        }
    }

    pub(crate) fn row(&self, key: RowKey) -> Option<&I> {
        self.store.get(key)
    }

    pub(crate) fn payload(&self, key: RowKey) -> Option<&P> {
        self.store.payload(key)
    }

    pub(crate) fn set_payload(&mut self, key: RowKey, payload: P) {
        self.store.set_payload(key, payload);
    }

    /// Destroys every row and restarts key numbering at zero.
    ///
    /// The selection survives unless [`RowOptions::clear_resets_selection`]
    /// is set, in which case the selected row is deselected before anything
    /// is destroyed.
    pub(crate) fn clear_rows(&mut self) {
        if self.options.clear_resets_selection {
            if let Some(key) = self.selected.take() {
                self.fire_deselect(key);
            }
        }

        for item in self.store.items_mut() {
            item.destroy();
        }
        self.store.clear();
        self.next_key = 0;

        debug!("rows cleared");
    }

    /// Stacks every row in ascending key order and reports the content
    /// height to the container.
    pub(crate) fn relayout_all(&mut self) {
        let spacing = u32::from(self.options.row_spacing);
        let mut cursor = self.options.base_offset;

        for item in self.store.items_mut() {
            let x = item.horizontal_position();
            item.place_at(x, cursor);
            cursor += u32::from(item.preferred_height()) + spacing;
        }

        self.container.refresh_scroll_extent(cursor);
    }

    pub(crate) fn selected_key(&self) -> Option<RowKey> {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, key: Option<RowKey>) {
        if self.selected == key {
            return;
        }

        if let Some(previous) = self.selected {
            self.fire_deselect(previous);
        }

        self.selected = key;

        if let Some(next) = key {
            self.fire_select(next);
        }
    }

    pub(crate) fn select_first_row(&mut self) {
        let first = self.store.first_key();
        self.set_selected(first);
    }

    /// Selects the row after the selected one, wrapping to the first.
    pub(crate) fn select_next(&mut self) {
        let next = match self.selected {
            Some(current) => self
                .store
                .keys()
                .find(|key| *key > current)
                .or_else(|| self.store.first_key()),
            None => self.store.first_key(),
        };

        if next.is_some() {
            self.set_selected(next);
        }
    }

    /// Selects the row before the selected one, wrapping to the last.
    pub(crate) fn select_previous(&mut self) {
        let previous = match self.selected {
            Some(current) => self
                .store
                .keys()
                .take_while(|key| *key < current)
                .last()
                .or_else(|| self.store.keys().last()),
            None => self.store.first_key(),
        };

        if previous.is_some() {
            self.set_selected(previous);
        }
    }

    pub(crate) fn select_last_row(&mut self) {
        let last = self.store.keys().last();
        self.set_selected(last);
    }

    pub(crate) fn sorted_keys(&self) -> impl Iterator<Item = RowKey> + '_ {
        self.store.keys()
    }

    /// Rows with their keys, in layout order.
    pub(crate) fn rows(&self) -> impl Iterator<Item = (RowKey, &I)> + '_ {
        self.store.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.store.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub(crate) fn container(&self) -> &C {
        &self.container
    }

    pub(crate) fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    fn fire_deselect(&mut self, key: RowKey) {
        trace!(%key, "deselect");
        if let Some(handler) = self.on_deselect.as_mut() {
            handler(key, self.store.entry_mut(key));
        }
    }

    fn fire_select(&mut self, key: RowKey) {
        let Some(entry) = self.store.entry_mut(key) else {
            debug!(%key, "selected key has no row, select handler skipped");
            return;
        };

        trace!(%key, "select");
        if let Some(handler) = self.on_select.as_mut() {
            handler(key, Some(entry));
        }
    }
}
