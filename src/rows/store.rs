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

//! Keyed storage for row items and their payloads.
//!
//! The store knows nothing about layout or selection, it only maps a
//! [`RowKey`] to an item and an optional payload. Both maps are ordered, so
//! every iteration yields rows in ascending key order.

use std::collections::BTreeMap;

use crate::rows::RowKey;

/// A mutable view of one stored row, handed to selection handlers.
pub(crate) struct RowEntry<'a, I, P> {
    pub(crate) item: &'a mut I,
    pub(crate) payload: Option<&'a P>,
}

pub(crate) struct RowStore<I, P> {
    items: BTreeMap<RowKey, I>,
    payloads: BTreeMap<RowKey, P>,
}

impl<I, P> RowStore<I, P> {
    pub(crate) fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            payloads: BTreeMap::new(),
        }
    }

    /// Registers an item under a fresh key.
    ///
    /// Callers only ever insert keys that are not present.
    pub(crate) fn insert(&mut self, key: RowKey, item: I, payload: Option<P>) {
        debug_assert!(!self.items.contains_key(&key), "row key {key} inserted twice");

        self.items.insert(key, item);
        match payload {
            Some(payload) => {
                self.payloads.insert(key, payload);
            }
            None => {
                self.payloads.remove(&key);
            }
        }
    }

    /// Detaches the item stored under `key` and drops its payload.
    ///
    /// Destroying the returned item is the caller's job.
    pub(crate) fn remove(&mut self, key: RowKey) -> Option<I> {
        self.payloads.remove(&key);
        self.items.remove(&key)
    }

    pub(crate) fn get(&self, key: RowKey) -> Option<&I> {
        self.items.get(&key)
    }

    pub(crate) fn entry_mut(&mut self, key: RowKey) -> Option<RowEntry<'_, I, P>> {
        let payload = self.payloads.get(&key);
        self.items.get_mut(&key).map(|item| RowEntry { item, payload })
    }

    pub(crate) fn payload(&self, key: RowKey) -> Option<&P> {
        self.payloads.get(&key)
    }

    /// Attaches a payload to an existing row, replacing any previous one.
    ///
    /// Does nothing when no row is stored under `key`.
    pub(crate) fn set_payload(&mut self, key: RowKey, payload: P) {
        if self.items.contains_key(&key) {
            self.payloads.insert(key, payload);
        }
    }

    pub(crate) fn contains(&self, key: RowKey) -> bool {
        self.items.contains_key(&key)
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Keys in ascending order; call again to restart.
    pub(crate) fn keys(&self) -> impl Iterator<Item = RowKey> + '_ {
        self.items.keys().copied()
    }

    pub(crate) fn first_key(&self) -> Option<RowKey> {
        self.items.keys().next().copied()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (RowKey, &I)> + '_ {
        self.items.iter().map(|(key, item)| (*key, item))
    }

    pub(crate) fn items_mut(&mut self) -> impl Iterator<Item = &mut I> + '_ {
        self.items.values_mut()
    }

    /// Forgets every row without destroying anything.
    pub(crate) fn clear(&mut self) {
        self.items.clear();
        self.payloads.clear();
    }
}
