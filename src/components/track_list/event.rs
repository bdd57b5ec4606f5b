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

//! Input handling for the track list.
//!
//! Navigation and sorting are handled internally; removing a track is
//! reported back as a [`TrackListAction`] so the playlist can be saved.

use crossterm::event::{Event, KeyCode};

use crate::{
    components::{TrackList, TrackListAction},
    model::TrackColumn,
};

impl TrackList {
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<TrackListAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => self.rows.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.rows.select_previous(),
            KeyCode::Char('g') | KeyCode::Home => self.rows.select_first_row(),
            KeyCode::Char('G') | KeyCode::End => self.rows.select_last_row(),

            // Column headings, numbered left to right
            KeyCode::Char(c @ '1'..='5') => {
                let column = (c as usize) - ('1' as usize);
                self.sort_by(TrackColumn::ALL[column]);
            }

            KeyCode::Char('d') | KeyCode::Delete => return self.remove_selected(),

            _ => {}
        }

        None
    }
}
