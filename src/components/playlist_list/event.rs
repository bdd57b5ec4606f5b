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

//! Keyboard handling for the playlist list.

use crossterm::event::{Event, KeyCode};

use crate::components::{PlaylistList, PlaylistListAction};

impl PlaylistList {
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<PlaylistListAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => self.rows.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.rows.select_previous(),
            KeyCode::Char('g') | KeyCode::Home => self.rows.select_first_row(),
            KeyCode::Char('G') | KeyCode::End => self.rows.select_last_row(),

            KeyCode::Char('D') => return Some(PlaylistListAction::DeleteSelected),

            _ => {}
        }

        None
    }
}
