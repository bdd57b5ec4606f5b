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

//! Interactive UI components.
//!
//! Both lists are row collections hosted in a [`Viewport`]; each component
//! keeps its state, input handling and rendering in separate files.

mod playlist_list;
mod track_list;
mod viewport;

pub(crate) use playlist_list::{PlaylistList, PlaylistListAction, PlaylistRow};
pub(crate) use track_list::{TrackList, TrackListAction, TrackRow, TrackSort};
pub(crate) use viewport::{RenderRow, Viewport, draw_rows};
