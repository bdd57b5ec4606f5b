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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called on every
//! terminal tick or state change. Components draw themselves through the
//! [`Render`] trait.

mod commander;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
};

use crate::{App, render::commander::draw_commander, theme::Theme};

const PLAYLIST_PANE_PERCENT: u16 = 30;

pub(crate) trait Render {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Renders the user interface to the terminal frame.
///
/// The screen is split into the playlist pane on the left, the track pane on
/// the right, and a single footer line for the command line and status
/// messages.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    f.render_widget(Block::default().style(Style::default().bg(app.theme.background_colour)), area);

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(PLAYLIST_PANE_PERCENT),
            Constraint::Min(0),
        ])
        .split(outer[0]);

    app.playlist_list.draw(f, main[0], &app.theme);
    app.track_list.draw(f, main[1], &app.theme);

    draw_commander(f, outer[1], app);
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, sync::mpsc};

    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::{
        actions::events::{AppEvent, handle_event},
        config::AppConfig,
        model::PlaylistLocation,
    };

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn draws_playlists_and_status() {
        let (command_tx, _command_rx) = mpsc::channel();
        let mut app = App::new(AppConfig::default(), command_tx);
        handle_event(
            &mut app,
            AppEvent::PlaylistsScanned(vec![PlaylistLocation::new(PathBuf::from("/music/summer.m3u"))]),
        )
        .unwrap();

        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let screen = screen(&terminal);
        assert!(screen.contains("Playlists (1)"));
        assert!(screen.contains("summer"));
        assert!(screen.contains("Tracks"));
        assert!(screen.contains("1 playlists found"));
    }
}
