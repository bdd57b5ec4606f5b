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

//! Render the command-line interface.
//!
//! While a command is being typed the footer shows the prompt, the current
//! text and the cursor; otherwise it shows the latest status message or a
//! short key reminder.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::{App, Status};

const PROMPT: &str = ":";

const KEY_HINTS: &str = "Tab switch pane  j/k move  1-5 sort  d remove track  D delete playlist  : command  q quit";

pub(crate) fn draw_commander(f: &mut Frame, area: Rect, app: &App) {
    let commander = &app.commander;
    let theme = &app.theme;

    let container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1)])
        .horizontal_margin(1)
        .split(area);

    if commander.active() {
        f.render_widget(
            Paragraph::new(format!("{PROMPT}{}", commander.input.value()))
                .style(Style::default().fg(theme.commander_colour).bg(theme.commander_bg)),
            container[0],
        );

        let cursor_x = container[0].x + (PROMPT.len() + commander.input.visual_cursor()) as u16;
        let cursor_y = container[0].y;
        f.set_cursor_position((cursor_x, cursor_y));
        return;
    }

    let (text, style) = match &app.status {
        Some(Status::Error(message)) => (message.as_str(), Style::default().fg(theme.error_colour)),
        Some(Status::Info(message)) => (message.as_str(), Style::default().fg(theme.commander_colour)),
        None => (KEY_HINTS, Style::default().fg(theme.dim_fg)),
    };

    f.render_widget(Paragraph::new(text).style(style), container[0]);
}
