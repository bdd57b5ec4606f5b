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

//! UI rendering logic for the playlist list.

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{
    components::{PlaylistList, PlaylistRow, RenderRow, draw_rows},
    render::Render,
    theme::Theme,
};

impl RenderRow for PlaylistRow {
    fn top(&self) -> u32 {
        self.y
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let style = if self.active {
            Style::default().fg(theme.active_row_fg).bg(theme.active_row_bg)
        } else {
            Style::default()
        };

        let text = Text::from(vec![
            Line::from(self.name.as_str()).style(Style::default().add_modifier(Modifier::BOLD)),
            Line::from(self.directory.as_str()).style(Style::default().fg(theme.dim_fg)),
        ]);

        Paragraph::new(text).style(style).render(area, buf);
    }
}

impl Render for PlaylistList {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let border_colour = if self.is_active {
            theme.focus_border_colour
        } else {
            theme.border_colour
        };

        let block = Block::default()
            .title(format!(" Playlists ({}) ", self.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_colour));

        let inner = block.inner(area);
        f.render_widget(block, area);

        if self.rows.is_empty() {
            let hint = Paragraph::new("No playlists found, use :new <name> or :rescan")
                .style(Style::default().fg(theme.dim_fg));
            f.render_widget(hint, inner);
            return;
        }

        draw_rows(f, inner, &mut self.rows, theme);
    }
}
