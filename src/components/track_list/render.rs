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

//! UI rendering logic for the track list.
//!
//! This module handles the visual representation of track data, including
//! column layout, sort indicators, and the active row highlight.

use std::fmt::Write;

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{
    components::{RenderRow, TrackList, TrackRow, draw_rows},
    model::TrackColumn,
    render::Render,
    theme::Theme,
    util::format::format_time,
};

const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Length(4),
    Constraint::Percentage(40),
    Constraint::Percentage(25),
    Constraint::Percentage(25),
    Constraint::Length(8),
];

fn columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(COLUMN_WIDTHS)
        .spacing(1)
        .split(area)
}

impl RenderRow for TrackRow {
    fn top(&self) -> u32 {
        self.y
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let row_style = if self.active {
            Style::default().fg(theme.active_row_fg).bg(theme.active_row_bg)
        } else {
            Style::default()
        };
        buf.set_style(area, row_style);

        let cells = columns(area);
        let info = &self.info;

        // Active rows use a single foreground so the highlight stays legible
        let fg = |colour| if self.active { theme.active_row_fg } else { colour };

        Line::from(format!("{}", info.index + 1))
            .style(Style::default().fg(fg(theme.table_index_fg)))
            .alignment(Alignment::Right)
            .render(cells[0], buf);
        Line::from(info.title.as_str())
            .style(Style::default().fg(fg(theme.table_track_fg)))
            .render(cells[1], buf);
        Line::from(info.artist.as_deref().unwrap_or(""))
            .style(Style::default().fg(fg(theme.table_artist_fg)))
            .render(cells[2], buf);
        Line::from(info.album.as_deref().unwrap_or(""))
            .style(Style::default().fg(fg(theme.table_album_fg)))
            .render(cells[3], buf);
        Line::from(format_time(info.duration))
            .style(Style::default().fg(fg(theme.table_time_fg)))
            .alignment(Alignment::Right)
            .render(cells[4], buf);
    }
}

impl TrackList {
    fn draw_header(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let cells = columns(area);
        let sort = self.sort();

        for (index, column) in TrackColumn::ALL.into_iter().enumerate() {
            let mut label = format!("{} {}", index + 1, column.label());
            if let Some(sort) = sort.filter(|s| s.column == column) {
                label.push(if sort.descending { '▼' } else { '▲' });
            }

            let alignment = match column {
                TrackColumn::Index | TrackColumn::Duration => Alignment::Right,
                _ => Alignment::Left,
            };

            let heading = Paragraph::new(label)
                .alignment(alignment)
                .style(Style::default().add_modifier(Modifier::BOLD).fg(theme.accent_colour));
            f.render_widget(heading, cells[index]);
        }
    }
}

impl Render for TrackList {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let border_colour = if self.is_active {
            theme.focus_border_colour
        } else {
            theme.border_colour
        };

        let mut title = format!(
            " Tracks | {} | {} ",
            self.len(),
            format_time(self.total_duration())
        );
        if let Some(sort) = self.sort() {
            let _ = write!(title, "| by {} ", sort.column.label());
        }

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_colour));

        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        self.draw_header(f, chunks[0], theme);
        draw_rows(f, chunks[1], &mut self.rows, theme);
    }
}
