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

//! Scrollable host for laid-out rows.
//!
//! A [`Viewport`] is the [`ScrollContainer`] of a row collection. Layout
//! tells it how tall the content is; drawing tells it how tall the visible
//! window is. It keeps a scroll offset between the two and maps each row's
//! laid-out offset onto the screen.

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::{
    rows::{RowCollection, RowItem, ScrollContainer},
    theme::Theme,
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Viewport {
    content_height: u32,
    offset: u32,
    height: u16,
}

impl ScrollContainer for Viewport {
    fn refresh_scroll_extent(&mut self, content_height: u32) {
        self.content_height = content_height;
        self.clamp();
    }
}

impl Viewport {
    pub(crate) fn content_height(&self) -> u32 {
        self.content_height
    }

    pub(crate) fn offset(&self) -> u32 {
        self.offset
    }

    pub(crate) fn set_height(&mut self, height: u16) {
        self.height = height;
        self.clamp();
    }

    /// Scrolls the least distance that brings the span `[top, top + height)`
    /// into view. Spans taller than the window are aligned to their top.
    pub(crate) fn ensure_visible(&mut self, top: u32, height: u16) {
        let window = u32::from(self.height);
        let bottom = top + u32::from(height);

        if top < self.offset || height > self.height {
            self.offset = top;
        } else if bottom > self.offset + window {
            self.offset = bottom - window;
        }

        self.clamp();
    }

    /// Screen area of a row, clipped to `area`.
    ///
    /// Rows starting above the scroll offset or below the window are not
    /// drawn.
    pub(crate) fn row_area(&self, area: Rect, x: u16, top: u32, height: u16) -> Option<Rect> {
        let relative = top.checked_sub(self.offset)?;
        let relative = u16::try_from(relative).ok().filter(|r| *r < area.height)?;

        let x = x.min(area.width);
        let width = area.width - x;
        let height = height.min(area.height - relative);
        if width == 0 || height == 0 {
            return None;
        }

        Some(Rect::new(area.x + x, area.y + relative, width, height))
    }

    /// Whether the content is taller than the window, needing a scrollbar.
    pub(crate) fn overflows(&self) -> bool {
        self.content_height > u32::from(self.height)
    }

    /// The part of `area` rows are drawn in, leaving the rightmost column
    /// to the scrollbar while there is one.
    pub(crate) fn content_area(&self, area: Rect) -> Rect {
        if self.overflows() {
            Rect {
                width: area.width.saturating_sub(1),
                ..area
            }
        } else {
            area
        }
    }

    fn max_offset(&self) -> u32 {
        self.content_height.saturating_sub(u32::from(self.height))
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}

/// A row that knows how to draw itself once placed.
pub(crate) trait RenderRow: RowItem {
    /// Offset assigned by the last layout pass.
    fn top(&self) -> u32;

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme);
}

/// Draws the visible rows of a collection, scrolled so the selected row is
/// on screen.
pub(crate) fn draw_rows<I: RenderRow, P>(
    f: &mut Frame,
    area: Rect,
    rows: &mut RowCollection<I, P, Viewport>,
    theme: &Theme,
) {
    rows.container_mut().set_height(area.height);

    let selected = rows
        .selected_key()
        .and_then(|key| rows.row(key))
        .map(|row| (row.top(), row.preferred_height()));
    if let Some((top, height)) = selected {
        rows.container_mut().ensure_visible(top, height);
    }

    let viewport = rows.container();
    let content_area = viewport.content_area(area);
    let buf = f.buffer_mut();
    for (_, row) in rows.rows() {
        let placed = viewport.row_area(content_area, row.horizontal_position(), row.top(), row.preferred_height());
        if let Some(row_area) = placed {
            row.render(row_area, buf, theme);
        }
    }

    if viewport.overflows() {
        let mut state = ScrollbarState::new(viewport.content_height() as usize)
            .position(viewport.offset() as usize)
            .viewport_content_length(area.height as usize);

        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut state,
        );
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::rows::RowOptions;

    /// A one-line row that fills its area with `#`.
    #[derive(Default)]
    struct Filled {
        x: u16,
        y: u32,
    }

    impl RowItem for Filled {
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

    impl RenderRow for Filled {
        fn top(&self) -> u32 {
            self.y
        }

        fn render(&self, area: Rect, buf: &mut Buffer, _theme: &Theme) {
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    buf[(x, y)].set_symbol("#");
                }
            }
        }
    }

    fn draw_filled(count: usize) -> Terminal<TestBackend> {
        let options = RowOptions {
            row_spacing: 0,
            ..RowOptions::default()
        };
        let mut rows: RowCollection<Filled, (), Viewport> = RowCollection::new(Viewport::default(), options);
        for _ in 0..count {
            rows.add_row(Filled::default(), None, true);
        }

        let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                draw_rows(f, area, &mut rows, &Theme::default());
            })
            .unwrap();
        terminal
    }

    fn viewport(content_height: u32, height: u16) -> Viewport {
        let mut viewport = Viewport::default();
        viewport.set_height(height);
        viewport.refresh_scroll_extent(content_height);
        viewport
    }

    #[test]
    fn offset_is_clamped_when_content_shrinks() {
        let mut viewport = viewport(100, 10);
        viewport.ensure_visible(95, 1);
        assert_eq!(viewport.offset(), 86);

        viewport.refresh_scroll_extent(20);
        assert_eq!(viewport.offset(), 10);

        viewport.refresh_scroll_extent(5);
        assert_eq!(viewport.offset(), 0);
    }

    #[test]
    fn ensure_visible_scrolls_minimally() {
        let mut viewport = viewport(100, 10);

        viewport.ensure_visible(4, 2);
        assert_eq!(viewport.offset(), 0);

        viewport.ensure_visible(12, 2);
        assert_eq!(viewport.offset(), 4);

        viewport.ensure_visible(3, 1);
        assert_eq!(viewport.offset(), 3);
    }

    #[test]
    fn row_area_maps_and_clips_rows() {
        let mut viewport = viewport(100, 5);
        viewport.ensure_visible(10, 1);
        assert_eq!(viewport.offset(), 6);

        let area = Rect::new(2, 3, 20, 5);

        // Above the window
        assert_eq!(viewport.row_area(area, 0, 5, 1), None);
        // First visible line
        assert_eq!(viewport.row_area(area, 1, 6, 2), Some(Rect::new(3, 3, 19, 2)));
        // Clipped at the bottom
        assert_eq!(viewport.row_area(area, 0, 10, 3), Some(Rect::new(2, 7, 20, 1)));
        // Below the window
        assert_eq!(viewport.row_area(area, 0, 11, 1), None);
        // Indented past the right edge
        assert_eq!(viewport.row_area(area, 30, 7, 1), None);
    }

    #[test]
    fn content_area_gives_up_a_column_to_the_scrollbar() {
        let area = Rect::new(2, 3, 20, 5);

        assert_eq!(viewport(5, 5).content_area(area), area);
        assert_eq!(viewport(6, 5).content_area(area), Rect::new(2, 3, 19, 5));
    }

    #[test]
    fn scrollbar_does_not_cover_rows() {
        let terminal = draw_filled(5);
        let buffer = terminal.backend().buffer();

        for y in 0..3 {
            assert_eq!(buffer[(8, y)].symbol(), "#");
            assert_ne!(buffer[(9, y)].symbol(), "#");
        }
    }

    #[test]
    fn rows_use_the_full_width_without_a_scrollbar() {
        let terminal = draw_filled(2);
        let buffer = terminal.backend().buffer();

        assert_eq!(buffer[(9, 0)].symbol(), "#");
        assert_eq!(buffer[(9, 1)].symbol(), "#");
        assert_eq!(buffer[(9, 2)].symbol(), " ");
    }
}
