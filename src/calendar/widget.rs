use super::grid::{GridCell, MonthGrid, GRID_CELLS};
use super::util::DAYS_IN_WEEK;
use super::DateStyler;
use crate::theme::{
    BASE_STYLE, CURSOR_STYLE, MONTH_STYLE, OTHER_MONTH_STYLE, SELECTED_STYLE, WEEKDAY_STYLE,
};
use ratatui::{layout::Flex, prelude::*, widgets::*};
use time::Date;

static HEADER: &str = " Su   Mo   Tu   We   Th   Fr   Sa ";

/// Number of columns per day of week
const DAY_WIDTH: u16 = 5;

/// Width of the grid in columns; the last day has no trailing gap
pub(crate) const GRID_WIDTH: u16 = DAY_WIDTH * 7 - 1;

/// Number of lines above the first week: the month title, the weekday header,
/// and the rule beneath it
const HEADER_LINES: u16 = 3;

pub(crate) const GRID_HEIGHT: u16 = HEADER_LINES + 6;

const ACS_HLINE: char = '─';

/// Where each part of the month grid lands within an area
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GridLayout {
    area: Rect,
}

impl GridLayout {
    /// Center the grid within `area`
    pub(crate) fn new(area: Rect) -> GridLayout {
        let [area] = Layout::horizontal([GRID_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::vertical([GRID_HEIGHT])
            .flex(Flex::Center)
            .areas(area);
        GridLayout { area }
    }

    pub(crate) fn area(&self) -> Rect {
        self.area
    }

    /// Screen rectangle of the cell at index `i` (0 to 41, row-major)
    pub(crate) fn cell_rect(&self, i: usize) -> Option<Rect> {
        if i >= GRID_CELLS {
            return None;
        }
        let row = u16::try_from(i / DAYS_IN_WEEK).ok()?;
        let col = u16::try_from(i % DAYS_IN_WEEK).ok()?;
        let rect = Rect {
            x: self.area.x + col * DAY_WIDTH,
            y: self.area.y + HEADER_LINES + row,
            width: DAY_WIDTH - 1,
            height: 1,
        };
        Some(rect.intersection(self.area))
    }

    /// Index of the cell covering the given screen position
    pub(crate) fn cell_at(&self, column: u16, row: u16) -> Option<usize> {
        (0..GRID_CELLS).find(|&i| {
            self.cell_rect(i)
                .is_some_and(|r| r.contains(Position::new(column, row)))
        })
    }
}

/// Draws a [`MonthGrid`], tinting each current-month day with the styler
#[derive(Debug)]
pub(crate) struct MonthGridWidget<'a, S> {
    grid: &'a MonthGrid,
    cursor: Option<Date>,
    styler: S,
}

impl<'a, S: DateStyler> MonthGridWidget<'a, S> {
    pub(crate) fn new(grid: &'a MonthGrid, styler: S) -> Self {
        MonthGridWidget {
            grid,
            cursor: None,
            styler,
        }
    }

    pub(crate) fn cursor(mut self, date: Date) -> Self {
        self.cursor = Some(date);
        self
    }

    fn cell_span(&self, cell: &GridCell) -> Span<'static> {
        let s = if cell.is_today {
            format!("[{:2}]", cell.day())
        } else {
            format!(" {:2} ", cell.day())
        };
        let mut style = if cell.is_current_month {
            BASE_STYLE.patch(self.styler.date_style(cell.date))
        } else {
            OTHER_MONTH_STYLE
        };
        if cell.is_selected {
            style = style.patch(SELECTED_STYLE);
        }
        if self.cursor == Some(cell.date) {
            style = style.patch(CURSOR_STYLE);
        }
        Span::styled(s, style)
    }
}

impl<S: DateStyler> Widget for MonthGridWidget<'_, S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = GridLayout::new(area);
        let grid_area = layout.area();
        Paragraph::new(Line::styled(self.grid.month().to_string(), MONTH_STYLE).centered())
            .render(Rect { height: 1, ..grid_area }, buf);
        if grid_area.height > 1 {
            buf.set_stringn(
                grid_area.x,
                grid_area.y + 1,
                HEADER,
                usize::from(grid_area.width),
                WEEKDAY_STYLE,
            );
        }
        if grid_area.height > 2 {
            buf.set_stringn(
                grid_area.x,
                grid_area.y + 2,
                String::from(ACS_HLINE).repeat(usize::from(grid_area.width)),
                usize::from(grid_area.width),
                BASE_STYLE,
            );
        }
        for (i, cell) in self.grid.cells().iter().enumerate() {
            if let Some(rect) = layout.cell_rect(i).filter(|r| !r.is_empty()) {
                let span = self.cell_span(cell);
                buf.set_stringn(
                    rect.x,
                    rect.y,
                    span.content,
                    usize::from(rect.width),
                    span.style,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::YearMonth;
    use time::macros::date;

    struct NullStyler;

    impl DateStyler for NullStyler {
        fn date_style(&self, _date: Date) -> Style {
            Style::new()
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
    }

    #[test]
    fn test_layout_centers_grid() {
        let layout = GridLayout::new(Rect::new(0, 0, 40, 11));
        assert_eq!(layout.area(), Rect::new(3, 1, GRID_WIDTH, GRID_HEIGHT));
        assert_eq!(layout.cell_rect(0), Some(Rect::new(3, 4, 4, 1)));
        assert_eq!(layout.cell_rect(8), Some(Rect::new(8, 5, 4, 1)));
        assert_eq!(layout.cell_rect(41), Some(Rect::new(33, 9, 4, 1)));
        assert_eq!(layout.cell_rect(42), None);
        assert_eq!(layout.cell_at(3, 4), Some(0));
        assert_eq!(layout.cell_at(6, 4), Some(0));
        // The gap between two days belongs to neither
        assert_eq!(layout.cell_at(7, 4), None);
        assert_eq!(layout.cell_at(9, 5), Some(8));
        assert_eq!(layout.cell_at(3, 3), None);
    }

    #[test]
    fn test_render_august_2025() {
        let grid = MonthGrid::render(
            YearMonth::of(date!(2025 - 08 - 01)),
            date!(2025 - 08 - 10),
            date!(2025 - 08 - 20),
        )
        .unwrap();
        let area = Rect::new(0, 0, GRID_WIDTH, GRID_HEIGHT);
        let mut buf = Buffer::empty(area);
        MonthGridWidget::new(&grid, NullStyler)
            .cursor(date!(2025 - 08 - 20))
            .render(area, &mut buf);
        assert_eq!(row_text(&buf, 0).trim(), "August 2025");
        assert_eq!(row_text(&buf, 1), HEADER);
        assert_eq!(row_text(&buf, 2), "─".repeat(usize::from(GRID_WIDTH)));
        assert_eq!(row_text(&buf, 3), " 27   28   29   30   31    1    2 ");
        assert_eq!(row_text(&buf, 4), "  3    4    5    6    7    8    9 ");
        assert_eq!(row_text(&buf, 5), "[10]  11   12   13   14   15   16 ");
        assert_eq!(row_text(&buf, 8), " 31    1    2    3    4    5    6 ");
        assert_eq!(buf[(0, 3)].style().fg, OTHER_MONTH_STYLE.fg);
        assert!(buf[(15, 6)]
            .style()
            .add_modifier
            .contains(Modifier::REVERSED | Modifier::UNDERLINED));
    }
}
