use crate::calendar::{
    add_days, DateStyler, GridLayout, MonthGrid, MonthGridWidget, OutOfRangeError, YearMonth,
    GRID_HEIGHT, GRID_WIDTH,
};
use crate::display::{DisplayController, InvalidDateError};
use crate::theme::BASE_STYLE;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Position, Rect},
    text::Line,
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use time::{Date, Month};

const OUTER_WIDTH: u16 = GRID_WIDTH + 4;
const OUTER_HEIGHT: u16 = GRID_HEIGHT + 4;

/// The month-grid date picker.  Its cursor follows the selected date only
/// when the picker is opened; moving it does not change the selection until a
/// day is picked.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Picker {
    open: bool,
    cursor: Date,
}

impl Picker {
    pub(crate) fn new(selected: Date) -> Picker {
        Picker {
            open: false,
            cursor: selected,
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn cursor(&self) -> Date {
        self.cursor
    }

    pub(crate) fn open(&mut self, selected: Date) {
        self.cursor = selected;
        self.open = true;
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
    }

    /// Show the previous (negative) or next (positive) month.  The cursor
    /// keeps its day of the month where possible and is otherwise moved to the
    /// month's last day.
    pub(crate) fn step_month(&mut self, direction: i32) -> Result<(), OutOfRangeError> {
        let target = YearMonth::of(self.cursor).step(direction);
        let cursor = target.day(self.cursor.day().min(target.length()))?;
        // Refuse to show a month whose grid would run off the calendar.
        MonthGrid::render(target, cursor, cursor)?;
        self.cursor = cursor;
        Ok(())
    }

    /// Move the cursor by `days`; crossing a month boundary changes the month
    /// shown
    pub(crate) fn move_cursor(&mut self, days: i64) -> Result<(), OutOfRangeError> {
        let cursor = add_days(self.cursor, days)?;
        MonthGrid::render(YearMonth::of(cursor), cursor, cursor)?;
        self.cursor = cursor;
        Ok(())
    }

    pub(crate) fn grid(&self, today: Date, selected: Date) -> Result<MonthGrid, OutOfRangeError> {
        MonthGrid::render(YearMonth::of(self.cursor), today, selected)
    }

    /// Commit a date to the display and close the picker.  If the date is
    /// invalid, nothing changes and the picker stays open.
    pub(crate) fn pick_day(
        &mut self,
        display: &mut DisplayController,
        year: i32,
        month: Month,
        day: u8,
    ) -> Result<(), InvalidDateError> {
        display.select(year, month, day)?;
        log::debug!("Picked {}", display.selected());
        self.close();
        Ok(())
    }

    pub(crate) fn pick_cursor(
        &mut self,
        display: &mut DisplayController,
    ) -> Result<(), InvalidDateError> {
        let date = self.cursor;
        self.pick_day(display, date.year(), date.month(), date.day())
    }
}

/// Where a click landed relative to the picker
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PickerHit {
    Cell(Date),
    Inside,
    Outside,
}

/*
 * ......................................
 * .┌──────────── Go To… ─────────────┐.
 * .│           August 2025           │.
 * .│ Su   Mo   Tu   We   Th   Fr   Sa │.
 * .│──────────────────────────────────│.
 * .│ 27   28   29   30   31    1    2 │.
 * .│              ...                 │.
 * .└──── [ ] month · ENTER pick ──────┘.
 * ......................................
 */

/// Screen geometry of the picker within the full terminal area
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PickerLayout {
    outer: Rect,
    block: Rect,
    grid: GridLayout,
}

impl PickerLayout {
    pub(crate) fn new(area: Rect) -> PickerLayout {
        let [outer] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer);
        let block = outer.inner(Margin::new(1, 1));
        let grid = GridLayout::new(block.inner(Margin::new(1, 1)));
        PickerLayout { outer, block, grid }
    }

    pub(crate) fn hit(&self, grid: &MonthGrid, column: u16, row: u16) -> PickerHit {
        if let Some(cell) = self
            .grid
            .cell_at(column, row)
            .and_then(|i| grid.cells().get(i))
        {
            PickerHit::Cell(cell.date)
        } else if self.outer.contains(Position::new(column, row)) {
            PickerHit::Inside
        } else {
            PickerHit::Outside
        }
    }
}

/// Popup drawing the picker's current month over the rest of the screen
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PickerPopup<S> {
    today: Date,
    selected: Date,
    styler: S,
}

impl<S: DateStyler> PickerPopup<S> {
    pub(crate) fn new(today: Date, selected: Date, styler: S) -> Self {
        PickerPopup {
            today,
            selected,
            styler,
        }
    }
}

impl<S: DateStyler> StatefulWidget for PickerPopup<S> {
    type State = Picker;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let layout = PickerLayout::new(area);
        Clear.render(layout.outer, buf);
        Block::new().style(BASE_STYLE).render(layout.outer, buf);
        Block::bordered()
            .title(" Go To… ")
            .title_alignment(Alignment::Center)
            .title_bottom(Line::from(" [ ] month · ENTER pick ").centered())
            .render(layout.block, buf);
        match state.grid(self.today, self.selected) {
            Ok(grid) => MonthGridWidget::new(&grid, self.styler)
                .cursor(state.cursor())
                .render(layout.grid.area(), buf),
            Err(e) => log::debug!("Cannot draw picker for {}: {e}", state.cursor()),
        }
    }
}
