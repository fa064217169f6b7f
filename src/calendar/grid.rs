use super::util::{iter_days_after, iter_days_before, OutOfRangeError, WeekdayExt, DAYS_IN_WEEK};
use std::fmt;
use std::iter::once;
use time::{Date, Month};

/// Number of weeks shown for every month, whether or not the month needs them
const GRID_WEEKS: usize = 6;

pub(crate) const GRID_CELLS: usize = GRID_WEEKS * DAYS_IN_WEEK;

/// A month of a specific year
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    pub(crate) fn of(date: Date) -> YearMonth {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub(crate) fn length(self) -> u8 {
        self.month.length(self.year)
    }

    pub(crate) fn first_day(self) -> Result<Date, OutOfRangeError> {
        self.day(1)
    }

    pub(crate) fn day(self, day: u8) -> Result<Date, OutOfRangeError> {
        Date::from_calendar_date(self.year, self.month, day).map_err(|_| OutOfRangeError)
    }

    pub(crate) fn previous(self) -> YearMonth {
        match self.month {
            Month::January => YearMonth {
                year: self.year - 1,
                month: Month::December,
            },
            m => YearMonth {
                year: self.year,
                month: m.previous(),
            },
        }
    }

    pub(crate) fn next(self) -> YearMonth {
        match self.month {
            Month::December => YearMonth {
                year: self.year + 1,
                month: Month::January,
            },
            m => YearMonth {
                year: self.year,
                month: m.next(),
            },
        }
    }

    /// Move forwards (positive) or backwards (negative) by whole months
    pub(crate) fn step(self, months: i32) -> YearMonth {
        let mut ym = self;
        for _ in 0..months.unsigned_abs() {
            ym = if months < 0 { ym.previous() } else { ym.next() };
        }
        ym
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

/// One day slot of the month grid.  The cell's date is also the key handed
/// back when the cell is activated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GridCell {
    pub(crate) date: Date,
    pub(crate) is_current_month: bool,
    pub(crate) is_today: bool,
    pub(crate) is_selected: bool,
}

impl GridCell {
    pub(crate) fn day(&self) -> u8 {
        self.date.day()
    }
}

/// Six Sunday-first weeks covering a month, padded with the end of the
/// previous month and the start of the next
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    month: YearMonth,
    cells: [GridCell; GRID_CELLS],
}

impl MonthGrid {
    pub(crate) fn render(
        month: YearMonth,
        today: Date,
        selected: Date,
    ) -> Result<MonthGrid, OutOfRangeError> {
        let first = month.first_day()?;
        let leading = usize::from(first.weekday().index0());
        let mut dates = iter_days_before(first).take(leading).collect::<Vec<_>>();
        if dates.len() < leading {
            return Err(OutOfRangeError);
        }
        dates.reverse();
        dates.extend(once(first).chain(iter_days_after(first)).take(GRID_CELLS - leading));
        let cells = dates
            .into_iter()
            .map(|date| {
                let is_current_month = YearMonth::of(date) == month;
                GridCell {
                    date,
                    is_current_month,
                    is_today: is_current_month && date == today,
                    is_selected: is_current_month && date == selected,
                }
            })
            .collect::<Vec<_>>();
        let cells = <[GridCell; GRID_CELLS]>::try_from(cells).map_err(|_| OutOfRangeError)?;
        Ok(MonthGrid { month, cells })
    }

    pub(crate) fn month(&self) -> YearMonth {
        self.month
    }

    pub(crate) fn cells(&self) -> &[GridCell] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn ym(year: i32, month: Month) -> YearMonth {
        YearMonth { year, month }
    }

    #[test]
    fn test_step_wraps_years() {
        assert_eq!(ym(2025, Month::January).previous(), ym(2024, Month::December));
        assert_eq!(ym(2025, Month::December).next(), ym(2026, Month::January));
        assert_eq!(ym(2025, Month::March).step(-14), ym(2024, Month::January));
        assert_eq!(ym(2025, Month::March).step(10), ym(2026, Month::January));
        assert_eq!(ym(2025, Month::March).step(0), ym(2025, Month::March));
    }

    #[test]
    fn test_display() {
        assert_eq!(ym(2025, Month::August).to_string(), "August 2025");
    }

    #[test]
    fn test_august_2025() {
        // August 1, 2025 is a Friday
        let grid = MonthGrid::render(
            ym(2025, Month::August),
            date!(2025 - 08 - 10),
            date!(2025 - 08 - 20),
        )
        .unwrap();
        let cells = grid.cells();
        assert_eq!(cells.len(), GRID_CELLS);
        assert_eq!(cells[0].date, date!(2025 - 07 - 27));
        assert!(!cells[0].is_current_month);
        assert_eq!(cells[4].date, date!(2025 - 07 - 31));
        assert_eq!(cells[5].date, date!(2025 - 08 - 01));
        assert!(cells[5].is_current_month);
        assert_eq!(cells[35].date, date!(2025 - 08 - 31));
        assert_eq!(cells[36].date, date!(2025 - 09 - 01));
        assert_eq!(cells[41].date, date!(2025 - 09 - 06));
        assert_eq!(
            cells.iter().filter(|c| c.is_current_month).count(),
            31
        );
        let today = cells.iter().filter(|c| c.is_today).collect::<Vec<_>>();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].day(), 10);
        let selected = cells.iter().filter(|c| c.is_selected).collect::<Vec<_>>();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].day(), 20);
    }

    #[test]
    fn test_month_starting_on_sunday() {
        // June 1, 2025 is a Sunday, so there is no leading filler
        let grid = MonthGrid::render(
            ym(2025, Month::June),
            date!(2025 - 01 - 01),
            date!(2025 - 01 - 01),
        )
        .unwrap();
        assert_eq!(grid.cells()[0].date, date!(2025 - 06 - 01));
        assert_eq!(grid.cells()[41].date, date!(2025 - 07 - 12));
        assert!(grid.cells().iter().all(|c| !c.is_today && !c.is_selected));
    }

    #[test]
    fn test_every_month_has_42_cells() {
        let mut month = ym(2023, Month::January);
        let today = date!(2024 - 02 - 29);
        for _ in 0..48 {
            let grid = MonthGrid::render(month, today, today).unwrap();
            assert_eq!(grid.cells().len(), GRID_CELLS);
            let expected = usize::from(month == ym(2024, Month::February));
            assert_eq!(grid.cells().iter().filter(|c| c.is_today).count(), expected);
            assert_eq!(
                grid.cells().iter().filter(|c| c.is_selected).count(),
                expected
            );
            assert_eq!(
                grid.cells().iter().filter(|c| c.is_current_month).count(),
                usize::from(month.length())
            );
            month = month.next();
        }
    }

    #[test]
    fn test_filler_from_other_months_is_not_marked() {
        // Dec 31, 2024 appears as filler in the January 2025 grid
        let grid = MonthGrid::render(
            ym(2025, Month::January),
            date!(2024 - 12 - 31),
            date!(2024 - 12 - 31),
        )
        .unwrap();
        assert_eq!(grid.cells()[2].date, date!(2024 - 12 - 31));
        assert!(grid.cells().iter().all(|c| !c.is_today && !c.is_selected));
    }

    #[test]
    fn test_december_wraps_to_january() {
        let grid = MonthGrid::render(
            ym(2025, Month::December),
            date!(2025 - 12 - 25),
            date!(2025 - 12 - 25),
        )
        .unwrap();
        let trailing = grid
            .cells()
            .iter()
            .skip_while(|c| c.date.month() != Month::December)
            .filter(|c| !c.is_current_month)
            .collect::<Vec<_>>();
        assert!(!trailing.is_empty());
        assert!(trailing
            .iter()
            .all(|c| c.date.year() == 2026 && c.date.month() == Month::January));
    }

    #[test]
    fn test_january_wraps_to_december() {
        let grid = MonthGrid::render(
            ym(2025, Month::January),
            date!(2025 - 01 - 19),
            date!(2025 - 01 - 19),
        )
        .unwrap();
        // January 1, 2025 is a Wednesday
        let leading = &grid.cells()[..3];
        assert_eq!(
            leading.iter().map(|c| c.date).collect::<Vec<_>>(),
            [date!(2024 - 12 - 29), date!(2024 - 12 - 30), date!(2024 - 12 - 31)]
        );
        assert!(leading.iter().all(|c| !c.is_current_month));
    }

    #[test]
    fn test_last_month_of_calendar() {
        // There is no January 10000 to pad the final month with
        assert_eq!(
            MonthGrid::render(YearMonth::of(Date::MAX), Date::MAX, Date::MAX),
            Err(OutOfRangeError)
        );
    }
}
