mod grid;
mod util;
mod widget;
pub(crate) use self::grid::{MonthGrid, YearMonth};
pub(crate) use self::util::{add_days, OutOfRangeError};
pub(crate) use self::widget::{GridLayout, MonthGridWidget, GRID_HEIGHT, GRID_WIDTH};
use ratatui::style::Style;
use time::Date;

pub(crate) trait DateStyler {
    fn date_style(&self, date: Date) -> Style;
}

impl<T: DateStyler + ?Sized> DateStyler for &T {
    fn date_style(&self, date: Date) -> Style {
        (**self).date_style(date)
    }
}
