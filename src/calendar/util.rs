use std::iter::successors;
use thiserror::Error;
use time::{Date, Duration, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

/// Move `date` by `days` (which may be negative)
pub(crate) fn add_days(date: Date, days: i64) -> Result<Date, OutOfRangeError> {
    date.checked_add(Duration::days(days))
        .ok_or(OutOfRangeError)
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of the calendar")]
pub(crate) struct OutOfRangeError;

pub(super) fn iter_days_after(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day()).skip(1)
}

pub(super) fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}
