use crate::calendar::{add_days, OutOfRangeError};
use crate::locale::Locale;
use crate::season::{SeasonPeriod, Seasons};
use crate::store::CalendarData;
use crate::theme::{background_style, day::*};
use ratatui::{
    buffer::Buffer,
    layout::{Margin, Rect},
    text::{Line, Text},
    widgets::{Block, Paragraph, Widget, Wrap},
};
use thiserror::Error;
use time::{Date, Month};

/// Owns the selected date and everything shown about it.  Every change to the
/// date or the data rebuilds the whole [`DayView`] before it is swapped in.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DisplayController {
    selected: Date,
    data: CalendarData,
    locale: Locale,
    seasons: Seasons,
    view: DayView,
}

impl DisplayController {
    pub(crate) fn new(selected: Date, data: CalendarData, locale: Locale) -> DisplayController {
        let seasons = Seasons::default();
        let view = DayView::compute(selected, &data, locale, &seasons);
        DisplayController {
            selected,
            data,
            locale,
            seasons,
            view,
        }
    }

    pub(crate) fn selected(&self) -> Date {
        self.selected
    }

    pub(crate) fn view(&self) -> &DayView {
        &self.view
    }

    pub(crate) fn locale(&self) -> Locale {
        self.locale
    }

    pub(crate) fn seasons(&self) -> &Seasons {
        &self.seasons
    }

    /// Move the selected date by `days`, which may be negative
    pub(crate) fn advance(&mut self, days: i64) -> Result<(), OutOfRangeError> {
        let date = add_days(self.selected, days)?;
        self.select_date(date);
        Ok(())
    }

    /// Select a date given as calendar components.  A day that does not exist
    /// in the month is rejected and leaves the selection unchanged.
    pub(crate) fn select(
        &mut self,
        year: i32,
        month: Month,
        day: u8,
    ) -> Result<(), InvalidDateError> {
        let date = Date::from_calendar_date(year, month, day)
            .map_err(|_| InvalidDateError {
                year,
                month: month.into(),
                day,
            })?;
        self.select_date(date);
        Ok(())
    }

    pub(crate) fn select_date(&mut self, date: Date) {
        self.selected = date;
        self.recompute();
    }

    /// Swap in a freshly loaded data set
    pub(crate) fn replace_data(&mut self, data: CalendarData) {
        self.data = data;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.view = DayView::compute(self.selected, &self.data, self.locale, &self.seasons);
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("{year}-{month:02}-{day:02} is not a valid date")]
pub(crate) struct InvalidDateError {
    year: i32,
    month: u8,
    day: u8,
}

/// Everything displayed for the selected date.  An annotation that is `None`
/// has its section hidden.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DayView {
    pub(crate) weekday: &'static str,
    pub(crate) date_text: String,
    pub(crate) fast: Option<String>,
    pub(crate) holiday: Option<String>,
    pub(crate) special_day: Option<String>,
    pub(crate) saints: Option<String>,
    pub(crate) period: SeasonPeriod,
}

impl DayView {
    fn compute(date: Date, data: &CalendarData, locale: Locale, seasons: &Seasons) -> DayView {
        let record = data.lookup(date);
        let text = |field: Option<&String>| field.filter(|s| !s.is_empty()).cloned();
        DayView {
            weekday: locale.weekday_name(date.weekday()),
            date_text: locale.date_text(date),
            fast: text(record.and_then(|r| r.fast.as_ref())),
            holiday: text(record.and_then(|r| r.holiday.as_ref())),
            special_day: text(record.and_then(|r| r.special_day.as_ref())),
            saints: record
                .filter(|r| !r.saints.is_empty())
                .map(|r| r.saints.join(locale.list_separator())),
            period: seasons.classify(date),
        }
    }

    /// The sections that are currently visible, in display order
    pub(crate) fn sections(&self) -> impl Iterator<Item = (Section, &str)> + '_ {
        [
            (Section::Fast, self.fast.as_deref()),
            (Section::Holiday, self.holiday.as_deref()),
            (Section::SpecialDay, self.special_day.as_deref()),
            (Section::Saints, self.saints.as_deref()),
        ]
        .into_iter()
        .filter_map(|(sect, text)| Some((sect, text?)))
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Section {
    Fast,
    Holiday,
    SpecialDay,
    Saints,
}

impl Section {
    pub(crate) fn heading(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Section::Fast, Locale::Arabic) => "الصوم",
            (Section::Holiday, Locale::Arabic) => "العيد",
            (Section::SpecialDay, Locale::Arabic) => "مناسبة خاصة",
            (Section::Saints, Locale::Arabic) => "القديسون",
            (Section::Fast, Locale::English) => "Fast",
            (Section::Holiday, Locale::English) => "Holiday",
            (Section::SpecialDay, Locale::English) => "Special Day",
            (Section::Saints, Locale::English) => "Saints",
        }
    }
}

/// Full-screen view of the selected day, painted in its season's color
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DayWidget<'a> {
    view: &'a DayView,
    locale: Locale,
    loading: bool,
}

impl<'a> DayWidget<'a> {
    pub(crate) fn new(display: &'a DisplayController) -> Self {
        DayWidget {
            view: display.view(),
            locale: display.locale(),
            loading: false,
        }
    }

    /// Note that annotations are still being loaded
    pub(crate) fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    fn to_text(self) -> Text<'a> {
        let mut lines = vec![
            Line::styled(self.view.weekday, TITLE_STYLE),
            Line::raw(self.view.date_text.as_str()),
            Line::raw(self.view.period.name(self.locale)),
        ];
        for (sect, text) in self.view.sections() {
            lines.push(Line::raw(""));
            lines.push(Line::styled(sect.heading(self.locale), HEADING_STYLE));
            lines.push(Line::raw(text));
        }
        if self.loading {
            lines.push(Line::raw(""));
            lines.push(Line::styled("Loading annotations…", LOADING_STYLE));
        }
        Text::from(lines).centered()
    }
}

impl Widget for DayWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = background_style(self.view.period.color());
        Block::new().style(style).render(area, buf);
        Paragraph::new(self.to_text())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(area.inner(Margin::new(2, 1)), buf);
    }
}
