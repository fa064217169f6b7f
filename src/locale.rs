use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{Date, Month, Weekday};

static ARABIC_WEEKDAYS: [&str; 7] = [
    "الأحد",
    "الإثنين",
    "الثلاثاء",
    "الأربعاء",
    "الخميس",
    "الجمعة",
    "السبت",
];

static ARABIC_MONTHS: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

static ENGLISH_WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Language used for the day view.  The month-grid picker always uses English
/// names.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum Locale {
    #[default]
    Arabic,
    English,
}

impl Locale {
    pub(crate) fn weekday_name(self, wd: Weekday) -> &'static str {
        let i = usize::from(wd.number_days_from_sunday());
        match self {
            Locale::Arabic => ARABIC_WEEKDAYS[i],
            Locale::English => ENGLISH_WEEKDAYS[i],
        }
    }

    pub(crate) fn month_name(self, month: Month) -> String {
        match self {
            Locale::Arabic => String::from(ARABIC_MONTHS[usize::from(u8::from(month) - 1)]),
            Locale::English => month.to_string(),
        }
    }

    /// Long form of a date, e.g. "10 August 2025"
    pub(crate) fn date_text(self, date: Date) -> String {
        format!(
            "{} {} {}",
            date.day(),
            self.month_name(date.month()),
            date.year()
        )
    }

    /// Separator placed between the names of commemorated saints
    pub(crate) fn list_separator(self) -> &'static str {
        match self {
            Locale::Arabic => "، ",
            Locale::English => ", ",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Arabic => write!(f, "ar"),
            Locale::English => write!(f, "en"),
        }
    }
}

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Locale, ParseLocaleError> {
        match s.to_ascii_lowercase().as_str() {
            "ar" | "arabic" => Ok(Locale::Arabic),
            "en" | "english" => Ok(Locale::English),
            _ => Err(ParseLocaleError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown locale {0:?}; expected \"ar\" or \"en\"")]
pub(crate) struct ParseLocaleError(String);
