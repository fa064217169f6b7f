use crate::calendar::DateStyler;
use crate::locale::Locale;
use crate::theme::period_style;
use ratatui::style::Style;
use time::{macros::date, Date, Month};

/// The liturgical period that a date falls in.  Exactly one applies to any
/// date.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum SeasonPeriod {
    AfterChristmas,
    Epiphany,
    GreatFast,
    PaschaSeason,
    ApostlesFast,
    VirginsFast,
    ChristmasFast,
    Ordinary,
}

impl SeasonPeriod {
    pub(crate) fn color(self) -> PeriodColor {
        match self {
            SeasonPeriod::AfterChristmas => PeriodColor::Red,
            SeasonPeriod::Epiphany | SeasonPeriod::ChristmasFast => PeriodColor::Blue,
            SeasonPeriod::GreatFast => PeriodColor::Purple,
            SeasonPeriod::PaschaSeason => PeriodColor::White,
            SeasonPeriod::ApostlesFast => PeriodColor::Green,
            SeasonPeriod::VirginsFast => PeriodColor::Burgundy,
            SeasonPeriod::Ordinary => PeriodColor::Gold,
        }
    }

    /// Name of the period as shown in the day view
    pub(crate) fn name(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (SeasonPeriod::AfterChristmas, Locale::Arabic) => "ما بعد الميلاد",
            (SeasonPeriod::Epiphany, Locale::Arabic) => "عيد الغطاس",
            (SeasonPeriod::GreatFast, Locale::Arabic) => "الصوم الكبير",
            (SeasonPeriod::PaschaSeason, Locale::Arabic) => "الخمسين المقدسة",
            (SeasonPeriod::ApostlesFast, Locale::Arabic) => "صوم الرسل",
            (SeasonPeriod::VirginsFast, Locale::Arabic) => "صوم السيدة العذراء",
            (SeasonPeriod::ChristmasFast, Locale::Arabic) => "صوم الميلاد",
            (SeasonPeriod::Ordinary, Locale::Arabic) => "الزمن العادي",
            (SeasonPeriod::AfterChristmas, Locale::English) => "After Christmas",
            (SeasonPeriod::Epiphany, Locale::English) => "Epiphany",
            (SeasonPeriod::GreatFast, Locale::English) => "Great Fast",
            (SeasonPeriod::PaschaSeason, Locale::English) => "Pascha",
            (SeasonPeriod::ApostlesFast, Locale::English) => "Apostles' Fast",
            (SeasonPeriod::VirginsFast, Locale::English) => "Virgin's Fast",
            (SeasonPeriod::ChristmasFast, Locale::English) => "Christmas Fast",
            (SeasonPeriod::Ordinary, Locale::English) => "Ordinary Time",
        }
    }
}

/// Display color tag of a period
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum PeriodColor {
    Red,
    Blue,
    Gold,
    Purple,
    White,
    Green,
    Burgundy,
}

/// Source of the Pascha date that the movable periods are measured from
pub(crate) trait ReferenceDateResolver {
    /// Returns `None` if the resolver has no Pascha to offer for `date`
    fn reference_pascha(&self, date: Date) -> Option<Date>;
}

impl<T: ReferenceDateResolver + ?Sized> ReferenceDateResolver for &T {
    fn reference_pascha(&self, date: Date) -> Option<Date> {
        (**self).reference_pascha(date)
    }
}

/// A short table of known Pascha dates.  This is an approximation that is only
/// meaningful for dates from 2024 through 2026; anything outside that range
/// gets whichever table entry the selection rules land on.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct PaschaTable;

const PASCHA_2024: Date = date!(2024 - 05 - 05);
const PASCHA_2025: Date = date!(2025 - 04 - 20);
const PASCHA_2026: Date = date!(2026 - 04 - 12);
const NEW_YEAR_2025: Date = date!(2025 - 01 - 01);

impl ReferenceDateResolver for PaschaTable {
    fn reference_pascha(&self, date: Date) -> Option<Date> {
        let mut pascha = PASCHA_2024;
        if date > PASCHA_2024 && date <= NEW_YEAR_2025 {
            pascha = PASCHA_2025;
        } else if date > NEW_YEAR_2025 {
            pascha = PASCHA_2026;
        }
        match date.year() {
            2025 => pascha = PASCHA_2025,
            2026 => pascha = PASCHA_2026,
            _ => (),
        }
        Some(pascha)
    }
}

/// Classifies dates into liturgical periods.  The rules are checked in a fixed
/// order and the first one that matches wins, as the ranges overlap.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Seasons<R = PaschaTable>(R);

impl<R: ReferenceDateResolver> Seasons<R> {
    pub(crate) fn new(resolver: R) -> Seasons<R> {
        Seasons(resolver)
    }

    pub(crate) fn classify(&self, date: Date) -> SeasonPeriod {
        let month = date.month();
        let day = date.day();
        if month == Month::January && (7..=19).contains(&day) {
            return if day == 19 {
                SeasonPeriod::Epiphany
            } else {
                SeasonPeriod::AfterChristmas
            };
        }
        if let Some(pascha) = self.0.reference_pascha(date) {
            let since_pascha = (date - pascha).whole_days();
            if (-49..0).contains(&since_pascha) {
                return SeasonPeriod::GreatFast;
            }
            if (0..=50).contains(&since_pascha) {
                return SeasonPeriod::PaschaSeason;
            }
        }
        match (month, day) {
            (Month::June, _) => SeasonPeriod::ApostlesFast,
            (Month::August, 1..=14) => SeasonPeriod::VirginsFast,
            (Month::November, 28..) | (Month::December, _) | (Month::January, ..=6) => {
                SeasonPeriod::ChristmasFast
            }
            _ => SeasonPeriod::Ordinary,
        }
    }
}

impl<R: ReferenceDateResolver> DateStyler for Seasons<R> {
    fn date_style(&self, date: Date) -> Style {
        period_style(self.classify(date).color())
    }
}
