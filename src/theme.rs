use crate::season::PeriodColor;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const MONTH_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const OTHER_MONTH_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const SELECTED_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

pub(crate) const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

const BURGUNDY: Color = Color::Rgb(128, 0, 32);

const GOLD: Color = Color::Rgb(212, 175, 55);

/// Foreground used for a date of the given period when shown in the picker
pub(crate) fn period_style(color: PeriodColor) -> Style {
    Style::new().fg(period_color(color))
}

/// Background and foreground of the day view for the given period
pub(crate) fn background_style(color: PeriodColor) -> Style {
    let bg = period_color(color);
    let fg = match color {
        PeriodColor::White | PeriodColor::Gold => Color::Black,
        _ => Color::White,
    };
    Style::new().fg(fg).bg(bg)
}

fn period_color(color: PeriodColor) -> Color {
    match color {
        PeriodColor::Red => Color::Red,
        PeriodColor::Blue => Color::Blue,
        PeriodColor::Gold => GOLD,
        PeriodColor::Purple => Color::Magenta,
        PeriodColor::White => Color::White,
        PeriodColor::Green => Color::Green,
        PeriodColor::Burgundy => BURGUNDY,
    }
}

pub(crate) mod day {
    use super::*;

    pub(crate) const TITLE_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

    pub(crate) const HEADING_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

    pub(crate) const LOADING_STYLE: Style = Style::new().add_modifier(Modifier::ITALIC);
}
