use crate::theme::BASE_STYLE;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static MENU_TEXT: &[&str] = &[
    "l, RIGHT        Next day",
    "h, LEFT         Previous day",
    "j, DOWN         Next week",
    "k, UP           Previous week",
    "0, HOME         Jump to today",
    "g, ENTER        Pick a date",
    "r               Reload annotations",
    "m               Toggle this menu",
    "c               Contact",
    "q, ESC          Quit",
];

static PICKER_TEXT: &[&str] = &[
    "In the date picker:",
    "  arrows, hjkl  Move between days",
    "  [, PAGE UP    Previous month",
    "  ], PAGE DOWN  Next month",
    "  ENTER, click  Pick the day",
    "  g, q, ESC     Close",
];

/// Side panel listing the available commands
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Menu(pub(crate) Style);

impl Widget for Menu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = MENU_TEXT
            .iter()
            .chain([&""])
            .chain(PICKER_TEXT)
            .map(|&s| Line::raw(s))
            .collect::<Vec<_>>();
        let text = Text::from(lines);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.width);
        let [menu_area] = Layout::horizontal([width]).flex(Flex::End).areas(area);
        Clear.render(menu_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Menu ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0)
            .render(menu_area, buf);
    }
}

/// Popup with contact information for the application
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Contact(pub(crate) Style);

impl Contact {
    fn lines() -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::raw(concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))),
            Line::raw(env!("CARGO_PKG_DESCRIPTION")),
        ];
        let authors = env!("CARGO_PKG_AUTHORS");
        if !authors.is_empty() {
            lines.push(Line::raw(""));
            lines.extend(authors.split(':').map(Line::raw));
        }
        if let Some(repo) = option_env!("CARGO_PKG_REPOSITORY").filter(|s| !s.is_empty()) {
            lines.push(Line::raw(""));
            lines.push(Line::raw(repo));
        }
        lines.push(Line::raw(""));
        lines.push(Line::raw("Press the Any Key to dismiss."));
        lines
    }
}

impl Widget for Contact {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from(Contact::lines());
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Contact ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0);
        let [contact_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [contact_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(contact_area);
        let outer_area = Rect {
            x: contact_area.x.saturating_sub(1),
            y: contact_area.y,
            width: contact_area.width.saturating_add(2),
            height: contact_area.height,
        }
        .intersection(area);
        Clear.render(outer_area, buf);
        Block::new().style(self.0).render(outer_area, buf);
        para.render(contact_area, buf);
    }
}

impl Default for Menu {
    fn default() -> Menu {
        Menu(BASE_STYLE)
    }
}

impl Default for Contact {
    fn default() -> Contact {
        Contact(BASE_STYLE)
    }
}
