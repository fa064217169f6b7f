use crate::display::{DayWidget, DisplayController};
use crate::menu::{Contact, Menu};
use crate::picker::{Picker, PickerHit, PickerLayout, PickerPopup};
use crate::store::DataLoad;
use crossterm::event::{
    poll, read, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use time::Date;

/// How long to wait for input before checking on a pending data load
const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub(crate) struct App {
    today: Date,
    display: DisplayController,
    picker: Picker,
    state: AppState,
    data_path: PathBuf,
    pending: Option<DataLoad>,
    // Area of the last draw, used to work out what a mouse click hit
    area: Rect,
}

impl App {
    pub(crate) fn new(today: Date, display: DisplayController, data_path: PathBuf) -> App {
        let picker = Picker::new(display.selected());
        App {
            today,
            display,
            picker,
            state: AppState::Day,
            data_path,
            pending: None,
            area: Rect::default(),
        }
    }

    /// Start the app with annotations still loading in the background
    pub(crate) fn loading(mut self, load: DataLoad) -> App {
        self.pending = Some(load);
        self
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(&mut *self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        // While data is loading, wake up periodically so that it can be shown
        // as soon as it arrives.
        if self.pending.is_some() && !poll(LOAD_POLL_INTERVAL)? {
            self.check_pending();
            return Ok(());
        }
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        let event = read()?;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        } else if let Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) = event
        {
            self.handle_click(column, row);
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        self.check_pending();
        Ok(())
    }

    fn check_pending(&mut self) {
        let Some(load) = self.pending.as_ref() else {
            return;
        };
        if let Some(data) = load.try_finish() {
            log::debug!("Annotations from {} are ready", load.path().display());
            self.pending = None;
            self.display.replace_data(data);
        }
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        log::debug!("Key {key:?} in state {:?}", self.state);
        if self.picker.is_open() {
            return self.handle_picker_key(key);
        }
        match self.state {
            AppState::Day => match key {
                KeyCode::Char('l') | KeyCode::Right => self.display.advance(1).is_ok(),
                KeyCode::Char('h') | KeyCode::Left => self.display.advance(-1).is_ok(),
                KeyCode::Char('j') | KeyCode::Down => self.display.advance(7).is_ok(),
                KeyCode::Char('k') | KeyCode::Up => self.display.advance(-7).is_ok(),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.display.select_date(self.today);
                    true
                }
                KeyCode::Char('g') | KeyCode::Enter => {
                    self.picker.open(self.display.selected());
                    true
                }
                KeyCode::Char('m' | '?') => {
                    self.state = AppState::Menu;
                    true
                }
                KeyCode::Char('r') => self.reload(),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Menu => match key {
                KeyCode::Char('c') => {
                    self.state = AppState::Contact;
                    true
                }
                KeyCode::Char('m' | '?' | 'q') | KeyCode::Esc => {
                    self.state = AppState::Day;
                    true
                }
                _ => false,
            },
            AppState::Contact => {
                self.state = AppState::Day;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn handle_picker_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('l') | KeyCode::Right => self.picker.move_cursor(1).is_ok(),
            KeyCode::Char('h') | KeyCode::Left => self.picker.move_cursor(-1).is_ok(),
            KeyCode::Char('j') | KeyCode::Down => self.picker.move_cursor(7).is_ok(),
            KeyCode::Char('k') | KeyCode::Up => self.picker.move_cursor(-7).is_ok(),
            KeyCode::Char('[') | KeyCode::PageUp => self.picker.step_month(-1).is_ok(),
            KeyCode::Char(']') | KeyCode::PageDown => self.picker.step_month(1).is_ok(),
            KeyCode::Enter => self.picker.pick_cursor(&mut self.display).is_ok(),
            KeyCode::Char('g' | 'q') | KeyCode::Esc => {
                self.picker.close();
                true
            }
            _ => false,
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        if !self.picker.is_open() {
            return;
        }
        let Ok(grid) = self.picker.grid(self.today, self.display.selected()) else {
            return;
        };
        match PickerLayout::new(self.area).hit(&grid, column, row) {
            PickerHit::Cell(date) => {
                if let Err(e) =
                    self.picker
                        .pick_day(&mut self.display, date.year(), date.month(), date.day())
                {
                    log::warn!("{e}");
                }
            }
            PickerHit::Outside => self.picker.close(),
            PickerHit::Inside => (),
        }
    }

    // Returns `false` if a load is already in progress
    fn reload(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        log::info!("Reloading annotations from {}", self.data_path.display());
        self.pending = Some(DataLoad::spawn(self.data_path.clone()));
        true
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.area = area;
        DayWidget::new(&self.display)
            .loading(self.pending.is_some())
            .render(area, buf);
        if self.picker.is_open() {
            PickerPopup::new(
                self.today,
                self.display.selected(),
                self.display.seasons(),
            )
            .render(area, buf, &mut self.picker);
        } else if self.state == AppState::Menu {
            Menu::default().render(area, buf);
        } else if self.state == AppState::Contact {
            Contact::default().render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Day,
    Menu,
    Contact,
    Quitting,
}
