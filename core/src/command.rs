//! Menu state machine driven by pad button releases.

use core::fmt::Write;

use heapless::String;
use log::{debug, warn};

use crate::config::RESET_PULSE_US;
use crate::input::{Button, ButtonState};
use crate::osd::{OsdRenderer, OSD_CHARS_PER_LINE};
use crate::palette::PaletteTable;
use crate::pins::{ResetLine, Timer};
use crate::settings::VideoSettings;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuLine {
    Palette,
    Effect,
    ScanlineTint,
    ResetConsole,
    Exit,
    Help,
}

impl MenuLine {
    pub const ALL: [MenuLine; 6] = [
        MenuLine::Palette,
        MenuLine::Effect,
        MenuLine::ScanlineTint,
        MenuLine::ResetConsole,
        MenuLine::Exit,
        MenuLine::Help,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// What a tick of the interpreter did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    ToggleMenu { enabled: bool },
    MoveLine { line: usize },
    CycleScheme { offset: usize },
    CycleEffect,
    CycleTint { index: u8 },
    ResetConsole,
    ExitMenu,
}

pub struct CommandInterpreter<'a, R> {
    previous: ButtonState,
    osd: OsdRenderer<'a>,
    settings: &'a VideoSettings,
    palette: &'a PaletteTable,
    reset: R,
}

impl<'a, R: ResetLine> CommandInterpreter<'a, R> {
    pub fn new(osd: OsdRenderer<'a>, settings: &'a VideoSettings, palette: &'a PaletteTable, mut reset: R) -> Self {
        reset.set_reset(false);
        Self {
            previous: ButtonState::RELEASED,
            osd,
            settings,
            palette,
            reset,
        }
    }

    pub fn osd(&self) -> &OsdRenderer<'a> {
        &self.osd
    }

    pub fn reset_line(&mut self) -> &mut R {
        &mut self.reset
    }

    /// Writes every menu line from the current settings.
    pub fn refresh_menu_text(&mut self) {
        for line in MenuLine::ALL {
            self.refresh_line(line);
        }
    }

    fn refresh_line(&mut self, line: MenuLine) {
        let mut text: String<OSD_CHARS_PER_LINE> = String::new();
        let written = match line {
            MenuLine::Palette => write!(text, "PAL: {}", self.palette.scheme_name(self.settings.scheme_offset())),
            MenuLine::Effect => write!(text, "FX: {}", self.settings.effect().name()),
            MenuLine::ScanlineTint => write!(text, "LINE COLOR: {}", self.settings.tint_index()),
            MenuLine::ResetConsole => write!(text, "RESET GAME"),
            MenuLine::Exit => write!(text, "EXIT"),
            MenuLine::Help => write!(text, "SELECT START: MENU"),
        };
        if written.is_err() {
            warn!("menu line {:?} cut short: {:?}", line, text.as_str());
        }
        self.osd.set_line_text(line as usize, &text);
    }

    /// Runs one tick against the latest pad snapshot.
    pub fn evaluate<T: Timer + ?Sized>(&mut self, current: ButtonState, timer: &mut T) -> Option<Command> {
        let command = self.decide(current, timer);
        self.previous = current;
        if let Some(command) = command {
            debug!("menu command {:?}", command);
        }
        command
    }

    fn decide<T: Timer + ?Sized>(&mut self, current: ButtonState, timer: &mut T) -> Option<Command> {
        let previous = self.previous;
        let released = |button| current.just_released(previous, button);

        if current.is_pressed(Button::Select) {
            if released(Button::Start) {
                let enabled = self.osd.toggle();
                if enabled {
                    self.osd.render();
                }
                return Some(Command::ToggleMenu { enabled });
            }
            return None;
        }

        if !self.osd.overlay().is_enabled() {
            return None;
        }

        if released(Button::Down) {
            self.osd.change_active_line(1);
            return Some(Command::MoveLine { line: self.osd.active_line() });
        }
        if released(Button::Up) {
            self.osd.change_active_line(-1);
            return Some(Command::MoveLine { line: self.osd.active_line() });
        }

        let direction = if released(Button::Left) {
            -1
        } else if released(Button::Right) || released(Button::A) {
            1
        } else {
            return None;
        };

        self.apply(MenuLine::from_index(self.osd.active_line())?, direction, timer)
    }

    fn apply<T: Timer + ?Sized>(&mut self, line: MenuLine, direction: i8, timer: &mut T) -> Option<Command> {
        let command = match line {
            MenuLine::Palette => {
                self.settings.cycle_scheme(self.palette, direction);
                Command::CycleScheme { offset: self.settings.scheme_offset() }
            }
            MenuLine::Effect => {
                self.settings.cycle_effect(direction);
                Command::CycleEffect
            }
            MenuLine::ScanlineTint => {
                self.settings.cycle_scanline_tint(self.palette, direction);
                Command::CycleTint { index: self.settings.tint_index() }
            }
            MenuLine::ResetConsole => {
                self.reset.set_reset(true);
                timer.delay_us(RESET_PULSE_US);
                self.reset.set_reset(false);
                return Some(Command::ResetConsole);
            }
            MenuLine::Exit => {
                self.osd.toggle();
                return Some(Command::ExitMenu);
            }
            MenuLine::Help => return None,
        };
        self.refresh_line(line);
        self.osd.render();
        Some(command)
    }
}
