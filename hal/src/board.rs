//! # Board Profiles
//!
//! The same firmware drives two boards. Which pins carry what, and which
//! parts of the pipeline run, is described here as data.
//!
//! | Profile              | Features                  |
//! |----------------------|---------------------------|
//! | [`GB_VGA`]           | `VIDEO`, `MUX`, `OSD`     |
//! | [`CONTROLLER_ADAPTER`] | `MUX`, `LEVEL_MUX`      |

use core::fmt::{Display, Formatter};

use embedded_hal::digital::PinState;
use log::info;
use rp2040_hal::Timer as HalTimer;
use rp2040_hal::gpio::Pins;

use gbvga_core::SharedState;

use crate::gpio::{DriveLine, PinBank, SioControllerLink, SioLcdBus, SioPortOutputs, SioResetLine};
use crate::pin_mask;
use crate::select::{PortMux, SelectInputs};
use crate::timer::SystemTimer;

bitflags::bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct Features: u8 {
        /// LCD capture and VGA output.
        const VIDEO     = 0b0000_0001;
        /// NES pad to Game Boy button matrix.
        const MUX       = 0b0000_0010;
        /// On-screen menu. Needs `VIDEO`.
        const OSD       = 0b0000_0100;
        /// Answer the select lines by polling their levels instead of edge
        /// interrupts.
        const LEVEL_MUX = 0b0000_1000;
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LcdPins {
    pub vsync: u8,
    pub hsync: u8,
    pub pixel_clock: u8,
    pub data_0: u8,
    pub data_1: u8,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NesPins {
    pub data: u8,
    pub latch: u8,
    pub pulse: u8,
}

/// Game Boy button lines.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PortPins {
    pub right_a: u8,
    pub left_b: u8,
    pub up_select: u8,
    pub down_start: u8,
}

/// Game Boy select lines, P14 and P15.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SelectPins {
    pub dpad: u8,
    pub other: u8,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    pub name: &'static str,
    pub features: Features,
    pub lcd: Option<LcdPins>,
    pub nes: NesPins,
    pub port: PortPins,
    pub select: SelectPins,
    /// Game Boy reset, active low.
    pub reset: Option<u8>,
    pub led: Option<u8>,
}

pub const GB_VGA: BoardConfig = BoardConfig {
    name: "gb-vga",
    features: Features::VIDEO.union(Features::MUX).union(Features::OSD),
    lcd: Some(LcdPins {
        vsync: 19,
        hsync: 15,
        pixel_clock: 18,
        data_0: 17,
        data_1: 16,
    }),
    nes: NesPins {
        data: 8,
        latch: 9,
        pulse: 10,
    },
    port: PortPins {
        right_a: 22,
        left_b: 28,
        up_select: 26,
        down_start: 27,
    },
    select: SelectPins { dpad: 21, other: 20 },
    reset: Some(14),
    led: Some(25),
};

pub const CONTROLLER_ADAPTER: BoardConfig = BoardConfig {
    name: "nes-controller-gb",
    features: Features::MUX.union(Features::LEVEL_MUX),
    lcd: None,
    nes: NesPins {
        data: 4,
        latch: 3,
        pulse: 2,
    },
    port: PortPins {
        right_a: 20,
        left_b: 16,
        up_select: 19,
        down_start: 18,
    },
    select: SelectPins { dpad: 17, other: 21 },
    reset: None,
    led: None,
};

impl LcdPins {
    pub const fn mask(&self) -> u32 {
        pin_mask(self.vsync) | pin_mask(self.hsync) | pin_mask(self.pixel_clock) | pin_mask(self.data_0) | pin_mask(self.data_1)
    }
}

impl PortPins {
    pub const fn mask(&self) -> u32 {
        pin_mask(self.right_a) | pin_mask(self.left_b) | pin_mask(self.up_select) | pin_mask(self.down_start)
    }
}

impl BoardConfig {
    /// Pins the firmware drives.
    pub fn output_mask(&self) -> u32 {
        let mut mask = pin_mask(self.nes.latch) | pin_mask(self.nes.pulse) | self.port.mask();
        if let Some(reset) = self.reset {
            mask |= pin_mask(reset);
        }
        if let Some(led) = self.led {
            mask |= pin_mask(led);
        }
        mask
    }

    /// Pins the firmware samples.
    pub fn input_mask(&self) -> u32 {
        let lcd = self.lcd.map_or(0, |lcd| lcd.mask());
        lcd | pin_mask(self.nes.data) | pin_mask(self.select.dpad) | pin_mask(self.select.other)
    }

    /// Whether the select lines are answered from edge interrupts.
    pub fn uses_select_interrupts(&self) -> bool {
        self.features.contains(Features::MUX) && !self.features.contains(Features::LEVEL_MUX)
    }

    /// Claims every pin the board uses and sets its direction and idle
    /// level: button lines and reset high, NES strobes and LED low. Arms the
    /// select-line edge interrupts for the calling core on edge boards; the
    /// caller unmasks `IO_IRQ_BANK0` once the handler owns [`Board::port`].
    pub fn init<'a>(&self, pins: Pins, timer: HalTimer, shared: &'a SharedState) -> Result<Board<'a>, BoardError> {
        let mut bank = PinBank::new(pins);

        let lcd = self.lcd.map(|lcd| SioLcdBus::claim(lcd, &mut bank)).transpose()?;
        let pad = SioControllerLink::claim(self.nes, &mut bank)?;
        let outputs = SioPortOutputs::claim(self.port, &mut bank)?;
        let mut select = SelectInputs::new(bank.input(self.select.dpad)?, bank.input(self.select.other)?);
        let reset = self.reset.map(|pin| SioResetLine::claim(pin, &mut bank)).transpose()?;
        let led = self.led.map(|pin| bank.output(pin, PinState::Low)).transpose()?;

        if self.uses_select_interrupts() {
            select.arm();
        }

        info!(
            "{} pins ready, features {:?}, out {:#010x} in {:#010x}",
            self.name,
            self.features,
            self.output_mask(),
            self.input_mask()
        );
        Ok(Board {
            lcd,
            pad,
            port: PortMux::new(select, outputs, shared),
            reset,
            led,
            timer: SystemTimer::new(timer),
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The pin does not exist or a profile names it twice.
    PinUnavailable(u8),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::PinUnavailable(pin) => write!(f, "gpio{pin} is missing or already claimed"),
        }
    }
}

impl core::error::Error for BoardError {}

/// Everything [`BoardConfig::init`] claimed, ready to hand to the contexts.
pub struct Board<'a> {
    pub lcd: Option<SioLcdBus>,
    pub pad: SioControllerLink,
    pub port: PortMux<'a>,
    pub reset: Option<SioResetLine>,
    pub led: Option<DriveLine>,
    pub timer: SystemTimer,
}
