//! Pin-level implementations of the core's hardware traits.

use bit_field::BitField;
use embedded_hal::digital::{InputPin, OutputPin, PinState};
use rp2040_hal::Sio;
use rp2040_hal::gpio::{DynPinId, FunctionNull, FunctionSioInput, FunctionSioOutput, Pin, Pins, PullDown, PullNone, PullUp};

use gbvga_core::pins::{ControllerLink, LcdBus, LcdLines, PortLines, PortOutputs, ResetLine};

use crate::board::{BoardError, LcdPins, NesPins, PortPins};

pub const GPIO_COUNT: usize = 30;

/// A bank 0 pin as `Pins::new` leaves it.
pub type UnusedPin = Pin<DynPinId, FunctionNull, PullDown>;
pub type SenseLine = Pin<DynPinId, FunctionSioInput, PullNone>;
pub type PulledLine = Pin<DynPinId, FunctionSioInput, PullUp>;
pub type DriveLine = Pin<DynPinId, FunctionSioOutput, PullNone>;

macro_rules! dyn_bank {
    ($pins:ident: $($gpio:ident)*) => {
        [$(Some($pins.$gpio.into_dyn_pin()),)*]
    };
}

/// Bank 0 pins handed out by number, each at most once.
pub struct PinBank([Option<UnusedPin>; GPIO_COUNT]);

impl PinBank {
    pub fn new(pins: Pins) -> Self {
        Self(dyn_bank!(pins:
            gpio0 gpio1 gpio2 gpio3 gpio4 gpio5 gpio6 gpio7 gpio8 gpio9
            gpio10 gpio11 gpio12 gpio13 gpio14 gpio15 gpio16 gpio17 gpio18 gpio19
            gpio20 gpio21 gpio22 gpio23 gpio24 gpio25 gpio26 gpio27 gpio28 gpio29
        ))
    }

    pub fn take(&mut self, num: u8) -> Result<UnusedPin, BoardError> {
        self.0
            .get_mut(num as usize)
            .and_then(Option::take)
            .ok_or(BoardError::PinUnavailable(num))
    }

    pub fn input(&mut self, num: u8) -> Result<SenseLine, BoardError> {
        self.take(num)?
            .try_into_function::<FunctionSioInput>()
            .map(Pin::into_pull_type::<PullNone>)
            .map_err(|_| BoardError::PinUnavailable(num))
    }

    pub fn pulled_up(&mut self, num: u8) -> Result<PulledLine, BoardError> {
        self.take(num)?
            .try_into_function::<FunctionSioInput>()
            .map(Pin::into_pull_type::<PullUp>)
            .map_err(|_| BoardError::PinUnavailable(num))
    }

    pub fn output(&mut self, num: u8, idle: PinState) -> Result<DriveLine, BoardError> {
        let mut pin = self
            .take(num)?
            .into_pull_type::<PullNone>()
            .try_into_function::<FunctionSioOutput>()
            .map_err(|_| BoardError::PinUnavailable(num))?;
        let Ok(()) = pin.set_state(idle);
        Ok(pin)
    }
}

/// Picks the five LCD lines out of one bank 0 input word.
#[inline(always)]
pub fn lcd_lines(word: u32, pins: &LcdPins) -> LcdLines {
    let mut lines = LcdLines::empty();
    lines.set(LcdLines::VSYNC, word.get_bit(pins.vsync as usize));
    lines.set(LcdLines::HSYNC, word.get_bit(pins.hsync as usize));
    lines.set(LcdLines::PIXEL_CLOCK, word.get_bit(pins.pixel_clock as usize));
    lines.set(LcdLines::DATA_0, word.get_bit(pins.data_0 as usize));
    lines.set(LcdLines::DATA_1, word.get_bit(pins.data_1 as usize));
    lines
}

/// Button lines in the order [`SioPortOutputs`] holds their pins.
const PORT_ORDER: [PortLines; 4] = [
    PortLines::RIGHT_A,
    PortLines::LEFT_B,
    PortLines::UP_SELECT,
    PortLines::DOWN_START,
];

/// Pin levels that put the button lines at `lines`.
pub fn port_states(lines: PortLines) -> [PinState; 4] {
    PORT_ORDER.map(|flag| PinState::from(lines.contains(flag)))
}

/// The LCD lines, sampled together with one read of `GPIO_IN`.
pub struct SioLcdBus {
    pins: LcdPins,
    _lines: [SenseLine; 5],
}

impl SioLcdBus {
    pub fn claim(pins: LcdPins, bank: &mut PinBank) -> Result<Self, BoardError> {
        let lines = [
            bank.input(pins.vsync)?,
            bank.input(pins.hsync)?,
            bank.input(pins.pixel_clock)?,
            bank.input(pins.data_0)?,
            bank.input(pins.data_1)?,
        ];
        Ok(Self { pins, _lines: lines })
    }
}

impl LcdBus for SioLcdBus {
    #[inline(always)]
    fn sample(&mut self) -> LcdLines {
        lcd_lines(Sio::read_bank0(), &self.pins)
    }
}

pub struct SioControllerLink {
    latch: DriveLine,
    pulse: DriveLine,
    data: PulledLine,
}

impl SioControllerLink {
    pub fn claim(pins: NesPins, bank: &mut PinBank) -> Result<Self, BoardError> {
        Ok(Self {
            latch: bank.output(pins.latch, PinState::Low)?,
            pulse: bank.output(pins.pulse, PinState::Low)?,
            data: bank.pulled_up(pins.data)?,
        })
    }
}

impl ControllerLink for SioControllerLink {
    fn set_latch(&mut self, high: bool) {
        let Ok(()) = self.latch.set_state(PinState::from(high));
    }

    fn set_pulse(&mut self, high: bool) {
        let Ok(()) = self.pulse.set_state(PinState::from(high));
    }

    fn read_data(&mut self) -> bool {
        let Ok(high) = self.data.is_high();
        high
    }
}

/// The four Game Boy button lines, idle high.
pub struct SioPortOutputs {
    lines: [DriveLine; 4],
}

impl SioPortOutputs {
    pub fn claim(pins: PortPins, bank: &mut PinBank) -> Result<Self, BoardError> {
        Ok(Self {
            lines: [
                bank.output(pins.right_a, PinState::High)?,
                bank.output(pins.left_b, PinState::High)?,
                bank.output(pins.up_select, PinState::High)?,
                bank.output(pins.down_start, PinState::High)?,
            ],
        })
    }
}

impl PortOutputs for SioPortOutputs {
    #[inline(always)]
    fn drive(&mut self, lines: PortLines) {
        for (line, state) in self.lines.iter_mut().zip(port_states(lines)) {
            let Ok(()) = line.set_state(state);
        }
    }
}

pub struct SioResetLine {
    line: DriveLine,
}

impl SioResetLine {
    /// Claims `pin` released, that is high.
    pub fn claim(pin: u8, bank: &mut PinBank) -> Result<Self, BoardError> {
        Ok(Self {
            line: bank.output(pin, PinState::High)?,
        })
    }
}

impl ResetLine for SioResetLine {
    fn set_reset(&mut self, asserted: bool) {
        let Ok(()) = self.line.set_state(PinState::from(!asserted));
    }
}

/// Boards without a reset line.
pub struct NoReset;

impl ResetLine for NoReset {
    fn set_reset(&mut self, _asserted: bool) {}
}
