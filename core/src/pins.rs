//! # Hardware Seams
//!
//! Everything the firmware touches on the board goes through one of these
//! traits, so the capture and controller logic runs unchanged against the
//! RP2040 SIO block or a host-side simulation.
//!
//! | Trait            | Direction | Lines                                        |
//! |------------------|-----------|----------------------------------------------|
//! | [`LcdBus`]       | in        | VSYNC, HSYNC, PIXEL_CLOCK, DATA_0, DATA_1    |
//! | [`ControllerLink`] | both    | NES LATCH, PULSE out and DATA in             |
//! | [`PortOutputs`]  | out       | the four Game Boy button lines               |
//! | [`ResetLine`]    | out       | Game Boy reset, active low                   |
//! | [`Timer`]        | -         | free-running microsecond counter             |

bitflags::bitflags! {
    /// One sample of the Game Boy LCD bus.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
    pub struct LcdLines: u8 {
        /// High for the first row of a frame.
        const VSYNC       = 0b0000_0001;
        /// Pulses high then low before the first pixel of each row.
        const HSYNC       = 0b0000_0010;
        /// Data is valid while the clock is low.
        const PIXEL_CLOCK = 0b0000_0100;
        /// High bit of the 2-bit pixel.
        const DATA_0      = 0b0000_1000;
        /// Low bit of the 2-bit pixel.
        const DATA_1      = 0b0001_0000;
    }

    /// The four button lines on the Game Boy side. A set bit drives the line
    /// high, which the console reads as released.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct PortLines: u8 {
        const RIGHT_A    = 0b0000_0001;
        const LEFT_B     = 0b0000_0010;
        const UP_SELECT  = 0b0000_0100;
        const DOWN_START = 0b0000_1000;
    }
}

impl LcdLines {
    #[inline(always)]
    pub fn vsync(self) -> bool {
        self.contains(LcdLines::VSYNC)
    }

    #[inline(always)]
    pub fn hsync(self) -> bool {
        self.contains(LcdLines::HSYNC)
    }

    #[inline(always)]
    pub fn clock(self) -> bool {
        self.contains(LcdLines::PIXEL_CLOCK)
    }
}

pub trait LcdBus {
    fn sample(&mut self) -> LcdLines;
}

pub trait ControllerLink {
    fn set_latch(&mut self, high: bool);
    fn set_pulse(&mut self, high: bool);
    /// Level of the controller's DATA line. Low means pressed.
    fn read_data(&mut self) -> bool;
}

pub trait PortOutputs {
    fn drive(&mut self, lines: PortLines);
}

pub trait ResetLine {
    /// `true` holds the console in reset.
    fn set_reset(&mut self, asserted: bool);
}

pub trait Timer {
    /// Microseconds since an arbitrary epoch; wraps.
    fn now_us(&self) -> u32;

    fn delay_us(&mut self, us: u32) {
        let start = self.now_us();
        while self.now_us().wrapping_sub(start) < us {
            core::hint::spin_loop();
        }
    }
}

impl<T: LcdBus + ?Sized> LcdBus for &mut T {
    fn sample(&mut self) -> LcdLines {
        (**self).sample()
    }
}

impl<T: Timer + ?Sized> Timer for &mut T {
    fn now_us(&self) -> u32 {
        (**self).now_us()
    }

    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}
