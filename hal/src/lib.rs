#![no_std]

//! RP2040 side of the Game Boy VGA bridge.
//!
//! Pins come from `rp2040_hal::gpio` and are handed out by number, so the
//! board profiles in [`board`] stay plain data. [`gpio`] implements the
//! `gbvga_core::pins` traits on those pins, [`select`] answers the console's
//! select lines and [`timer`] wraps the 1 MHz system timer.

pub mod board;
pub mod gpio;
pub mod select;
pub mod timer;

pub use board::{Board, BoardConfig, BoardError, Features, CONTROLLER_ADAPTER, GB_VGA};

/// Single-bit mask for GPIO `pin`.
#[inline(always)]
pub const fn pin_mask(pin: u8) -> u32 {
    1 << pin
}
