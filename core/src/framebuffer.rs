//! Shared 160x144 frame of 2-bit pixels.
//!
//! Written by the capture context and read by the render context without any
//! locking. Every cell is an independent relaxed atomic, so a frame being
//! rendered while it is captured shows a mix of old and new pixels but never
//! an out-of-range value.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::config::{PIXELS_X, PIXEL_COUNT};

/// A 2-bit shade as sampled from the two LCD data lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel(u8);

impl Pixel {
    pub const fn new(value: u8) -> Self {
        Pixel(value & 0b11)
    }

    /// DATA_0 is the high bit.
    pub const fn from_lines(data_0: bool, data_1: bool) -> Self {
        Pixel(((data_0 as u8) << 1) | data_1 as u8)
    }

    #[inline(always)]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

pub struct FrameBuffer {
    pixels: [AtomicU8; PIXEL_COUNT],
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            pixels: [const { AtomicU8::new(0) }; PIXEL_COUNT],
        }
    }

    #[inline(always)]
    pub fn set(&self, x: usize, y: usize, pixel: Pixel) {
        self.pixels[y * PIXELS_X + x].store(pixel.value(), Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> Pixel {
        Pixel::new(self.pixels[y * PIXELS_X + x].load(Ordering::Relaxed))
    }

    /// Copies row `y` into `out`.
    pub fn row(&self, y: usize, out: &mut [Pixel; PIXELS_X]) {
        let start = y * PIXELS_X;
        for (dst, src) in out.iter_mut().zip(&self.pixels[start..start + PIXELS_X]) {
            *dst = Pixel::new(src.load(Ordering::Relaxed));
        }
    }

    pub fn fill(&self, pixel: Pixel) {
        for cell in &self.pixels {
            cell.store(pixel.value(), Ordering::Relaxed);
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
