//! On-screen menu.
//!
//! [`OsdRenderer`] owns the menu text and the active line and rasterises them
//! into an [`Overlay`]: one byte per overlay pixel, read by the composer as a
//! colour word. The overlay is a cache of the text and is rebuilt by
//! [`OsdRenderer::render`] whenever either changes.

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use log::warn;

use crate::config::{PIXELS_X, PIXELS_Y};
use crate::font::{glyph, GLYPH_HEIGHT, GLYPH_WIDTH};

pub const OSD_CHAR_WIDTH: usize = GLYPH_WIDTH;
pub const OSD_CHAR_HEIGHT: usize = GLYPH_HEIGHT;
pub const OSD_LINES: usize = 6;
pub const OSD_CHARS_PER_LINE: usize = 18;
pub const OSD_WIDTH: usize = OSD_CHAR_WIDTH * OSD_CHARS_PER_LINE;
pub const OSD_HEIGHT: usize = OSD_CHAR_HEIGHT * OSD_LINES;

/// Top-left corner of the overlay in source pixels, centred with floor division.
pub const OSD_X: usize = (PIXELS_X - OSD_WIDTH) / 2;
pub const OSD_Y: usize = (PIXELS_Y - OSD_HEIGHT) / 2;

pub const OSD_BACKGROUND: u8 = 0x00;
pub const OSD_FOREGROUND: u8 = 0x3C;

pub struct Overlay {
    enabled: AtomicBool,
    generation: AtomicU32,
    pixels: [AtomicU8; OSD_WIDTH * OSD_HEIGHT],
}

impl Overlay {
    pub const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
            generation: AtomicU32::new(0),
            pixels: [const { AtomicU8::new(OSD_BACKGROUND) }; OSD_WIDTH * OSD_HEIGHT],
        }
    }

    #[inline(always)]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Number of completed renders.
    pub fn generation(&self) -> u32 {
        self.generation.load(Ordering::Relaxed)
    }

    /// Overlay byte at `(x, y)` in overlay coordinates.
    #[inline(always)]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * OSD_WIDTH + x].load(Ordering::Relaxed)
    }

    /// Overlay byte over source pixel `(x, y)`, if the overlay extends that
    /// far. Does not look at the enabled flag.
    #[inline(always)]
    pub fn covering(&self, x: usize, y: usize) -> Option<u8> {
        let ox = x.wrapping_sub(OSD_X);
        let oy = y.wrapping_sub(OSD_Y);
        (ox < OSD_WIDTH && oy < OSD_HEIGHT).then(|| self.pixel(ox, oy))
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new()
    }
}

pub struct OsdRenderer<'a> {
    overlay: &'a Overlay,
    text: [[u8; OSD_CHARS_PER_LINE]; OSD_LINES],
    active_line: usize,
}

impl<'a> OsdRenderer<'a> {
    pub fn new(overlay: &'a Overlay) -> Self {
        Self {
            overlay,
            text: [[b' '; OSD_CHARS_PER_LINE]; OSD_LINES],
            active_line: 0,
        }
    }

    pub fn overlay(&self) -> &'a Overlay {
        self.overlay
    }

    pub fn active_line(&self) -> usize {
        self.active_line
    }

    pub fn line_text(&self, index: usize) -> &[u8] {
        &self.text[index]
    }

    /// Copies `text` into line `index`, space padded. Longer text is cut to
    /// the line width and out-of-range lines are ignored.
    pub fn set_line_text(&mut self, index: usize, text: &str) {
        let Some(line) = self.text.get_mut(index) else {
            return;
        };
        let bytes = text.as_bytes();
        if bytes.len() > OSD_CHARS_PER_LINE {
            warn!("osd line {} truncated: {:?}", index, text);
        }
        for (i, cell) in line.iter_mut().enumerate() {
            *cell = bytes.get(i).copied().unwrap_or(b' ');
        }
    }

    /// Rebuilds the overlay from the text and active line.
    pub fn render(&self) {
        let mut pos = 0;
        for (line, text) in self.text.iter().enumerate() {
            let (on, off) = if line == self.active_line {
                (OSD_BACKGROUND, OSD_FOREGROUND)
            } else {
                (OSD_FOREGROUND, OSD_BACKGROUND)
            };
            for row in 0..OSD_CHAR_HEIGHT {
                for &ch in text {
                    let bits = glyph(ch)[row];
                    for bit in (0..OSD_CHAR_WIDTH).rev() {
                        let lit = (bits >> bit) & 1 != 0;
                        self.overlay.pixels[pos].store(if lit { on } else { off }, Ordering::Relaxed);
                        pos += 1;
                    }
                }
            }
        }
        self.overlay.generation.fetch_add(1, Ordering::Relaxed);
    }

    /// Moves the highlight by `direction` lines, wrapping, and re-renders.
    pub fn change_active_line(&mut self, direction: i8) {
        self.active_line = (self.active_line as isize + direction as isize).rem_euclid(OSD_LINES as isize) as usize;
        self.render();
    }

    /// Shows or hides the menu. The overlay contents are left untouched.
    pub fn toggle(&self) -> bool {
        let enabled = !self.overlay.is_enabled();
        self.overlay.set_enabled(enabled);
        enabled
    }
}
