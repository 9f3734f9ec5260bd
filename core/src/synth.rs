//! Synthetic LCD waveform.
//!
//! Reproduces the line sequence a Game Boy panel sees, one [`LcdLines`] sample
//! at a time, so the capture path can be exercised without a console.

use crate::config::{PIXELS_X, PIXELS_Y};
use crate::framebuffer::Pixel;
use crate::pins::{LcdBus, LcdLines};

/// Samples per row: two idle, two with hsync high, one with hsync low and
/// column 0, a high/low clock pair per remaining column, one idle.
pub const SAMPLES_PER_ROW: usize = 5 + 2 * (PIXELS_X - 1) + 1;

/// Rows of vertical blanking a DMG emits after the visible area.
pub const DEFAULT_BLANK_ROWS: usize = 10;

pub struct LcdSignal<P> {
    pattern: P,
    visible_rows: usize,
    blank_rows: usize,
    row: usize,
    index: usize,
    frames: usize,
}

impl<P: FnMut(usize, usize) -> Pixel> LcdSignal<P> {
    /// `pattern(x, y)` supplies the shade of every visible pixel.
    pub fn new(pattern: P) -> Self {
        Self {
            pattern,
            visible_rows: PIXELS_Y,
            blank_rows: DEFAULT_BLANK_ROWS,
            row: 0,
            index: 0,
            frames: 0,
        }
    }

    /// Overrides the frame shape. `visible` rows carry the pattern, `blank`
    /// rows after them carry zero data.
    pub fn with_rows(mut self, visible: usize, blank: usize) -> Self {
        self.visible_rows = visible.max(1);
        self.blank_rows = blank;
        self
    }

    /// Frames fully emitted so far.
    pub fn frames_emitted(&self) -> usize {
        self.frames
    }

    fn data(&mut self, x: usize) -> LcdLines {
        if self.row >= self.visible_rows {
            return LcdLines::empty();
        }
        let pixel = (self.pattern)(x, self.row);
        let mut lines = LcdLines::empty();
        lines.set(LcdLines::DATA_0, pixel.value() & 0b10 != 0);
        lines.set(LcdLines::DATA_1, pixel.value() & 0b01 != 0);
        lines
    }

    fn current(&mut self) -> LcdLines {
        let mut lines = match self.index {
            0 | 1 => LcdLines::empty(),
            2 | 3 => LcdLines::HSYNC,
            4 => self.data(0),
            i if i < SAMPLES_PER_ROW - 1 => {
                let k = i - 5;
                let mut lines = self.data(1 + k / 2);
                lines.set(LcdLines::PIXEL_CLOCK, k % 2 == 0);
                lines
            }
            _ => LcdLines::empty(),
        };
        lines.set(LcdLines::VSYNC, self.row == 0);
        lines
    }

    fn advance(&mut self) {
        self.index += 1;
        if self.index < SAMPLES_PER_ROW {
            return;
        }
        self.index = 0;
        self.row += 1;
        if self.row == self.visible_rows + self.blank_rows {
            self.row = 0;
            self.frames += 1;
        }
    }
}

impl<P: FnMut(usize, usize) -> Pixel> LcdBus for LcdSignal<P> {
    fn sample(&mut self) -> LcdLines {
        let lines = self.current();
        self.advance();
        lines
    }
}
