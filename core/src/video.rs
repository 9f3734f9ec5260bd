//! Run-length scanline command stream.
//!
//! The video engine consumes each output line as a list of 16-bit words:
//!
//! | Instruction   | Words                                              |
//! |---------------|----------------------------------------------------|
//! | colour run    | `COLOR_RUN, color, len - 3`                        |
//! | raw run       | `RAW_RUN, first, len - 3, color_2 .. color_len`    |
//! | one pixel     | `RAW_1P, color`                                    |
//! | end of line   | `EOL_ALIGN` on an odd index, else `EOL_SKIP_ALIGN, 0` |
//!
//! Lines always end on an even word count so the engine can treat them as
//! 32-bit words.

use crate::config::MIN_RUN;
use crate::error::VideoError;
use crate::palette::Color;

/// Opcode numbering of the engine's composable instruction set.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Opcodes {
    pub color_run: u16,
    pub eol_align: u16,
    pub eol_skip_align: u16,
    pub raw_run: u16,
    pub raw_1p: u16,
}

impl Opcodes {
    pub const DEFAULT: Opcodes = Opcodes {
        color_run: 0,
        eol_align: 1,
        eol_skip_align: 2,
        raw_run: 3,
        raw_1p: 4,
    };
}

impl Default for Opcodes {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Words in a play-area line: left border run, raw run header, the play
/// pixels after the first, right border run, trailing pixel, end of line.
pub const MAX_LINE_WORDS: usize = 3 + 3 + (crate::config::PLAY_WIDTH - 1) + 3 + 2 + 2;

/// One line buffer handed out by the engine.
pub struct ScanlineBuffer<'a> {
    /// Output line number, 0 at the top of the 640x480 frame.
    pub line: usize,
    pub data: &'a mut [u16],
}

/// The scanline side of the external video-timing engine.
pub trait VideoEngine {
    /// Capacity of every buffer returned by `begin_scanline`, in u16 words.
    fn max_scanline_words(&self) -> usize;

    /// Blocks until the engine wants its next line.
    fn begin_scanline(&mut self) -> ScanlineBuffer<'_>;

    /// Returns the buffer filled with `used_words` words.
    fn end_scanline(&mut self, used_words: usize);
}

/// Appends instructions to a line buffer. Callers check the capacity once
/// up front, the writer itself does not.
pub struct CommandWriter<'a> {
    buf: &'a mut [u16],
    pos: usize,
    opcodes: Opcodes,
}

impl<'a> CommandWriter<'a> {
    pub fn new(buf: &'a mut [u16], opcodes: Opcodes) -> Self {
        Self { buf, pos: 0, opcodes }
    }

    #[inline(always)]
    fn push(&mut self, word: u16) {
        self.buf[self.pos] = word;
        self.pos += 1;
    }

    #[inline(always)]
    pub fn color_run(&mut self, color: Color, len: usize) {
        debug_assert!(len >= MIN_RUN);
        self.push(self.opcodes.color_run);
        self.push(color);
        self.push((len - MIN_RUN) as u16);
    }

    /// Starts a raw run of `len` pixels. The first pixel is part of the
    /// header, the caller pushes the remaining `len - 1` with [`Self::raw`].
    #[inline(always)]
    pub fn raw_run(&mut self, first: Color, len: usize) {
        debug_assert!(len >= MIN_RUN);
        self.push(self.opcodes.raw_run);
        self.push(first);
        self.push((len - MIN_RUN) as u16);
    }

    #[inline(always)]
    pub fn raw(&mut self, color: Color) {
        self.push(color);
    }

    #[inline(always)]
    pub fn raw_1p(&mut self, color: Color) {
        self.push(self.opcodes.raw_1p);
        self.push(color);
    }

    /// Closes the line and returns the number of words written.
    pub fn end_of_line(mut self) -> usize {
        if self.pos % 2 == 1 {
            self.push(self.opcodes.eol_align);
        } else {
            self.push(self.opcodes.eol_skip_align);
            self.push(0);
        }
        self.pos
    }
}

/// Expands one composed line into `out`, one colour per output pixel.
/// Returns the number of pixels produced.
pub fn decode_line(words: &[u16], opcodes: &Opcodes, out: &mut [Color]) -> Result<usize, VideoError> {
    let mut at = 0;
    let mut pixels = 0;

    let mut emit = |color: Color, pixels: &mut usize| -> Result<(), VideoError> {
        let slot = out.get_mut(*pixels).ok_or(VideoError::LineOverflow { pixels: *pixels })?;
        *slot = color;
        *pixels += 1;
        Ok(())
    };
    let word = |i: usize| words.get(i).copied().ok_or(VideoError::Truncated { at: i });

    loop {
        let op = word(at)?;
        if op == opcodes.color_run {
            let color = word(at + 1)?;
            let len = word(at + 2)? as usize + MIN_RUN;
            for _ in 0..len {
                emit(color, &mut pixels)?;
            }
            at += 3;
        } else if op == opcodes.raw_run {
            let first = word(at + 1)?;
            let len = word(at + 2)? as usize + MIN_RUN;
            emit(first, &mut pixels)?;
            for i in 0..len - 1 {
                emit(word(at + 3 + i)?, &mut pixels)?;
            }
            at += 3 + len - 1;
        } else if op == opcodes.raw_1p {
            emit(word(at + 1)?, &mut pixels)?;
            at += 2;
        } else if op == opcodes.eol_align || op == opcodes.eol_skip_align {
            return Ok(pixels);
        } else {
            return Err(VideoError::UnknownOpcode { at, word: op });
        }
    }
}
