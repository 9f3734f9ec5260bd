//! LCD bus decoder.
//!
//! The Game Boy drives its panel with a pixel clock, a per-row HSYNC pulse, a
//! VSYNC level that is high for the first row of each frame and two data
//! lines. [`CaptureDecoder`] turns a stream of raw samples of those lines into
//! pixels in a [`FrameBuffer`], one sample per [`CaptureDecoder::step`], so it
//! can be driven by the SIO block or by a recorded waveform alike.

use log::trace;

use crate::config::{PIXELS_X, PIXELS_Y};
use crate::framebuffer::{FrameBuffer, Pixel};
use crate::pins::{LcdBus, LcdLines};

/// Which half of a pulse the decoder is waiting for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Edge {
    WaitingHigh,
    WaitingLow,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CaptureState {
    /// Waiting for VSYNC to be seen high.
    AwaitingFrameStart,
    /// Aligning to the HSYNC pulse that starts a row.
    InRow { edge: Edge },
    /// Waiting for the pixel clock of the next column.
    AwaitingPixelClock { edge: Edge },
    FrameComplete,
}

#[derive(Debug)]
pub struct CaptureDecoder {
    state: CaptureState,
    row: usize,
    column: usize,
    vsync_dropped: bool,
}

#[inline(always)]
fn pixel_of(lines: LcdLines) -> Pixel {
    Pixel::from_lines(lines.contains(LcdLines::DATA_0), lines.contains(LcdLines::DATA_1))
}

impl CaptureDecoder {
    pub const fn new() -> Self {
        Self {
            state: CaptureState::AwaitingFrameStart,
            row: 0,
            column: 0,
            vsync_dropped: false,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Rows written so far in the current frame.
    pub fn rows(&self) -> usize {
        self.row
    }

    /// Consumes one sample. Returns `true` on the sample that completes a frame.
    pub fn step(&mut self, lines: LcdLines, frame: &FrameBuffer) -> bool {
        match self.state {
            CaptureState::AwaitingFrameStart | CaptureState::FrameComplete => {
                if lines.vsync() {
                    self.row = 0;
                    self.vsync_dropped = false;
                    self.state = CaptureState::InRow { edge: Edge::WaitingHigh };
                } else {
                    self.state = CaptureState::AwaitingFrameStart;
                }
            }
            CaptureState::InRow { edge: Edge::WaitingHigh } => {
                if lines.hsync() {
                    self.state = CaptureState::InRow { edge: Edge::WaitingLow };
                }
            }
            CaptureState::InRow { edge: Edge::WaitingLow } => {
                if !lines.hsync() {
                    // column 0 is already valid when hsync falls
                    frame.set(0, self.row, pixel_of(lines));
                    self.column = 1;
                    self.state = CaptureState::AwaitingPixelClock { edge: Edge::WaitingHigh };
                }
            }
            CaptureState::AwaitingPixelClock { edge: Edge::WaitingHigh } => {
                if lines.clock() {
                    self.state = CaptureState::AwaitingPixelClock { edge: Edge::WaitingLow };
                }
            }
            CaptureState::AwaitingPixelClock { edge: Edge::WaitingLow } => {
                if !lines.clock() {
                    frame.set(self.column, self.row, pixel_of(lines));
                    self.column += 1;
                    if self.column == PIXELS_X {
                        return self.complete_row(lines);
                    }
                    self.state = CaptureState::AwaitingPixelClock { edge: Edge::WaitingHigh };
                }
            }
        }
        false
    }

    fn complete_row(&mut self, lines: LcdLines) -> bool {
        self.row += 1;

        let vsync = lines.vsync();
        if !vsync {
            self.vsync_dropped = true;
        }

        // vsync came back before row 144: the source frame was short
        if (vsync && self.vsync_dropped) || self.row == PIXELS_Y {
            self.state = CaptureState::FrameComplete;
            return true;
        }

        self.state = CaptureState::InRow { edge: Edge::WaitingHigh };
        false
    }
}

impl Default for CaptureDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Captures one frame into `frame`, blocking on the bus until it is complete.
/// Returns the number of rows written.
pub fn capture_frame<B: LcdBus + ?Sized>(bus: &mut B, frame: &FrameBuffer) -> usize {
    let mut decoder = CaptureDecoder::new();
    let mut samples: u32 = 0;
    loop {
        samples = samples.wrapping_add(1);
        if decoder.step(bus.sample(), frame) {
            break;
        }
    }
    trace!("captured {} rows in {} samples", decoder.rows(), samples);
    decoder.rows()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::LcdSignal;

    fn diagonal(x: usize, y: usize) -> Pixel {
        Pixel::new(((x + y) % 4) as u8)
    }

    #[test]
    fn captures_a_full_frame() {
        let frame = FrameBuffer::new();
        let mut bus = LcdSignal::new(diagonal);

        assert_eq!(capture_frame(&mut bus, &frame), PIXELS_Y);
        for y in 0..PIXELS_Y {
            for x in 0..PIXELS_X {
                assert_eq!(frame.get(x, y), diagonal(x, y), "pixel {x},{y}");
            }
        }
    }

    #[test]
    fn waits_for_vsync_before_the_first_row() {
        let frame = FrameBuffer::new();
        let mut decoder = CaptureDecoder::new();

        let busy = LcdLines::HSYNC | LcdLines::DATA_0;
        for _ in 0..10 {
            assert!(!decoder.step(busy, &frame));
            assert_eq!(decoder.state(), CaptureState::AwaitingFrameStart);
        }
        decoder.step(LcdLines::VSYNC, &frame);
        assert_eq!(decoder.state(), CaptureState::InRow { edge: Edge::WaitingHigh });
    }

    #[test]
    fn first_column_is_sampled_when_hsync_falls() {
        let frame = FrameBuffer::new();
        let mut decoder = CaptureDecoder::new();

        decoder.step(LcdLines::VSYNC, &frame);
        decoder.step(LcdLines::VSYNC | LcdLines::HSYNC, &frame);
        decoder.step(LcdLines::VSYNC | LcdLines::DATA_0 | LcdLines::DATA_1, &frame);

        assert_eq!(frame.get(0, 0), Pixel::new(3));
        assert_eq!(decoder.state(), CaptureState::AwaitingPixelClock { edge: Edge::WaitingHigh });
    }

    #[test]
    fn data_is_taken_from_the_clock_low_sample() {
        let frame = FrameBuffer::new();
        let mut decoder = CaptureDecoder::new();

        decoder.step(LcdLines::VSYNC, &frame);
        decoder.step(LcdLines::HSYNC, &frame);
        decoder.step(LcdLines::empty(), &frame);
        decoder.step(LcdLines::PIXEL_CLOCK | LcdLines::DATA_1, &frame);
        decoder.step(LcdLines::DATA_0, &frame);

        assert_eq!(frame.get(1, 0), Pixel::new(2));
    }

    #[test]
    fn short_frames_end_when_vsync_returns() {
        let frame = FrameBuffer::new();
        let mut bus = LcdSignal::new(diagonal).with_rows(100, 0);

        // the next frame's first row lands in row 100 before vsync is seen again
        assert_eq!(capture_frame(&mut bus, &frame), 101);
        assert_eq!(frame.get(5, 99), diagonal(5, 99));
        assert_eq!(frame.get(5, 100), diagonal(5, 0));
    }

    #[test]
    fn blanking_rows_are_not_captured() {
        let frame = FrameBuffer::new();
        frame.fill(Pixel::new(3));
        let mut bus = LcdSignal::new(|_, _| Pixel::new(1));

        assert_eq!(capture_frame(&mut bus, &frame), PIXELS_Y);
        assert_eq!(capture_frame(&mut bus, &frame), PIXELS_Y);
        assert_eq!(frame.get(0, 0), Pixel::new(1));
        assert_eq!(frame.get(PIXELS_X - 1, PIXELS_Y - 1), Pixel::new(1));
    }
}
