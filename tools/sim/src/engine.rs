use std::thread::sleep;
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use gbvga_core::config::{OUTPUT_HEIGHT, OUTPUT_WIDTH};
use gbvga_core::palette::{to_rgb888, Color};
use gbvga_core::video::{decode_line, Opcodes, ScanlineBuffer, VideoEngine, MAX_LINE_WORDS};
use image::RgbImage;
use tracing::{trace, warn};

/// 640x480 at 60 Hz.
const FRAME_TIME: Duration = Duration::from_micros(16_683);

/// Stand-in for the scanline DMA engine: decodes every line it is handed
/// and ships each finished frame as an image.
pub struct RecordingEngine {
    words: Vec<u32>,
    opcodes: Opcodes,
    line: usize,
    pixels: Vec<Color>,
    image: RgbImage,
    frames: Sender<RgbImage>,
    frame_start: Instant,
    paced: bool,
}

impl RecordingEngine {
    pub fn new(opcodes: Opcodes, frames: Sender<RgbImage>, paced: bool) -> Self {
        Self {
            // the engine hands out 32-bit words, the composer writes halves
            words: vec![0; MAX_LINE_WORDS.div_ceil(2)],
            opcodes,
            line: 0,
            pixels: vec![0; OUTPUT_WIDTH],
            image: RgbImage::new(OUTPUT_WIDTH as u32, OUTPUT_HEIGHT as u32),
            frames,
            frame_start: Instant::now(),
            paced,
        }
    }

    fn finish_frame(&mut self) {
        let frame = std::mem::replace(&mut self.image, RgbImage::new(OUTPUT_WIDTH as u32, OUTPUT_HEIGHT as u32));
        if self.frames.send(frame).is_err() {
            trace!("frame dropped, receiver gone");
        }

        if self.paced {
            let elapsed = self.frame_start.elapsed();
            if let Some(rest) = FRAME_TIME.checked_sub(elapsed) {
                sleep(rest);
            }
        }
        self.frame_start = Instant::now();
    }
}

impl VideoEngine for RecordingEngine {
    fn max_scanline_words(&self) -> usize {
        self.words.len() * 2
    }

    fn begin_scanline(&mut self) -> ScanlineBuffer<'_> {
        ScanlineBuffer {
            line: self.line,
            data: bytemuck::cast_slice_mut(&mut self.words),
        }
    }

    fn end_scanline(&mut self, used_words: usize) {
        let data: &[u16] = bytemuck::cast_slice(&self.words);
        match decode_line(&data[..used_words], &self.opcodes, &mut self.pixels) {
            Ok(count) if count == OUTPUT_WIDTH => {}
            Ok(count) => warn!("line {} decoded to {} pixels", self.line, count),
            Err(e) => warn!("line {} is malformed: {}", self.line, e),
        }
        for (x, &color) in self.pixels.iter().enumerate() {
            self.image.put_pixel(x as u32, self.line as u32, image::Rgb(to_rgb888(color)));
        }

        self.line += 1;
        if self.line == OUTPUT_HEIGHT {
            self.line = 0;
            self.finish_frame();
        }
    }
}
