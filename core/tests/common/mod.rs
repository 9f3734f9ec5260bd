#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;

use gbvga_core::config::OUTPUT_HEIGHT;
use gbvga_core::input::ButtonState;
use gbvga_core::pins::{ControllerLink, ResetLine, Timer};
use gbvga_core::video::{ScanlineBuffer, VideoEngine, MAX_LINE_WORDS};

/// Timer that moves forward a fixed step on every read.
pub struct SteppingTimer {
    now: Cell<u32>,
    step: u32,
}

impl SteppingTimer {
    pub fn new(step: u32) -> Self {
        Self { now: Cell::new(0), step }
    }
}

impl Timer for SteppingTimer {
    fn now_us(&self) -> u32 {
        let now = self.now.get().wrapping_add(self.step);
        self.now.set(now);
        now
    }

    fn delay_us(&mut self, us: u32) {
        self.now.set(self.now.get().wrapping_add(us));
    }
}

/// NES pad that reports one scripted state per latch, repeating the last.
pub struct ScriptedPad {
    script: VecDeque<ButtonState>,
    current: ButtonState,
    shifted: usize,
}

impl ScriptedPad {
    pub fn new(script: impl IntoIterator<Item = ButtonState>) -> Self {
        Self {
            script: script.into_iter().collect(),
            current: ButtonState::RELEASED,
            shifted: 0,
        }
    }

    pub fn idle() -> Self {
        Self::new([])
    }
}

impl ControllerLink for ScriptedPad {
    fn set_latch(&mut self, high: bool) {
        if high {
            if let Some(next) = self.script.pop_front() {
                self.current = next;
            }
            self.shifted = 0;
        }
    }

    fn set_pulse(&mut self, high: bool) {
        if !high {
            self.shifted += 1;
        }
    }

    fn read_data(&mut self) -> bool {
        (self.current.0 >> self.shifted) & 1 == 1
    }
}

#[derive(Default)]
pub struct NoReset {
    pub pulses: usize,
}

impl ResetLine for NoReset {
    fn set_reset(&mut self, asserted: bool) {
        if asserted {
            self.pulses += 1;
        }
    }
}

/// Engine that keeps every composed line.
pub struct RecordingEngine {
    capacity: usize,
    buf: Vec<u16>,
    next_line: usize,
    pub lines: Vec<Vec<u16>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LINE_WORDS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::claiming(capacity, capacity)
    }

    /// Reports `claimed` words of capacity but hands out `actual`.
    pub fn claiming(claimed: usize, actual: usize) -> Self {
        Self {
            capacity: claimed,
            buf: vec![0; actual],
            next_line: 0,
            lines: Vec::new(),
        }
    }
}

impl VideoEngine for RecordingEngine {
    fn max_scanline_words(&self) -> usize {
        self.capacity
    }

    fn begin_scanline(&mut self) -> ScanlineBuffer<'_> {
        ScanlineBuffer {
            line: self.next_line % OUTPUT_HEIGHT,
            data: &mut self.buf,
        }
    }

    fn end_scanline(&mut self, used_words: usize) {
        self.lines.push(self.buf[..used_words].to_vec());
        self.next_line += 1;
    }
}
