use std::thread::sleep;
use std::time::{Duration, Instant};

use gbvga_core::pins::{PortLines, PortOutputs, ResetLine, Timer};
use tracing::{debug, info};

/// Wall-clock microseconds since start-up.
pub struct HostTimer {
    start: Instant,
}

impl HostTimer {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Timer for HostTimer {
    fn now_us(&self) -> u32 {
        self.start.elapsed().as_micros() as u32
    }

    fn delay_us(&mut self, us: u32) {
        sleep(Duration::from_micros(us as u64));
    }
}

/// Reset line that only reports what it would do.
#[derive(Default)]
pub struct LoggedReset {
    pub pulses: usize,
}

impl ResetLine for LoggedReset {
    fn set_reset(&mut self, asserted: bool) {
        if asserted {
            self.pulses += 1;
            info!("console reset asserted (pulse {})", self.pulses);
        } else {
            debug!("console reset released");
        }
    }
}

/// The Game Boy's view of its four button lines.
pub struct ConsolePort {
    lines: PortLines,
}

impl ConsolePort {
    pub fn new() -> Self {
        Self { lines: PortLines::all() }
    }

    /// Lines currently pulled low, i.e. buttons the console sees pressed.
    pub fn pressed(&self) -> PortLines {
        PortLines::all() - self.lines
    }
}

impl PortOutputs for ConsolePort {
    fn drive(&mut self, lines: PortLines) {
        self.lines = lines;
    }
}
