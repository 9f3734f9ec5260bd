use embedded_hal::delay::DelayNs;
use rp2040_hal::Timer as HalTimer;

use gbvga_core::pins::Timer;

/// The 1 MHz system timer. Reads the raw low word, so both cores can use it
/// without latching.
pub struct SystemTimer(HalTimer);

impl SystemTimer {
    pub fn new(timer: HalTimer) -> Self {
        Self(timer)
    }
}

impl Timer for SystemTimer {
    #[inline(always)]
    fn now_us(&self) -> u32 {
        self.0.get_counter_low()
    }

    fn delay_us(&mut self, us: u32) {
        DelayNs::delay_us(&mut self.0, us);
    }
}
