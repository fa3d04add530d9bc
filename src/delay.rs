//! Blocking delay for hosted targets.

use embedded_hal::blocking::delay::DelayMs;
use std::thread;
use std::time::Duration;

/// Sleeps the current thread. Used when no delay is handed to the scroll engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayMs<u32> for StdDelay {
    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

impl DelayMs<u16> for StdDelay {
    fn delay_ms(&mut self, ms: u16) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
