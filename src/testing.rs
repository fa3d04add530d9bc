//! Test doubles for the bus and the delay.

use core::convert::Infallible;

use embedded_hal::blocking::delay::DelayMs;

use crate::bus::{BitOrder, SerialBus};

/// Records every frame clocked out between a select and a latch, in shift order
#[derive(Debug, Default)]
pub struct RecordingBus {
    pub frames: Vec<Vec<u8>>,
    pub selects: usize,
    current: Option<Vec<u8>>,
}

impl RecordingBus {
    pub fn clear(&mut self) {
        self.frames.clear();
        self.selects = 0;
        self.current = None;
    }

    /// Decode the frames back into `(device, opcode, data)` writes, skipping no-op pairs.
    /// The first pair shifted belongs to the device farthest down the chain.
    pub fn writes(&self, device_count: usize) -> Vec<(usize, u8, u8)> {
        let mut writes = Vec::new();
        for frame in &self.frames {
            assert_eq!(frame.len(), device_count * 2, "frame length");
            for (k, pair) in frame.chunks_exact(2).enumerate() {
                if pair[0] != 0 {
                    writes.push((device_count - 1 - k, pair[0], pair[1]));
                }
            }
        }
        writes
    }
}

impl SerialBus for RecordingBus {
    type Error = Infallible;

    fn set_select(&mut self, active: bool) -> Result<(), Infallible> {
        if active {
            self.selects += 1;
            self.current = Some(Vec::new());
        } else if let Some(frame) = self.current.take() {
            self.frames.push(frame);
        }
        Ok(())
    }

    fn shift_out(&mut self, value: u8, order: BitOrder) -> Result<(), Infallible> {
        assert_eq!(order, BitOrder::MsbFirst);
        self.current
            .as_mut()
            .expect("shift_out outside of a select window")
            .push(value);
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct BusFault;

/// Every operation fails
pub struct FailingBus;

impl SerialBus for FailingBus {
    type Error = BusFault;

    fn set_select(&mut self, _active: bool) -> Result<(), BusFault> {
        Err(BusFault)
    }

    fn shift_out(&mut self, _value: u8, _order: BitOrder) -> Result<(), BusFault> {
        Err(BusFault)
    }
}

/// Remembers every requested wait instead of sleeping
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub calls: Vec<u32>,
}

impl DelayMs<u32> for RecordingDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(ms);
    }
}
