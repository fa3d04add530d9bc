//! Frames spanning the whole daisy chain.
//!
//! Every transfer shifts `2 * device_count` bytes. The bytes shifted first travel furthest down
//! the chain, so the frame is sent back to front: device 0 owns the first two bytes of the
//! buffer and receives the last 16 bits clocked in.

use crate::bus::{BitOrder, SerialBus};
use crate::MAX_DEVICES;

/// One opcode/data pair per device. Unaddressed devices get the no-op register.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    bytes: [u8; MAX_DEVICES * 2],
    len: usize,
}

impl Frame {
    /// Build a frame addressing a single device, `None` if `device` is not in the chain
    pub fn addressed(device_count: usize, device: usize, opcode: u8, data: u8) -> Option<Self> {
        if device >= device_count {
            return None;
        }

        let mut frame = Self::empty(device_count);
        let offset = device * 2;
        frame.bytes[offset] = data;
        frame.bytes[offset + 1] = opcode;
        Some(frame)
    }

    /// Build a frame writing the same opcode/data pair to every device
    pub fn broadcast(device_count: usize, opcode: u8, data: u8) -> Self {
        let mut frame = Self::empty(device_count);
        for pair in frame.bytes_mut().chunks_exact_mut(2) {
            pair[0] = data;
            pair[1] = opcode;
        }
        frame
    }

    fn empty(device_count: usize) -> Self {
        Frame {
            bytes: [0; MAX_DEVICES * 2],
            len: device_count.min(MAX_DEVICES) * 2,
        }
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[..self.len]
    }

    /// The frame in buffer order (device 0 first)
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Shift the frame out inside one chip select window, last byte first
    pub fn send<B: SerialBus>(&self, bus: &mut B) -> Result<(), B::Error> {
        bus.set_select(true)?;
        for byte in self.as_bytes().iter().rev() {
            bus.shift_out(*byte, BitOrder::MsbFirst)?;
        }
        bus.set_select(false)
    }
}

/// Send `opcode` and `data` to one device of the chain. Devices outside the chain are ignored.
pub fn transfer<B: SerialBus>(
    bus: &mut B,
    device_count: usize,
    device: usize,
    opcode: u8,
    data: u8,
) -> Result<(), B::Error> {
    match Frame::addressed(device_count, device, opcode, data) {
        Some(frame) => {
            #[cfg(feature = "defmt")]
            defmt::trace!(
                "transfer device={} opcode={=u8:x} data={=u8:x}",
                device,
                opcode,
                data
            );

            frame.send(bus)
        }
        None => Ok(()),
    }
}

/// Send the same `opcode` and `data` to every device of the chain in a single frame
pub fn transfer_all<B: SerialBus>(
    bus: &mut B,
    device_count: usize,
    opcode: u8,
    data: u8,
) -> Result<(), B::Error> {
    Frame::broadcast(device_count, opcode, data).send(bus)
}
