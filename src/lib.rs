#![cfg_attr(not(any(test, feature = "std")), no_std)]

// This is a driver for daisy-chained MAX7219 / MAX7221 chips driving either 7 segment digits or
// 8x8 LED dot matrices over a bit-banged three wire link (data, clock, chip select).
// The driver keeps a copy of every digit / row register so single LEDs can be switched without
// reading the chip back, and can scroll text that is wider than the display.
// see http://www.gammon.com.au/forum/?id=11516 a description of this chip and uses

use embedded_hal::digital::v2::OutputPin;

pub mod bus;
#[cfg(feature = "std")]
pub mod delay;
pub mod font;
pub mod frame;
pub mod scroll;
pub mod text;

#[cfg(test)]
mod testing;

pub use bus::{BitBangBus, BitOrder, SerialBus};
#[cfg(feature = "std")]
pub use delay::StdDelay;
pub use font::GlyphTable;
pub use scroll::{ScrollConfig, ScrollPlan, Step, MAX_MESSAGE_LEN};
pub use text::{preprocess, DecoratedChar, DecoratedText};

use font::with_dot;

/// Most chips a single chain can hold
pub const MAX_DEVICES: usize = 8;

/// Digit (or matrix row) registers per chip
pub const DIGITS: usize = 8;

/// all the registers that can be written on the max7219
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Noop = 0x00,
    Digit0 = 0x01,
    Digit1 = 0x02,
    Digit2 = 0x03,
    Digit3 = 0x04,
    Digit4 = 0x05,
    Digit5 = 0x06,
    Digit6 = 0x07,
    Digit7 = 0x08,
    DecodeMode = 0x09,
    /// Intensity of the light 0-15
    Intensity = 0x0A,
    /// Number of scanned digits minus one, 0-7
    ScanLimit = 0x0B,
    /// 0 shuts the chip down, 1 is normal operation
    Shutdown = 0x0C,
    DisplayTest = 0x0F,
}

impl From<Command> for u8 {
    fn from(command: Command) -> u8 {
        command as u8
    }
}

/// Which digits the chip decodes itself (Code B font) instead of taking raw segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeMode {
    NoDecode = 0x00,
    CodeBDigit0 = 0x01,
    CodeBDigits3_0 = 0x0F,
    CodeBDigits7_0 = 0xFF,
}

/// Register address of digit / row `row` (0 based)
fn digit_register(row: usize) -> u8 {
    Command::Digit0 as u8 + row as u8
}

/// Row index of a digit register, `None` for control registers
fn digit_row(register: u8) -> Option<usize> {
    (register as usize).checked_sub(1).filter(|row| *row < DIGITS)
}

/// Zero or anything above [`MAX_DEVICES`] means a full chain
fn clamp_device_count(device_count: usize) -> usize {
    if device_count == 0 || device_count > MAX_DEVICES {
        MAX_DEVICES
    } else {
        device_count
    }
}

/// Driver for a chain of up to eight chips.
///
/// Every setter silently ignores devices, rows, columns or values that are out of range. The
/// only error returned is the bus's own.
pub struct LedControl<B> {
    bus: B,
    device_count: usize,
    status: [[u8; DIGITS]; MAX_DEVICES],
    glyphs: GlyphTable<'static>,
    scroll: ScrollConfig,
}

impl<DATA, CLK, CS, PinError> LedControl<BitBangBus<DATA, CLK, CS>>
where
    DATA: OutputPin<Error = PinError>,
    CLK: OutputPin<Error = PinError>,
    CS: OutputPin<Error = PinError>,
{
    /// Bit-bang the chain over three gpio pins. Call [`init`](Self::init) before use.
    pub fn new(data: DATA, clk: CLK, cs: CS, device_count: usize) -> Self {
        Self::with_bus(BitBangBus::new(data, clk, cs), device_count)
    }
}

impl<B: SerialBus> LedControl<B> {
    pub fn with_bus(bus: B, device_count: usize) -> Self {
        LedControl {
            bus,
            device_count: clamp_device_count(device_count),
            status: [[0; DIGITS]; MAX_DEVICES],
            glyphs: GlyphTable::default(),
            scroll: ScrollConfig::default(),
        }
    }

    /// Use another font for `set_char`, `set_digit` and scrolling
    pub fn with_glyph_table(mut self, glyphs: GlyphTable<'static>) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn with_scroll_config(mut self, scroll: ScrollConfig) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn scroll_config(&self) -> &ScrollConfig {
        &self.scroll
    }

    pub fn glyph_table(&self) -> &GlyphTable<'static> {
        &self.glyphs
    }

    /// Gets the number of devices in the chain (after clamping)
    pub fn device_count(&self) -> usize {
        self.device_count
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }

    /// Put every chip into a known state: display test off, all digits scanned, no decoding,
    /// blank, and shut down. Wake a chip with `shutdown(device, false)`.
    pub fn init(&mut self) -> Result<(), B::Error> {
        for device in 0..self.device_count {
            #[cfg(feature = "defmt")]
            defmt::trace!("init device {}", device);

            self.set_display_test(device, false)?;
            self.set_scan_limit(device, 7)?;
            self.set_decode_mode(device, DecodeMode::NoDecode)?;
            self.clear_display(device)?;
            self.shutdown(device, true)?;
        }

        Ok(())
    }

    /// Send a raw register write to one device. Digit registers are mirrored like any setter.
    pub fn write_command(
        &mut self,
        device: usize,
        command: Command,
        data: u8,
    ) -> Result<(), B::Error> {
        let register: u8 = command.into();
        match digit_row(register) {
            Some(row) if device < self.device_count => self.store(device, row, data),
            _ => frame::transfer(&mut self.bus, self.device_count, device, register, data),
        }
    }

    /// Write the same register on every device in one frame
    pub fn write_command_all(&mut self, command: Command, data: u8) -> Result<(), B::Error> {
        let register: u8 = command.into();
        if let Some(row) = digit_row(register) {
            for rows in self.status.iter_mut().take(self.device_count) {
                rows[row] = data;
            }
        }
        frame::transfer_all(&mut self.bus, self.device_count, register, data)
    }

    /// `true` enters power saving mode (display off), `false` wakes the chip up
    pub fn shutdown(&mut self, device: usize, enable: bool) -> Result<(), B::Error> {
        let data = if enable { 0 } else { 1 };
        self.write_command(device, Command::Shutdown, data)
    }

    /// Number of digits scanned minus one, 0..=7
    pub fn set_scan_limit(&mut self, device: usize, limit: u8) -> Result<(), B::Error> {
        if limit as usize >= DIGITS {
            return Ok(());
        }
        self.write_command(device, Command::ScanLimit, limit)
    }

    /// Brightness, 0..=15
    pub fn set_intensity(&mut self, device: usize, intensity: u8) -> Result<(), B::Error> {
        if intensity > 0x0F {
            return Ok(());
        }
        self.write_command(device, Command::Intensity, intensity)
    }

    pub fn set_decode_mode(&mut self, device: usize, mode: DecodeMode) -> Result<(), B::Error> {
        self.write_command(device, Command::DecodeMode, mode as u8)
    }

    /// Light every LED regardless of the digit registers
    pub fn set_display_test(&mut self, device: usize, on: bool) -> Result<(), B::Error> {
        self.write_command(device, Command::DisplayTest, on as u8)
    }

    /// Switch all LEDs of a device off
    pub fn clear_display(&mut self, device: usize) -> Result<(), B::Error> {
        if device >= self.device_count {
            return Ok(());
        }

        for row in 0..DIGITS {
            self.store(device, row, 0)?;
        }

        Ok(())
    }

    /// Switch a single LED of a matrix. Column 0 is the most significant bit of the row.
    pub fn set_led(
        &mut self,
        device: usize,
        row: u8,
        col: u8,
        state: bool,
    ) -> Result<(), B::Error> {
        if device >= self.device_count || row as usize >= DIGITS || col >= 8 {
            return Ok(());
        }

        let row = row as usize;
        let mask = 0b1000_0000 >> col;
        let value = if state {
            self.status[device][row] | mask
        } else {
            self.status[device][row] & !mask
        };

        self.store(device, row, value)
    }

    /// Write all 8 LEDs of a row at once
    pub fn set_row(&mut self, device: usize, row: u8, value: u8) -> Result<(), B::Error> {
        if device >= self.device_count || row as usize >= DIGITS {
            return Ok(());
        }
        self.store(device, row as usize, value)
    }

    /// Write all 8 LEDs of a column, the most significant bit going to row 0.
    ///
    /// The chip has no column registers so this is one `set_led` (and one frame) per row.
    pub fn set_column(&mut self, device: usize, col: u8, value: u8) -> Result<(), B::Error> {
        if device >= self.device_count || col >= 8 {
            return Ok(());
        }

        for row in 0..DIGITS as u8 {
            let on = (value >> (7 - row)) & 0x01 == 1;
            self.set_led(device, row, col, on)?;
        }

        Ok(())
    }

    /// Show a hex digit (0..=15) on a 7 segment position
    pub fn set_digit(
        &mut self,
        device: usize,
        digit: u8,
        value: u8,
        dot: bool,
    ) -> Result<(), B::Error> {
        if device >= self.device_count || digit as usize >= DIGITS {
            return Ok(());
        }

        match self.glyphs.encode_digit(value) {
            Some(segments) => self.store(device, digit as usize, with_dot(segments, dot)),
            None => Ok(()),
        }
    }

    /// Show a character on a 7 segment position. Characters without a glyph are blank.
    pub fn set_char(
        &mut self,
        device: usize,
        digit: u8,
        code: u8,
        dot: bool,
    ) -> Result<(), B::Error> {
        if device >= self.device_count || digit as usize >= DIGITS {
            return Ok(());
        }

        let segments = self.glyphs.encode(code);
        self.store(device, digit as usize, with_dot(segments, dot))
    }

    /// Last value sent to a digit / row register
    pub fn row(&self, device: usize, row: usize) -> Option<u8> {
        if device >= self.device_count {
            return None;
        }
        self.status[device].get(row).copied()
    }

    /// Last values sent to all digit / row registers of a device
    pub fn rows(&self, device: usize) -> Option<&[u8; DIGITS]> {
        if device >= self.device_count {
            return None;
        }
        self.status.get(device)
    }

    // mirror first so the buffer never lags behind what was sent
    fn store(&mut self, device: usize, row: usize, value: u8) -> Result<(), B::Error> {
        self.status[device][row] = value;
        frame::transfer(
            &mut self.bus,
            self.device_count,
            device,
            digit_register(row),
            value,
        )
    }
}
