//! The three wire serial link to the chain of chips.
//!
//! The chips latch the last 16 bits shifted in when chip select (LOAD on the max7219) rises,
//! so a bus only needs two operations: frame a transfer with the select line and shift
//! bytes out one bit at a time.

use embedded_hal::digital::v2::OutputPin;

/// Bit order used when shifting a byte out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    MsbFirst,
    LsbFirst,
}

/// Anything that can clock bytes into the chain of chips
pub trait SerialBus {
    type Error;

    /// `true` pulls chip select low (start of a frame), `false` raises it (latch)
    fn set_select(&mut self, active: bool) -> Result<(), Self::Error>;

    /// Shift a single byte out on the data line
    fn shift_out(&mut self, value: u8, order: BitOrder) -> Result<(), Self::Error>;
}

/// Bit-banged bus over three gpio pins. All pins must share the same error type.
pub struct BitBangBus<DATA, CLK, CS> {
    data: DATA,
    clk: CLK,
    cs: CS,
}

impl<DATA, CLK, CS, PinError> BitBangBus<DATA, CLK, CS>
where
    DATA: OutputPin<Error = PinError>,
    CLK: OutputPin<Error = PinError>,
    CS: OutputPin<Error = PinError>,
{
    pub fn new(data: DATA, clk: CLK, cs: CS) -> Self {
        BitBangBus { data, clk, cs }
    }

    /// Give the pins back
    pub fn release(self) -> (DATA, CLK, CS) {
        (self.data, self.clk, self.cs)
    }
}

impl<DATA, CLK, CS, PinError> SerialBus for BitBangBus<DATA, CLK, CS>
where
    DATA: OutputPin<Error = PinError>,
    CLK: OutputPin<Error = PinError>,
    CS: OutputPin<Error = PinError>,
{
    type Error = PinError;

    fn set_select(&mut self, active: bool) -> Result<(), PinError> {
        if active {
            self.cs.set_low()
        } else {
            self.cs.set_high()
        }
    }

    fn shift_out(&mut self, value: u8, order: BitOrder) -> Result<(), PinError> {
        for i in 0..8 {
            let mask = match order {
                BitOrder::MsbFirst => 1 << (7 - i),
                BitOrder::LsbFirst => 1 << i,
            };

            if value & mask > 0 {
                self.data.set_high()?;
            } else {
                self.data.set_low()?;
            }

            self.clk.set_high()?;
            self.clk.set_low()?;
        }

        Ok(())
    }
}
