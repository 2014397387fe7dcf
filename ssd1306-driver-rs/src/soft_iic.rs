//! Bit-banged two-wire bus over two GPIO lines.
//!
//! [`SoftIic`] is an [`IicBus`] for boards where the display is wired to
//! pins without a hardware I2C block. SDA must be usable both as an
//! open-drain output and as an input (for sampling ACK).
//!
//! Timing is conservative (~100 kHz): 4 µs around START/STOP, 2 µs per
//! clock half-period.

use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::interface::IicBus;

/// Number of SDA polls before a missing ACK aborts the transfer.
const ACK_POLLS: u16 = 250;

/// Software two-wire master.
pub struct SoftIic<SCL, SDA, D> {
    scl: SCL,
    sda: SDA,
    delay: D,
}

impl<SCL, SDA, D> SoftIic<SCL, SDA, D>
where
    SCL: OutputPin,
    SDA: OutputPin + InputPin,
    D: DelayNs,
{
    pub fn new(scl: SCL, sda: SDA, delay: D) -> Self {
        Self { scl, sda, delay }
    }

    pub fn release(self) -> (SCL, SDA, D) {
        (self.scl, self.sda, self.delay)
    }

    fn scl(&mut self, high: bool) -> Result<(), DisplayError> {
        let result = if high {
            self.scl.set_high()
        } else {
            self.scl.set_low()
        };
        result.map_err(|_| DisplayError::BusWriteError)
    }

    fn sda(&mut self, high: bool) -> Result<(), DisplayError> {
        let result = if high {
            self.sda.set_high()
        } else {
            self.sda.set_low()
        };
        result.map_err(|_| DisplayError::BusWriteError)
    }

    /// SDA falls while SCL is high.
    fn start(&mut self) -> Result<(), DisplayError> {
        self.sda(true)?;
        self.scl(true)?;
        self.delay.delay_us(4);
        self.sda(false)?;
        self.delay.delay_us(4);
        self.scl(false)
    }

    /// SDA rises while SCL is high.
    fn stop(&mut self) -> Result<(), DisplayError> {
        self.scl(false)?;
        self.sda(false)?;
        self.delay.delay_us(4);
        self.scl(true)?;
        self.delay.delay_us(4);
        self.sda(true)?;
        self.delay.delay_us(4);
        Ok(())
    }

    fn send_byte(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.scl(false)?;
        for bit in (0..8).rev() {
            self.sda(byte & (1 << bit) != 0)?;
            self.delay.delay_us(2);
            self.scl(true)?;
            self.delay.delay_us(2);
            self.scl(false)?;
            self.delay.delay_us(2);
        }
        Ok(())
    }

    /// Release SDA, clock the ninth bit and wait for the slave to pull
    /// SDA low.
    fn wait_ack(&mut self) -> Result<(), DisplayError> {
        self.sda(true)?;
        self.delay.delay_us(1);
        self.scl(true)?;
        self.delay.delay_us(1);

        let mut polls = 0;
        while !self.sda.is_low().map_err(|_| DisplayError::BusWriteError)? {
            polls += 1;
            if polls > ACK_POLLS {
                #[cfg(feature = "defmt")]
                defmt::warn!("soft iic: no ACK");
                self.stop()?;
                return Err(DisplayError::BusWriteError);
            }
        }
        self.scl(false)
    }

    fn send_acked(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.send_byte(byte)?;
        self.wait_ack()
    }

    fn transfer(&mut self, address: u8, control: u8, bytes: &[u8]) -> Result<(), DisplayError> {
        self.start()?;
        self.send_acked(address << 1)?;
        self.send_acked(control)?;
        for &byte in bytes {
            self.send_acked(byte)?;
        }
        self.stop()
    }
}

impl<SCL, SDA, D> IicBus for SoftIic<SCL, SDA, D>
where
    SCL: OutputPin,
    SDA: OutputPin + InputPin,
    D: DelayNs,
{
    /// Idle the bus: both lines released high.
    fn open(&mut self) -> Result<(), DisplayError> {
        self.sda(true)?;
        self.scl(true)
    }

    /// `address` is the 7-bit device address; the write bit is appended
    /// here.
    fn write(&mut self, address: u8, control: u8, bytes: &[u8]) -> Result<(), DisplayError> {
        self.transfer(address, control, bytes)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
