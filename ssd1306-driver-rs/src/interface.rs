//! Transport ports consumed by the driver.
//!
//! The driver never talks to a peripheral directly. It is handed one
//! implementation of each port at construction time:
//!
//! - [`IicBus`]: two-wire bus carrying a control byte ahead of each payload.
//! - [`SpiBus`]: four-wire bus; command vs. data is signalled on a
//!   separate line.
//! - [`ControlLine`]: a single output line (command/data select, reset).
//!
//! Ports that are not wired for the selected transport are filled with
//! [`Unbound`]. [`HalIic`], [`HalSpi`] and [`HalPin`] adapt `embedded-hal`
//! peripherals; [`SoftIic`](crate::soft_iic::SoftIic) bit-bangs the
//! two-wire bus over GPIO.

use display_interface::DisplayError;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::{I2c, Operation};
use embedded_hal::spi::SpiDevice;

// ── Transport selection ──────────────────────────────────────────────────

/// Which bus carries controller traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Interface {
    #[default]
    Iic,
    Spi,
}

/// 7-bit IIC device address, selected by the SA0 pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Address {
    #[default]
    Sa0Low = 0x3C,
    Sa0High = 0x3D,
}

impl Address {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Whether a payload is interpreted as commands or as GDDRAM data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataMode {
    Command,
    Data,
}

impl DataMode {
    /// IIC control byte sent ahead of the payload (Co = 0).
    pub fn control_byte(self) -> u8 {
        match self {
            DataMode::Command => 0x00,
            DataMode::Data => 0x40,
        }
    }

    /// Level of the command/data select line on SPI (`true` = high).
    pub fn dc_level(self) -> bool {
        matches!(self, DataMode::Data)
    }
}

// ── Ports ────────────────────────────────────────────────────────────────

/// Two-wire bus port.
pub trait IicBus {
    /// Prepare the bus. Called once by `init`.
    fn open(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Release the bus. Called once by `deinit`.
    fn close(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Write `control` followed by `bytes` to `address` in one
    /// transaction.
    fn write(&mut self, address: u8, control: u8, bytes: &[u8]) -> Result<(), DisplayError>;

    /// `false` for placeholder ports; checked before `init` touches
    /// hardware.
    fn is_bound(&self) -> bool {
        true
    }
}

/// Four-wire bus port.
pub trait SpiBus {
    fn open(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn close(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Write `bytes` with chip select held for the whole payload.
    fn write(&mut self, bytes: &[u8]) -> Result<(), DisplayError>;

    fn is_bound(&self) -> bool {
        true
    }
}

/// Single output line.
pub trait ControlLine {
    fn init(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn deinit(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Drive the line high (`true`) or low (`false`).
    fn set(&mut self, high: bool) -> Result<(), DisplayError>;

    fn is_bound(&self) -> bool {
        true
    }
}

/// Placeholder for a port that is not wired.
///
/// Reports itself unbound, and every operation fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbound;

impl IicBus for Unbound {
    fn open(&mut self) -> Result<(), DisplayError> {
        Err(DisplayError::BusWriteError)
    }

    fn write(&mut self, _address: u8, _control: u8, _bytes: &[u8]) -> Result<(), DisplayError> {
        Err(DisplayError::BusWriteError)
    }

    fn is_bound(&self) -> bool {
        false
    }
}

impl SpiBus for Unbound {
    fn open(&mut self) -> Result<(), DisplayError> {
        Err(DisplayError::BusWriteError)
    }

    fn write(&mut self, _bytes: &[u8]) -> Result<(), DisplayError> {
        Err(DisplayError::BusWriteError)
    }

    fn is_bound(&self) -> bool {
        false
    }
}

impl ControlLine for Unbound {
    fn init(&mut self) -> Result<(), DisplayError> {
        Err(DisplayError::DCError)
    }

    fn set(&mut self, _high: bool) -> Result<(), DisplayError> {
        Err(DisplayError::DCError)
    }

    fn is_bound(&self) -> bool {
        false
    }
}

// ── embedded-hal adapters ────────────────────────────────────────────────

/// [`IicBus`] over any blocking `embedded-hal` I2C peripheral.
pub struct HalIic<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> HalIic<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the peripheral back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> IicBus for HalIic<I2C> {
    fn write(&mut self, address: u8, control: u8, bytes: &[u8]) -> Result<(), DisplayError> {
        // Adjacent write operations go out as one frame, no repeated start.
        self.i2c
            .transaction(
                address,
                &mut [Operation::Write(&[control]), Operation::Write(bytes)],
            )
            .map_err(|_| DisplayError::BusWriteError)
    }
}

/// [`SpiBus`] over any blocking `embedded-hal` SPI device.
pub struct HalSpi<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> HalSpi<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> SpiBus for HalSpi<SPI> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.spi
            .write(bytes)
            .map_err(|_| DisplayError::BusWriteError)
    }
}

/// [`ControlLine`] over any `embedded-hal` output pin.
///
/// Pin failures are reported as [`DisplayError::DCError`]; the driver
/// remaps failures on the reset line to [`DisplayError::RSError`].
pub struct HalPin<P> {
    pin: P,
}

impl<P: OutputPin> HalPin<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> ControlLine for HalPin<P> {
    fn set(&mut self, high: bool) -> Result<(), DisplayError> {
        let result = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| DisplayError::DCError)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
