//! Error types for the SSD1306 driver.

use core::fmt;

use display_interface::DisplayError;

/// Errors that can occur during SSD1306 operations.
///
/// Every bus and control-line failure is reported as a [`DisplayError`],
/// so this enum is non-generic over the transport in use.
#[derive(Debug)]
pub enum Error {
    /// The IIC bus, SPI bus, or a control line failed.
    Transport(DisplayError),
    /// An operation that talks to the controller was attempted before
    /// [`Ssd1306::init()`](crate::Ssd1306::init) or after
    /// [`Ssd1306::deinit()`](crate::Ssd1306::deinit).
    NotInitialized,
    /// The transport selection was changed while the handle is
    /// initialized.
    AlreadyInitialized,
    /// An argument is outside its register field or the panel geometry.
    InvalidParameter(Param),
    /// A port required by the selected transport is not wired.
    MissingBinding(Binding),
}

/// Names the argument rejected by [`Error::InvalidParameter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Param {
    X,
    Y,
    Left,
    Top,
    Right,
    Bottom,
    /// `left > right` or `top > bottom`.
    Bounds,
    /// Image slice shorter than the rectangle it fills.
    Image,
    /// Raw payload is empty.
    Payload,
    Address,
    StartAddress,
    EndAddress,
    Frames,
    StartPage,
    EndPage,
    Rows,
    Line,
    StartRow,
    EndRow,
    /// Scroll area is larger than the fixed area above it.
    ScrollArea,
    MultiplexRatio,
    Offset,
    OscillatorFrequency,
    ClockDivide,
    Phase1Period,
    Phase2Period,
}

/// Names the port reported by [`Error::MissingBinding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Binding {
    Iic,
    Spi,
    CommandData,
    Reset,
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Error::Transport(e)
    }
}

impl From<Param> for Error {
    fn from(p: Param) -> Self {
        Error::InvalidParameter(p)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "transport error: {:?}", e),
            Error::NotInitialized => f.write_str("not initialized"),
            Error::AlreadyInitialized => f.write_str("already initialized"),
            Error::InvalidParameter(p) => write!(f, "invalid parameter: {:?}", p),
            Error::MissingBinding(b) => write!(f, "missing binding: {:?}", b),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Transport(_e) => defmt::write!(f, "Transport error"),
            Error::NotInitialized => defmt::write!(f, "Not initialized"),
            Error::AlreadyInitialized => defmt::write!(f, "Already initialized"),
            Error::InvalidParameter(p) => defmt::write!(f, "Invalid parameter: {}", p),
            Error::MissingBinding(b) => defmt::write!(f, "Missing binding: {}", b),
        }
    }
}
