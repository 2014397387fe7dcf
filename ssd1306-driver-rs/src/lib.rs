//! Blocking driver for the Solomon Systech SSD1306 (128×64) OLED controller.
//!
//! This crate provides [`Ssd1306`], a driver that keeps a shadow
//! [`Framebuffer`] in RAM, encodes every controller register as a
//! validated [`Command`], and talks to the panel over either a two-wire
//! IIC bus or a four-wire SPI bus with a command/data select line.
//!
//! # Quick Start
//!
//! ```ignore
//! use ssd1306_driver_rs::{Address, DisplayConfig, Font, HalIic, HalPin, Ssd1306};
//!
//! let mut oled = Ssd1306::new_iic(HalIic::new(i2c), Address::Sa0Low, HalPin::new(rst), delay);
//! oled.init()?;
//! oled.configure(&DisplayConfig::default())?;
//!
//! oled.draw_string(0, 0, "hello", true, Font::Size16)?;
//! oled.flush()?;
//! ```
//!
//! # Transports
//!
//! The driver is generic over four ports, one per wire group (see
//! [`interface`]). Ports the selected transport does not use are filled
//! with [`Unbound`]. Adapters are provided for `embedded-hal` peripherals
//! ([`HalIic`], [`HalSpi`], [`HalPin`]) and a bit-banged IIC master
//! ([`SoftIic`]).
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging via [`defmt`](https://docs.rs/defmt).

#![cfg_attr(not(test), no_std)]

pub mod command;
pub mod config;
mod control;
pub mod driver;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod info;
pub mod interface;
pub mod soft_iic;

/// Panel width in pixels.
pub const WIDTH: u8 = 128;
/// Panel height in pixels.
pub const HEIGHT: u8 = 64;
/// Number of 8-row pages.
pub const PAGES: u8 = HEIGHT / 8;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use command::{
    AddressingMode, Command, ComLeftRightRemap, ComPinsConf, DeselectLevel, DisplayMode,
    FadeBlink, ScanDirection, ScrollFrames, SegmentRemap,
};
pub use config::DisplayConfig;
pub use driver::Ssd1306;
pub use error::{Binding, Error, Param};
pub use font::Font;
pub use framebuffer::Framebuffer;
pub use info::{info, ChipInfo};
pub use interface::{
    Address, ControlLine, DataMode, HalIic, HalPin, HalSpi, IicBus, Interface, SpiBus, Unbound,
};
pub use soft_iic::SoftIic;
