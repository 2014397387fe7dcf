//! Core SSD1306 driver: lifecycle, transport dispatch and framebuffer
//! synchronization.
//!
//! [`Ssd1306`] owns the transport ports and a shadow [`Framebuffer`]. It
//! is constructed without any bus traffic, brought up explicitly with
//! [`init()`](Ssd1306::init), and torn down with
//! [`deinit()`](Ssd1306::deinit). Register setters live in the
//! `control` module and the power-up sequence in [`crate::config`].

use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;

use crate::command::{Command, SET_HIGH_COLUMN_START, SET_LOW_COLUMN_START, SET_PAGE_START_ADDRESS};
use crate::error::{Binding, Error, Param};
use crate::font::Font;
use crate::framebuffer::Framebuffer;
use crate::interface::{Address, ControlLine, DataMode, IicBus, Interface, SpiBus, Unbound};
use crate::PAGES;

/// Time the reset line is held low during `init`.
const RESET_PULSE_MS: u32 = 100;

/// Driver for one SSD1306 panel.
///
/// # Lifecycle
///
/// 1. [`Ssd1306::new_iic()`] / [`Ssd1306::new_spi()`]: construct the
///    driver without any bus traffic.
/// 2. [`Ssd1306::init()`]: pulse reset and open the selected bus.
/// 3. Configure registers ([`Ssd1306::configure()`] or the individual
///    setters) and draw into the framebuffer.
/// 4. [`Ssd1306::flush()`]: push the framebuffer to the panel.
/// 5. [`Ssd1306::deinit()`]: power down and release the bus.
///
/// Framebuffer-only operations (`gram_*`, `draw_*`, `fill_rect`) work in
/// either state; everything that reaches the bus requires `init`.
///
/// # Example
///
/// ```no_run
/// use ssd1306_driver_rs::{Address, Font, HalIic, HalPin, Ssd1306};
///
/// # fn example(
/// #     i2c: impl embedded_hal::i2c::I2c,
/// #     rst: impl embedded_hal::digital::OutputPin,
/// #     delay: impl embedded_hal::delay::DelayNs,
/// # ) -> Result<(), ssd1306_driver_rs::Error> {
/// let mut oled = Ssd1306::new_iic(HalIic::new(i2c), Address::Sa0Low, HalPin::new(rst), delay);
/// oled.init()?;
/// oled.draw_string(0, 0, "ready", true, Font::Size12)?;
/// oled.flush()?;
/// # Ok(())
/// # }
/// ```
pub struct Ssd1306<IIC, SPI, DC, RST, D> {
    iic: IIC,
    spi: SPI,
    dc: DC,
    rst: RST,
    delay: D,
    interface: Interface,
    address: Address,
    /// Set to `true` after a successful `init()` call.
    initialized: bool,
    gram: Framebuffer,
}

impl<IIC, RST, D> Ssd1306<IIC, Unbound, Unbound, RST, D>
where
    IIC: IicBus,
    RST: ControlLine,
    D: DelayNs,
{
    /// Construct an uninitialised driver on the two-wire bus.
    ///
    /// # Arguments
    /// * `iic` - bus port (takes ownership for exclusive access).
    /// * `address` - device address selected by the SA0 pin.
    /// * `rst` - reset line.
    /// * `delay` - used for the reset pulse.
    pub fn new_iic(iic: IIC, address: Address, rst: RST, delay: D) -> Self {
        let mut driver = Self::new(iic, Unbound, Unbound, rst, delay);
        driver.address = address;
        driver
    }
}

impl<SPI, DC, RST, D> Ssd1306<Unbound, SPI, DC, RST, D>
where
    SPI: SpiBus,
    DC: ControlLine,
    RST: ControlLine,
    D: DelayNs,
{
    /// Construct an uninitialised driver on the four-wire bus.
    ///
    /// # Arguments
    /// * `spi` - bus port (takes ownership for exclusive access).
    /// * `dc` - command/data select line.
    /// * `rst` - reset line.
    /// * `delay` - used for the reset pulse.
    pub fn new_spi(spi: SPI, dc: DC, rst: RST, delay: D) -> Self {
        let mut driver = Self::new(Unbound, spi, dc, rst, delay);
        driver.interface = Interface::Spi;
        driver
    }
}

impl<IIC, SPI, DC, RST, D> Ssd1306<IIC, SPI, DC, RST, D>
where
    IIC: IicBus,
    SPI: SpiBus,
    DC: ControlLine,
    RST: ControlLine,
    D: DelayNs,
{
    /// Construct an uninitialised driver with every port supplied.
    ///
    /// The transport defaults to [`Interface::Iic`] at
    /// [`Address::Sa0Low`]; change it with
    /// [`set_interface()`](Self::set_interface) before `init`. No bus
    /// traffic is generated.
    pub fn new(iic: IIC, spi: SPI, dc: DC, rst: RST, delay: D) -> Self {
        Self {
            iic,
            spi,
            dc,
            rst,
            delay,
            interface: Interface::default(),
            address: Address::default(),
            initialized: false,
            gram: Framebuffer::new(),
        }
    }

    /// Give the ports back, in constructor order.
    pub fn release(self) -> (IIC, SPI, DC, RST, D) {
        (self.iic, self.spi, self.dc, self.rst, self.delay)
    }

    // ── Transport selection ──────────────────────────────────────────

    pub fn interface(&self) -> Interface {
        self.interface
    }

    /// Select the bus used by the next `init`.
    ///
    /// # Errors
    /// [`Error::AlreadyInitialized`] while the handle is initialized.
    pub fn set_interface(&mut self, interface: Interface) -> Result<(), Error> {
        if self.initialized {
            return Err(Error::AlreadyInitialized);
        }
        self.interface = interface;
        Ok(())
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Select the IIC device address.
    ///
    /// # Errors
    /// [`Error::AlreadyInitialized`] while the handle is initialized.
    pub fn set_address(&mut self, address: Address) -> Result<(), Error> {
        if self.initialized {
            return Err(Error::AlreadyInitialized);
        }
        self.address = address;
        Ok(())
    }

    /// Check whether the handle has been successfully initialised.
    ///
    /// No bus traffic is generated.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Reset the controller and open the selected bus.
    ///
    /// Every port the selected transport needs is checked before any line
    /// moves. The reset line is then held low for 100 ms. A failure
    /// part-way through releases whatever was already set up and leaves
    /// the handle uninitialized. Calling `init` on an initialized handle
    /// does nothing.
    ///
    /// Registers are not programmed here; follow up with
    /// [`configure()`](Self::configure).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingBinding`] if a required port is
    /// [`Unbound`], or [`Error::Transport`] if a line or the bus fails.
    pub fn init(&mut self) -> Result<(), Error> {
        if self.initialized {
            return Ok(());
        }
        self.check_bindings()?;

        let dc_bound = self.dc.is_bound();
        if dc_bound {
            self.dc.init().map_err(|e| {
                #[cfg(feature = "defmt")]
                defmt::error!("ssd1306: command/data line init failed");
                Error::Transport(e)
            })?;
        }

        if let Err(_e) = self.rst.init() {
            #[cfg(feature = "defmt")]
            defmt::error!("ssd1306: reset line init failed");
            self.release_lines(false, dc_bound);
            return Err(Error::Transport(DisplayError::RSError));
        }

        if let Err(e) = self.reset_pulse() {
            #[cfg(feature = "defmt")]
            defmt::error!("ssd1306: reset pulse failed");
            self.release_lines(true, dc_bound);
            return Err(e);
        }

        let opened = match self.interface {
            Interface::Iic => self.iic.open(),
            Interface::Spi => self.spi.open(),
        };
        if let Err(e) = opened {
            #[cfg(feature = "defmt")]
            defmt::error!("ssd1306: {} open failed", self.interface);
            self.release_lines(true, dc_bound);
            return Err(Error::Transport(e));
        }

        self.initialized = true;
        #[cfg(feature = "defmt")]
        defmt::info!("ssd1306: initialised on {}", self.interface);
        Ok(())
    }

    /// Power the panel down and release the bus.
    ///
    /// Sends charge pump off and display off, deinitializes the reset and
    /// command/data lines, then closes the bus. Every step is attempted
    /// even if an earlier one fails, and the handle is always left
    /// uninitialized, so `init` can be retried.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] if the handle is not initialized,
    /// otherwise the first step failure.
    pub fn deinit(&mut self) -> Result<(), Error> {
        self.ensure_initialized()?;

        let mut first: Result<(), Error> = Ok(());
        let mut record = |step: Result<(), Error>| {
            if first.is_ok() {
                first = step;
            }
        };

        record(self.send(Command::ChargePump(false)));
        record(self.send(Command::Display(false)));
        record(
            self.rst
                .deinit()
                .map_err(|_| Error::Transport(DisplayError::RSError)),
        );
        if self.dc.is_bound() {
            record(self.dc.deinit().map_err(Error::Transport));
        }
        let closed = match self.interface {
            Interface::Iic => self.iic.close(),
            Interface::Spi => self.spi.close(),
        };
        record(closed.map_err(Error::Transport));

        self.initialized = false;

        #[cfg(feature = "defmt")]
        match &first {
            Ok(()) => defmt::info!("ssd1306: deinitialised"),
            Err(e) => defmt::error!("ssd1306: deinit incomplete: {}", e),
        }
        first
    }

    fn check_bindings(&self) -> Result<(), Error> {
        let missing = if !self.rst.is_bound() {
            Some(Binding::Reset)
        } else {
            match self.interface {
                Interface::Iic if !self.iic.is_bound() => Some(Binding::Iic),
                Interface::Spi if !self.spi.is_bound() => Some(Binding::Spi),
                Interface::Spi if !self.dc.is_bound() => Some(Binding::CommandData),
                _ => None,
            }
        };
        match missing {
            Some(binding) => {
                #[cfg(feature = "defmt")]
                defmt::error!("ssd1306: {} is not bound", binding);
                Err(Error::MissingBinding(binding))
            }
            None => Ok(()),
        }
    }

    fn reset_pulse(&mut self) -> Result<(), Error> {
        self.rst
            .set(false)
            .map_err(|_| Error::Transport(DisplayError::RSError))?;
        self.delay.delay_ms(RESET_PULSE_MS);
        self.rst
            .set(true)
            .map_err(|_| Error::Transport(DisplayError::RSError))
    }

    /// Best-effort teardown after a failed `init`.
    fn release_lines(&mut self, rst: bool, dc: bool) {
        if rst {
            let _ = self.rst.deinit();
        }
        if dc {
            let _ = self.dc.deinit();
        }
    }

    fn ensure_initialized(&self) -> Result<(), Error> {
        if self.initialized {
            Ok(())
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("ssd1306: not initialised");
            Err(Error::NotInitialized)
        }
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Route one payload over the selected bus.
    ///
    /// IIC: one transaction prefixed with the control byte. SPI: drive
    /// the command/data line, then one payload write.
    fn write(&mut self, bytes: &[u8], mode: DataMode) -> Result<(), Error> {
        let result = match self.interface {
            Interface::Iic => self
                .iic
                .write(self.address.as_u8(), mode.control_byte(), bytes),
            Interface::Spi => self
                .dc
                .set(mode.dc_level())
                .and_then(|()| self.spi.write(bytes)),
        };
        result.map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::error!("ssd1306: write failed ({} bytes, {})", bytes.len(), mode);
            Error::Transport(e)
        })
    }

    /// Encode and send one register command.
    pub(crate) fn send(&mut self, command: Command) -> Result<(), Error> {
        self.ensure_initialized()?;
        let encoded = command.encode().map_err(reject)?;
        self.write(encoded.as_bytes(), DataMode::Command)
    }

    /// Send raw command bytes.
    ///
    /// # Errors
    /// [`Error::NotInitialized`], [`Param::Payload`] for an empty slice,
    /// or [`Error::Transport`].
    pub fn write_command(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.write_raw(bytes, DataMode::Command)
    }

    /// Send raw GDDRAM data bytes at the controller's current pointer.
    ///
    /// # Errors
    /// As [`write_command()`](Self::write_command).
    pub fn write_data(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.write_raw(bytes, DataMode::Data)
    }

    fn write_raw(&mut self, bytes: &[u8], mode: DataMode) -> Result<(), Error> {
        self.ensure_initialized()?;
        if bytes.is_empty() {
            return Err(reject(Param::Payload));
        }
        self.write(bytes, mode)
    }

    // ── Synchronization ──────────────────────────────────────────────

    /// Point the controller at column 0 of `page`.
    fn select_page(&mut self, page: u8) -> Result<(), Error> {
        self.write(&[SET_PAGE_START_ADDRESS | page], DataMode::Command)?;
        self.write(&[SET_LOW_COLUMN_START], DataMode::Command)?;
        self.write(&[SET_HIGH_COLUMN_START], DataMode::Command)
    }

    /// Transfer the framebuffer to the panel, one page at a time.
    ///
    /// Each page costs three single-byte commands (page, low column, high
    /// column) and one 128-byte data write. A failure stops at the failing
    /// page; earlier pages stay as sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] if [`init()`](Self::init) has
    /// not been called, or [`Error::Transport`] on a bus-level failure.
    pub fn flush(&mut self) -> Result<(), Error> {
        self.ensure_initialized()?;
        for page in 0..PAGES {
            self.select_page(page)?;
            let data = self.gram.page(page);
            self.write(&data, DataMode::Data)?;
        }
        Ok(())
    }

    /// Blank the framebuffer and the panel together.
    ///
    /// Same traversal as [`flush()`](Self::flush), zeroing each page in
    /// the framebuffer just before it is sent.
    pub fn clear(&mut self) -> Result<(), Error> {
        self.ensure_initialized()?;
        for page in 0..PAGES {
            self.gram.clear_page(page);
            self.select_page(page)?;
            let data = self.gram.page(page);
            self.write(&data, DataMode::Data)?;
        }
        Ok(())
    }

    /// Set one pixel in the framebuffer and push the byte holding it.
    ///
    /// # Errors
    /// [`Error::NotInitialized`], [`Param::X`] / [`Param::Y`], or
    /// [`Error::Transport`].
    pub fn write_point(&mut self, x: u8, y: u8, on: bool) -> Result<(), Error> {
        self.ensure_initialized()?;
        self.gram.set_pixel(x, y, on).map_err(reject)?;

        let byte = self.gram.byte_at(x, y);
        self.write(&[SET_PAGE_START_ADDRESS | (y / 8)], DataMode::Command)?;
        self.write(&[SET_LOW_COLUMN_START | (x & 0x0F)], DataMode::Command)?;
        self.write(&[SET_HIGH_COLUMN_START | (x >> 4)], DataMode::Command)?;
        self.write(&[byte], DataMode::Data)
    }

    /// Read one pixel. The framebuffer is authoritative; the panel is
    /// never read back.
    pub fn read_point(&self, x: u8, y: u8) -> Result<bool, Error> {
        self.ensure_initialized()?;
        self.gram.pixel(x, y).map_err(reject)
    }

    // ── Framebuffer ──────────────────────────────────────────────────

    /// Set one pixel in the framebuffer only.
    pub fn gram_write_point(&mut self, x: u8, y: u8, on: bool) -> Result<(), Error> {
        self.gram.set_pixel(x, y, on).map_err(reject)
    }

    /// Read one pixel from the framebuffer.
    pub fn gram_read_point(&self, x: u8, y: u8) -> Result<bool, Error> {
        self.gram.pixel(x, y).map_err(reject)
    }

    /// See [`Framebuffer::draw_string()`].
    pub fn draw_string(
        &mut self,
        x: u8,
        y: u8,
        text: &str,
        on: bool,
        font: Font,
    ) -> Result<(), Error> {
        self.gram.draw_string(x, y, text, on, font).map_err(reject)
    }

    /// See [`Framebuffer::fill_rect()`].
    pub fn fill_rect(
        &mut self,
        left: u8,
        top: u8,
        right: u8,
        bottom: u8,
        on: bool,
    ) -> Result<(), Error> {
        self.gram
            .fill_rect(left, top, right, bottom, on)
            .map_err(reject)
    }

    /// See [`Framebuffer::draw_picture()`].
    pub fn draw_picture(
        &mut self,
        left: u8,
        top: u8,
        right: u8,
        bottom: u8,
        img: &[u8],
    ) -> Result<(), Error> {
        self.gram
            .draw_picture(left, top, right, bottom, img)
            .map_err(reject)
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.gram
    }

    /// Mutable framebuffer, an `embedded-graphics` [`DrawTarget`].
    ///
    /// [`DrawTarget`]: embedded_graphics::draw_target::DrawTarget
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.gram
    }
}

/// Log and wrap a rejected argument.
pub(crate) fn reject(param: Param) -> Error {
    #[cfg(feature = "defmt")]
    defmt::warn!("ssd1306: {} is invalid", param);
    Error::InvalidParameter(param)
}
