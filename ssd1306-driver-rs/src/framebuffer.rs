//! In-memory shadow of the controller's GDDRAM.
//!
//! The buffer is column-major: byte `x * PAGES + page` holds the eight
//! vertically stacked pixels of column `x` in that page, bit `n` being
//! row `page * 8 + n`. All drawing happens here; nothing reaches the panel
//! until the driver pushes a page.

use core::convert::Infallible;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::error::Param;
use crate::font::Font;
use crate::{HEIGHT, PAGES, WIDTH};

const BUFFER_LEN: usize = WIDTH as usize * PAGES as usize;

/// Shadow framebuffer, 128×64 at one bit per pixel.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    buf: [u8; BUFFER_LEN],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Framebuffer").finish_non_exhaustive()
    }
}

fn check_point(x: u8, y: u8) -> Result<(), Param> {
    if x >= WIDTH {
        return Err(Param::X);
    }
    if y >= HEIGHT {
        return Err(Param::Y);
    }
    Ok(())
}

/// Validate a rectangle given by inclusive corners and return its pixel
/// count.
fn check_rect(left: u8, top: u8, right: u8, bottom: u8) -> Result<usize, Param> {
    if left >= WIDTH {
        return Err(Param::Left);
    }
    if top >= HEIGHT {
        return Err(Param::Top);
    }
    if right >= WIDTH {
        return Err(Param::Right);
    }
    if bottom >= HEIGHT {
        return Err(Param::Bottom);
    }
    if left > right || top > bottom {
        return Err(Param::Bounds);
    }
    Ok((right - left + 1) as usize * (bottom - top + 1) as usize)
}

impl Framebuffer {
    /// An all-dark buffer.
    pub const fn new() -> Self {
        Self {
            buf: [0; BUFFER_LEN],
        }
    }

    fn index(x: u8, page: u8) -> usize {
        x as usize * PAGES as usize + page as usize
    }

    /// Write one pixel without bounds checks beyond the buffer length.
    fn put(&mut self, x: u8, y: u8, on: bool) {
        let byte = &mut self.buf[Self::index(x, y / 8)];
        let mask = 1 << (y % 8);
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    /// Set or clear the pixel at `(x, y)`.
    ///
    /// # Errors
    /// [`Param::X`] if `x > 127`, [`Param::Y`] if `y > 63`; the buffer is
    /// untouched in either case.
    pub fn set_pixel(&mut self, x: u8, y: u8, on: bool) -> Result<(), Param> {
        check_point(x, y)?;
        self.put(x, y, on);
        Ok(())
    }

    /// Read the pixel at `(x, y)`.
    pub fn pixel(&self, x: u8, y: u8) -> Result<bool, Param> {
        check_point(x, y)?;
        Ok(self.buf[Self::index(x, y / 8)] & (1 << (y % 8)) != 0)
    }

    /// The byte holding pixel `(x, y)` and its seven page neighbours.
    pub(crate) fn byte_at(&self, x: u8, y: u8) -> u8 {
        self.buf[Self::index(x, y / 8)]
    }

    /// Column bytes of page `page` in transmission order.
    ///
    /// # Panics
    /// If `page > 7`.
    pub fn page(&self, page: u8) -> [u8; WIDTH as usize] {
        let mut out = [0u8; WIDTH as usize];
        for (x, byte) in out.iter_mut().enumerate() {
            *byte = self.buf[Self::index(x as u8, page)];
        }
        out
    }

    /// Zero page `page`.
    pub(crate) fn clear_page(&mut self, page: u8) {
        for x in 0..WIDTH {
            self.buf[Self::index(x, page)] = 0;
        }
    }

    /// Zero the whole buffer.
    pub fn clear(&mut self) {
        self.buf = [0; BUFFER_LEN];
    }

    /// Raw buffer, `x * 8 + page` indexed.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Paint one glyph cell with its top-left corner at `(x, y)`.
    ///
    /// Lit glyph pixels take `on`, the rest of the cell takes `!on`, so the
    /// cell always replaces what was under it. Pixels falling outside the
    /// panel are dropped.
    pub fn draw_glyph(&mut self, x: u8, y: u8, c: char, font: Font, on: bool) {
        let cell = font.glyph(c);
        for dx in 0..cell.width() {
            for dy in 0..cell.height() {
                let (px, py) = (x as u16 + dx as u16, y as u16 + dy as u16);
                if px < WIDTH as u16 && py < HEIGHT as u16 {
                    self.put(px as u8, py as u8, cell.is_set(dx, dy) == on);
                }
            }
        }
    }

    /// Render printable ASCII starting at `(x, y)`.
    ///
    /// Rendering stops at the end of `text` or at the first character
    /// outside `' '..='~'`. A glyph that would cross the right edge starts
    /// a new line `font` rows down; a line that would cross the bottom edge
    /// restarts at the origin and overwrites what is there.
    ///
    /// # Errors
    /// [`Param::X`] / [`Param::Y`] if the start point is off the panel.
    pub fn draw_string(
        &mut self,
        x: u8,
        y: u8,
        text: &str,
        on: bool,
        font: Font,
    ) -> Result<(), Param> {
        check_point(x, y)?;

        let (w, h) = (font.width(), font.height());
        let (mut x, mut y) = (x, y);
        for c in text.chars().take_while(|c| (' '..='~').contains(c)) {
            if x > WIDTH - 1 - w {
                x = 0;
                y += h;
            }
            if y > HEIGHT - 1 - h {
                x = 0;
                y = 0;
            }
            self.draw_glyph(x, y, c, font, on);
            x += w;
        }
        Ok(())
    }

    /// Fill the rectangle with inclusive corners `(left, top)` and
    /// `(right, bottom)`.
    ///
    /// # Errors
    /// [`Param::Left`], [`Param::Top`], [`Param::Right`] or
    /// [`Param::Bottom`] for a corner off the panel, [`Param::Bounds`] if
    /// the corners are swapped.
    pub fn fill_rect(
        &mut self,
        left: u8,
        top: u8,
        right: u8,
        bottom: u8,
        on: bool,
    ) -> Result<(), Param> {
        check_rect(left, top, right, bottom)?;
        for x in left..=right {
            for y in top..=bottom {
                self.put(x, y, on);
            }
        }
        Ok(())
    }

    /// Copy a one-byte-per-pixel image into the rectangle, columns
    /// outermost. Any non-zero byte lights its pixel.
    ///
    /// # Errors
    /// As [`fill_rect()`](Self::fill_rect), plus [`Param::Image`] if `img`
    /// holds fewer bytes than the rectangle has pixels.
    pub fn draw_picture(
        &mut self,
        left: u8,
        top: u8,
        right: u8,
        bottom: u8,
        img: &[u8],
    ) -> Result<(), Param> {
        let len = check_rect(left, top, right, bottom)?;
        if img.len() < len {
            return Err(Param::Image);
        }
        let mut pixels = img.iter();
        for x in left..=right {
            for y in top..=bottom {
                if let Some(&p) = pixels.next() {
                    self.put(x, y, p != 0);
                }
            }
        }
        Ok(())
    }
}

// ── embedded-graphics ────────────────────────────────────────────────────

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if let (Ok(x), Ok(y)) = (u8::try_from(p.x), u8::try_from(p.y)) {
                if x < WIDTH && y < HEIGHT {
                    self.put(x, y, color.is_on());
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buf = [if color.is_on() { 0xFF } else { 0x00 }; BUFFER_LEN];
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
