//! Glyph tables for the string renderer.
//!
//! Each [`Font`] size names a fixed cell `size / 2` pixels wide and `size`
//! pixels tall. Glyph bitmaps come from the `embedded-graphics` ASCII mono
//! fonts; a face smaller than its cell is centred in it. Rendering a glyph
//! yields a [`GlyphCell`] holding one bit per pixel of the cell, so the
//! caller can paint both the set and the clear pixels.

use core::convert::Infallible;

use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X12, FONT_8X13},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};

/// Glyph height in pixels. Glyph width is half the height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Font {
    Size12 = 12,
    Size16 = 16,
    Size24 = 24,
}

impl Font {
    /// Cell height in pixels.
    pub fn height(self) -> u8 {
        self as u8
    }

    /// Cell width in pixels; also the horizontal advance per character.
    pub fn width(self) -> u8 {
        self as u8 / 2
    }

    fn face(self) -> &'static MonoFont<'static> {
        match self {
            Font::Size12 => &FONT_6X12,
            Font::Size16 => &FONT_8X13,
            Font::Size24 => &FONT_10X20,
        }
    }

    /// Rasterize `c` into a fresh cell.
    ///
    /// Characters outside the printable ASCII range render as the face's
    /// replacement glyph.
    pub fn glyph(self, c: char) -> GlyphCell {
        let mut cell = GlyphCell::new(self);
        let face = self.face();
        let dx = (self.width() as i32 - face.character_size.width as i32) / 2;
        let dy = (self.height() as i32 - face.character_size.height as i32) / 2;

        let mut utf8 = [0u8; 4];
        let text = c.encode_utf8(&mut utf8);
        let style = MonoTextStyle::new(face, BinaryColor::On);
        // Drawing into a GlyphCell cannot fail.
        let _ = Text::with_baseline(text, Point::new(dx, dy), style, Baseline::Top).draw(&mut cell);
        cell
    }
}

/// One rendered glyph, column-major, bit `y` of `columns[x]` set where
/// the glyph is lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphCell {
    font: Font,
    columns: [u32; 12],
}

impl GlyphCell {
    fn new(font: Font) -> Self {
        Self {
            font,
            columns: [0; 12],
        }
    }

    pub fn width(&self) -> u8 {
        self.font.width()
    }

    pub fn height(&self) -> u8 {
        self.font.height()
    }

    /// `true` if the glyph lights `(x, y)` within the cell.
    pub fn is_set(&self, x: u8, y: u8) -> bool {
        x < self.width() && y < self.height() && self.columns[x as usize] & (1 << y) != 0
    }
}

impl OriginDimensions for GlyphCell {
    fn size(&self) -> Size {
        Size::new(self.width() as u32, self.height() as u32)
    }
}

impl DrawTarget for GlyphCell {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (w, h) = (self.width() as i32, self.height() as i32);
        for Pixel(p, color) in pixels {
            if p.x < 0 || p.y < 0 || p.x >= w || p.y >= h {
                continue;
            }
            let bit = 1u32 << p.y;
            match color {
                BinaryColor::On => self.columns[p.x as usize] |= bit,
                BinaryColor::Off => self.columns[p.x as usize] &= !bit,
            }
        }
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
