//! Drawing through the driver: strings, rectangles, pictures and
//! `embedded-graphics` primitives.

mod common;

use common::{iic_driver, ready_iic};
use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
};
use ssd1306_driver_rs::{Error, Font, Framebuffer, Param};

#[test]
fn string_wraps_when_glyph_would_cross_right_edge() {
    let (_bench, mut oled) = iic_driver();

    oled.draw_string(124, 0, "AB", true, Font::Size16).unwrap();

    let mut expect = Framebuffer::new();
    expect.draw_glyph(0, 16, 'A', Font::Size16, true);
    expect.draw_glyph(8, 16, 'B', Font::Size16, true);
    assert_eq!(oled.framebuffer(), &expect);
    // Nothing was drawn on the first line.
    for x in 0..128 {
        for y in 0..16 {
            assert!(!oled.gram_read_point(x, y).unwrap());
        }
    }
}

#[test]
fn string_fills_a_line_then_continues_below() {
    let (_bench, mut oled) = iic_driver();
    // 21 six-pixel cells fit in 128 columns; the 22nd wraps.
    let text = "ABCDEFGHIJKLMNOPQRSTUV";

    oled.draw_string(0, 0, text, true, Font::Size12).unwrap();

    let mut expect = Framebuffer::new();
    for (i, c) in text.chars().take(21).enumerate() {
        expect.draw_glyph(i as u8 * 6, 0, c, Font::Size12, true);
    }
    expect.draw_glyph(0, 12, 'V', Font::Size12, true);
    assert_eq!(oled.framebuffer(), &expect);
}

#[test]
fn string_rejects_off_panel_start() {
    let (_bench, mut oled) = iic_driver();

    assert!(matches!(
        oled.draw_string(0, 64, "A", true, Font::Size24),
        Err(Error::InvalidParameter(Param::Y))
    ));
}

#[test]
fn rect_and_picture_errors_leave_framebuffer_untouched() {
    let (_bench, mut oled) = iic_driver();

    assert!(matches!(
        oled.fill_rect(0, 0, 128, 10, true),
        Err(Error::InvalidParameter(Param::Right))
    ));
    assert!(matches!(
        oled.fill_rect(20, 0, 10, 10, true),
        Err(Error::InvalidParameter(Param::Bounds))
    ));
    assert!(matches!(
        oled.draw_picture(0, 0, 3, 3, &[1; 15]),
        Err(Error::InvalidParameter(Param::Image))
    ));
    assert_eq!(oled.framebuffer(), &Framebuffer::new());
}

#[test]
fn picture_then_flush_sends_packed_bytes() {
    let (bench, mut oled) = ready_iic();
    // One column, eight rows, alternating.
    oled.draw_picture(2, 0, 2, 7, &[1, 0, 1, 0, 1, 0, 1, 0]).unwrap();

    oled.flush().unwrap();

    let writes = bench.writes();
    assert_eq!(writes[3].1[2], 0b0101_0101);
}

#[test]
fn embedded_graphics_draws_into_framebuffer() {
    let (_bench, mut oled) = iic_driver();

    Line::new(Point::new(0, 63), Point::new(127, 63))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(oled.framebuffer_mut())
        .unwrap();

    for x in 0..128 {
        assert!(oled.gram_read_point(x, 63).unwrap());
        assert!(!oled.gram_read_point(x, 62).unwrap());
    }
}
