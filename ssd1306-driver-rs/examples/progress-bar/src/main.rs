//! Progress bar example
//!
//! Standalone hardware demonstration of [`Ssd1306`] over IIC. Draws a
//! title line with the built-in string renderer and three horizontal
//! progress bars below it, then cycles the bar values, verifying that the
//! panel resets, configures and refreshes correctly on real hardware.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes           |
//! |-----------|------------|-----------------|
//! | I2C0 SDA  | GP20       |                 |
//! | I2C0 SCL  | GP21       |                 |
//! | OLED RES  | GP22       | active low      |
//! | OLED VCC  | 3V3        |                 |
//! | OLED GND  | GND        |                 |
//!
//! # Layout
//!
//! | Property        | Value                                          |
//! |-----------------|------------------------------------------------|
//! | Title           | font 12 at (0, 0)                              |
//! | Bar rows        | 3 × 16 px starting at y = 16                   |
//! | Bar fill height | 12 px (2 px margin top and bottom per row)     |
//! | Bar frame       | 1 px outline, full width                       |
//! | Value range     | 0–127                                          |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use ssd1306_driver_rs::{Address, DisplayConfig, Font, HalIic, HalPin, Ssd1306};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

const BAR_COUNT: usize = 3;
const BAR_TOP: u8 = 16;
const BAR_ROW: u8 = 16;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Progress bar example starting");

    // --- I2C bus (GP20 = SDA, GP21 = SCL), reset on GP22 ---
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_21, p.PIN_20, i2c::Config::default());
    let rst = Output::new(p.PIN_22, Level::High);

    let mut oled = Ssd1306::new_iic(HalIic::new(i2c), Address::Sa0Low, HalPin::new(rst), Delay);

    if let Err(e) = oled.init() {
        error!("OLED init failed: {}", e);
        return;
    }
    if let Err(e) = oled.configure(&DisplayConfig::default()) {
        error!("OLED configure failed: {}", e);
        return;
    }
    info!("OLED initialised");

    // Bar values 0–127, initialised offset so bars are visually distinct.
    let mut values: [u8; BAR_COUNT] = [0, 42, 84];

    loop {
        oled.framebuffer_mut().clear();
        oled.draw_string(0, 0, "ssd1306 demo", true, Font::Size12).ok();

        for (i, &v) in values.iter().enumerate() {
            let top = BAR_TOP + i as u8 * BAR_ROW;

            Rectangle::new(
                Point::new(0, top as i32),
                Size::new(128, BAR_ROW as u32),
            )
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(oled.framebuffer_mut())
            .ok();

            if v > 0 {
                oled.fill_rect(1, top + 2, v, top + BAR_ROW - 3, true).ok();
            }
        }

        if let Err(e) = oled.flush() {
            error!("Flush failed: {}", e);
        }

        // Advance all bars, wrapping at 127.
        for v in values.iter_mut() {
            *v = (*v + 1) % 128;
        }

        Timer::after(Duration::from_millis(33)).await; // ~30 Hz
    }
}
