//! One setter per controller register.
//!
//! Every setter checks that the handle is initialized, validates its
//! arguments in order, and sends a single command payload. Scroll setup
//! does not stop or restart scrolling on its own; call
//! [`deactivate_scroll()`](Ssd1306::deactivate_scroll) first and
//! [`activate_scroll()`](Ssd1306::activate_scroll) afterwards.

use embedded_hal::delay::DelayNs;

use crate::command::{
    AddressingMode, ComLeftRightRemap, ComPinsConf, Command, DeselectLevel, DisplayMode,
    FadeBlink, ScanDirection, ScrollFrames, SegmentRemap,
};
use crate::driver::Ssd1306;
use crate::error::Error;
use crate::interface::{ControlLine, IicBus, SpiBus};

impl<IIC, SPI, DC, RST, D> Ssd1306<IIC, SPI, DC, RST, D>
where
    IIC: IicBus,
    SPI: SpiBus,
    DC: ControlLine,
    RST: ControlLine,
    D: DelayNs,
{
    // ── Addressing ───────────────────────────────────────────────────

    /// Lower nibble of the page-mode column pointer (0-15).
    pub fn set_low_column_start_address(&mut self, addr: u8) -> Result<(), Error> {
        self.send(Command::LowColumnStartAddress(addr))
    }

    /// Upper nibble of the page-mode column pointer (0-15).
    pub fn set_high_column_start_address(&mut self, addr: u8) -> Result<(), Error> {
        self.send(Command::HighColumnStartAddress(addr))
    }

    pub fn set_memory_addressing_mode(&mut self, mode: AddressingMode) -> Result<(), Error> {
        self.send(Command::MemoryAddressingMode(mode))
    }

    /// Column window for horizontal/vertical addressing (0-127 each).
    pub fn set_column_address_range(&mut self, start: u8, end: u8) -> Result<(), Error> {
        self.send(Command::ColumnAddressRange(start, end))
    }

    /// Page window for horizontal/vertical addressing (0-7 each).
    pub fn set_page_address_range(&mut self, start: u8, end: u8) -> Result<(), Error> {
        self.send(Command::PageAddressRange(start, end))
    }

    /// Page pointer for page addressing (0-7).
    pub fn set_page_address(&mut self, page: u8) -> Result<(), Error> {
        self.send(Command::PageAddress(page))
    }

    // ── Fade / scroll ────────────────────────────────────────────────

    /// `frames` is the step interval in units of 8 frames (0-15).
    pub fn set_fade_blinking_mode(&mut self, mode: FadeBlink, frames: u8) -> Result<(), Error> {
        self.send(Command::FadeBlinking(mode, frames))
    }

    pub fn set_right_horizontal_scroll(
        &mut self,
        start_page: u8,
        end_page: u8,
        frames: ScrollFrames,
    ) -> Result<(), Error> {
        self.send(Command::RightHorizontalScroll(start_page, end_page, frames))
    }

    pub fn set_left_horizontal_scroll(
        &mut self,
        start_page: u8,
        end_page: u8,
        frames: ScrollFrames,
    ) -> Result<(), Error> {
        self.send(Command::LeftHorizontalScroll(start_page, end_page, frames))
    }

    /// `rows` is the vertical offset per scroll step (0-63).
    pub fn set_vertical_right_horizontal_scroll(
        &mut self,
        start_page: u8,
        end_page: u8,
        rows: u8,
        frames: ScrollFrames,
    ) -> Result<(), Error> {
        self.send(Command::VerticalRightHorizontalScroll(
            start_page, end_page, rows, frames,
        ))
    }

    pub fn set_vertical_left_horizontal_scroll(
        &mut self,
        start_page: u8,
        end_page: u8,
        rows: u8,
        frames: ScrollFrames,
    ) -> Result<(), Error> {
        self.send(Command::VerticalLeftHorizontalScroll(
            start_page, end_page, rows, frames,
        ))
    }

    pub fn deactivate_scroll(&mut self) -> Result<(), Error> {
        self.send(Command::DeactivateScroll)
    }

    pub fn activate_scroll(&mut self) -> Result<(), Error> {
        self.send(Command::ActivateScroll)
    }

    /// Rows in the fixed top area (0-63) and rows in the scroll area
    /// (0-127, at most `fixed_rows`).
    pub fn set_vertical_scroll_area(&mut self, fixed_rows: u8, scroll_rows: u8) -> Result<(), Error> {
        self.send(Command::VerticalScrollArea(fixed_rows, scroll_rows))
    }

    // ── Panel ────────────────────────────────────────────────────────

    /// RAM row shown on the first display line (0-63).
    pub fn set_display_start_line(&mut self, line: u8) -> Result<(), Error> {
        self.send(Command::DisplayStartLine(line))
    }

    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error> {
        self.send(Command::Contrast(contrast))
    }

    pub fn set_charge_pump(&mut self, enable: bool) -> Result<(), Error> {
        self.send(Command::ChargePump(enable))
    }

    pub fn set_segment_remap(&mut self, remap: SegmentRemap) -> Result<(), Error> {
        self.send(Command::SegmentRemap(remap))
    }

    /// Light every pixel (`true`) or follow RAM (`false`).
    pub fn set_entire_display(&mut self, on: bool) -> Result<(), Error> {
        self.send(Command::EntireDisplay(on))
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<(), Error> {
        self.send(Command::DisplayMode(mode))
    }

    /// Mux ratio minus one (15-63).
    pub fn set_multiplex_ratio(&mut self, ratio: u8) -> Result<(), Error> {
        self.send(Command::MultiplexRatio(ratio))
    }

    pub fn set_display(&mut self, on: bool) -> Result<(), Error> {
        self.send(Command::Display(on))
    }

    pub fn set_scan_direction(&mut self, dir: ScanDirection) -> Result<(), Error> {
        self.send(Command::ScanDirection(dir))
    }

    /// Vertical COM shift (0-63).
    pub fn set_display_offset(&mut self, offset: u8) -> Result<(), Error> {
        self.send(Command::DisplayOffset(offset))
    }

    pub fn set_zoom_in(&mut self, enable: bool) -> Result<(), Error> {
        self.send(Command::ZoomIn(enable))
    }

    pub fn set_com_pins_hardware_conf(
        &mut self,
        conf: ComPinsConf,
        remap: ComLeftRightRemap,
    ) -> Result<(), Error> {
        self.send(Command::ComPinsHardwareConf(conf, remap))
    }

    // ── Timing / analog ──────────────────────────────────────────────

    /// Oscillator frequency and divide ratio, each 0-15.
    pub fn set_display_clock(&mut self, oscillator: u8, divide: u8) -> Result<(), Error> {
        self.send(Command::DisplayClock(oscillator, divide))
    }

    /// Pre-charge phase periods in DCLKs, each 0-15.
    pub fn set_precharge_period(&mut self, phase1: u8, phase2: u8) -> Result<(), Error> {
        self.send(Command::PrechargePeriod(phase1, phase2))
    }

    pub fn set_deselect_level(&mut self, level: DeselectLevel) -> Result<(), Error> {
        self.send(Command::DeselectLevel(level))
    }

    pub fn nop(&mut self) -> Result<(), Error> {
        self.send(Command::Nop)
    }
}
