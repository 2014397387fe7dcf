//! Panel configuration and the power-up register sequence.
//!
//! [`DisplayConfig`] holds one value per register programmed at power-up.
//! All panel settings live here; callers tune them at construction time
//! without touching library source.

use embedded_hal::delay::DelayNs;

use crate::command::{
    AddressingMode, ComLeftRightRemap, ComPinsConf, DeselectLevel, DisplayMode, FadeBlink,
    ScanDirection, SegmentRemap,
};
use crate::driver::Ssd1306;
use crate::error::Error;
use crate::interface::{ControlLine, IicBus, SpiBus};

// ── DisplayConfig ────────────────────────────────────────────────────────

/// Register values applied by [`Ssd1306::configure()`].
///
/// [`DisplayConfig::default()`] matches a standard 128×64 module with the
/// internal charge pump: COM pins alternative, segment 127 on the left,
/// COM scan from the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    // ── Addressing ───────────────────────────────────────────────────
    /// Default: [`AddressingMode::Page`].
    pub addressing_mode: AddressingMode,
    /// Column window `(start, end)`. Default: `(0, 127)`.
    pub column_range: (u8, u8),
    /// Page window `(start, end)`. Default: `(0, 7)`.
    pub page_range: (u8, u8),
    /// Page-mode column pointer, split into nibbles on the wire. Default: 0.
    pub column_start: u8,
    /// Default: 0.
    pub start_line: u8,

    // ── Effects ──────────────────────────────────────────────────────
    /// Default: [`FadeBlink::Disable`].
    pub fade_blink: FadeBlink,
    /// Default: 0.
    pub fade_frames: u8,
    /// Default: `false`.
    pub zoom_in: bool,

    // ── Panel ────────────────────────────────────────────────────────
    /// Default: 0xCF.
    pub contrast: u8,
    /// Default: [`SegmentRemap::Column127`].
    pub segment_remap: SegmentRemap,
    /// Default: [`ScanDirection::ComNStart`].
    pub scan_direction: ScanDirection,
    /// Default: [`DisplayMode::Normal`].
    pub display_mode: DisplayMode,
    /// Default: 0x3F (64 rows).
    pub multiplex_ratio: u8,
    /// Default: 0.
    pub display_offset: u8,
    /// Default: [`ComPinsConf::Alternative`].
    pub com_pins: ComPinsConf,
    /// Default: [`ComLeftRightRemap::Disable`].
    pub com_remap: ComLeftRightRemap,

    // ── Timing / analog ──────────────────────────────────────────────
    /// Default: 8.
    pub oscillator_frequency: u8,
    /// Default: 0.
    pub clock_divide: u8,
    /// Default: 1.
    pub precharge_phase1: u8,
    /// Default: 15.
    pub precharge_phase2: u8,
    /// Default: [`DeselectLevel::Vcc0_77`].
    pub deselect_level: DeselectLevel,
    /// Internal charge pump. Default: `true`.
    pub charge_pump: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            addressing_mode: AddressingMode::Page,
            column_range: (0x00, 0x7F),
            page_range: (0x00, 0x07),
            column_start: 0x00,
            start_line: 0x00,
            fade_blink: FadeBlink::Disable,
            fade_frames: 0,
            zoom_in: false,
            contrast: 0xCF,
            segment_remap: SegmentRemap::Column127,
            scan_direction: ScanDirection::ComNStart,
            display_mode: DisplayMode::Normal,
            multiplex_ratio: 0x3F,
            display_offset: 0x00,
            com_pins: ComPinsConf::Alternative,
            com_remap: ComLeftRightRemap::Disable,
            oscillator_frequency: 0x08,
            clock_divide: 0x00,
            precharge_phase1: 0x01,
            precharge_phase2: 0x0F,
            deselect_level: DeselectLevel::Vcc0_77,
            charge_pump: true,
        }
    }
}

// ── Power-up sequence ────────────────────────────────────────────────────

impl<IIC, SPI, DC, RST, D> Ssd1306<IIC, SPI, DC, RST, D>
where
    IIC: IicBus,
    SPI: SpiBus,
    DC: ControlLine,
    RST: ControlLine,
    D: DelayNs,
{
    /// Program every register from `config`, switch the panel on and
    /// blank it.
    ///
    /// The panel is switched off first and only switched back on once the
    /// analog settings are in place. Stops at the first failing step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before [`init()`](Self::init),
    /// [`Error::InvalidParameter`] for an out-of-range field (nothing after
    /// it is sent), or [`Error::Transport`].
    pub fn configure(&mut self, config: &DisplayConfig) -> Result<(), Error> {
        self.set_display(false)?;

        self.set_column_address_range(config.column_range.0, config.column_range.1)?;
        self.set_page_address_range(config.page_range.0, config.page_range.1)?;
        self.set_low_column_start_address(config.column_start & 0x0F)?;
        self.set_high_column_start_address(config.column_start >> 4)?;
        self.set_display_start_line(config.start_line)?;

        self.set_fade_blinking_mode(config.fade_blink, config.fade_frames)?;
        self.deactivate_scroll()?;
        self.set_zoom_in(config.zoom_in)?;

        self.set_contrast(config.contrast)?;
        self.set_segment_remap(config.segment_remap)?;
        self.set_scan_direction(config.scan_direction)?;
        self.set_display_mode(config.display_mode)?;
        self.set_multiplex_ratio(config.multiplex_ratio)?;
        self.set_display_offset(config.display_offset)?;
        self.set_display_clock(config.oscillator_frequency, config.clock_divide)?;
        self.set_precharge_period(config.precharge_phase1, config.precharge_phase2)?;
        self.set_com_pins_hardware_conf(config.com_pins, config.com_remap)?;
        self.set_deselect_level(config.deselect_level)?;
        self.set_memory_addressing_mode(config.addressing_mode)?;
        self.set_charge_pump(config.charge_pump)?;

        self.set_entire_display(false)?;
        self.set_display(true)?;
        self.clear()?;

        #[cfg(feature = "defmt")]
        defmt::info!("ssd1306: configured");
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
