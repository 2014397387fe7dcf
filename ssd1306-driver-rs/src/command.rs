//! The SSD1306 command set.
//!
//! Each [`Command`] variant maps to one controller register write. The
//! [`Command::encode()`] method validates the arguments against their
//! register field widths and produces the command-mode byte payload; it
//! never touches a bus.

use crate::error::Param;

/// Longest command payload (horizontal scroll setup).
pub const MAX_COMMAND_LEN: usize = 7;

// ── Opcodes ──────────────────────────────────────────────────────────────

pub const SET_LOW_COLUMN_START: u8 = 0x00;
pub const SET_HIGH_COLUMN_START: u8 = 0x10;
pub const SET_MEMORY_ADDRESSING_MODE: u8 = 0x20;
pub const SET_COLUMN_ADDRESS: u8 = 0x21;
pub const SET_PAGE_ADDRESS_RANGE: u8 = 0x22;
pub const SET_FADE_OUT_AND_BLINKING: u8 = 0x23;
pub const RIGHT_HORIZONTAL_SCROLL: u8 = 0x26;
pub const LEFT_HORIZONTAL_SCROLL: u8 = 0x27;
pub const VERTICAL_RIGHT_HORIZONTAL_SCROLL: u8 = 0x29;
pub const VERTICAL_LEFT_HORIZONTAL_SCROLL: u8 = 0x2A;
pub const DEACTIVATE_SCROLL: u8 = 0x2E;
pub const ACTIVATE_SCROLL: u8 = 0x2F;
pub const SET_DISPLAY_START_LINE: u8 = 0x40;
pub const SET_CONTRAST_CONTROL: u8 = 0x81;
pub const SET_CHARGE_PUMP: u8 = 0x8D;
pub const SET_SEGMENT_REMAP: u8 = 0xA0;
pub const SET_VERTICAL_SCROLL_AREA: u8 = 0xA3;
pub const ENTIRE_DISPLAY_OFF: u8 = 0xA4;
pub const ENTIRE_DISPLAY_ON: u8 = 0xA5;
pub const SET_NORMAL_DISPLAY: u8 = 0xA6;
pub const SET_INVERSE_DISPLAY: u8 = 0xA7;
pub const SET_MULTIPLEX_RATIO: u8 = 0xA8;
pub const DISPLAY_OFF: u8 = 0xAE;
pub const DISPLAY_ON: u8 = 0xAF;
pub const SET_PAGE_START_ADDRESS: u8 = 0xB0;
pub const SET_COM_SCAN_DIRECTION: u8 = 0xC0;
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
pub const SET_DISPLAY_CLOCK: u8 = 0xD5;
pub const SET_ZOOM_IN: u8 = 0xD6;
pub const SET_PRECHARGE_PERIOD: u8 = 0xD9;
pub const SET_COM_PINS_HARDWARE: u8 = 0xDA;
pub const SET_VCOMH_DESELECT_LEVEL: u8 = 0xDB;
pub const NOP: u8 = 0xE3;

// ── Field limits ─────────────────────────────────────────────────────────

const NIBBLE_MAX: u8 = 0x0F;
const COLUMN_MAX: u8 = 0x7F;
const PAGE_MAX: u8 = 0x07;
const ROW_MAX: u8 = 0x3F;
const MULTIPLEX_MIN: u8 = 0x0F;

// ── Register values ──────────────────────────────────────────────────────

/// GDDRAM addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AddressingMode {
    /// Column pointer wraps into the next page.
    Horizontal = 0x00,
    /// Page pointer wraps into the next column.
    Vertical = 0x01,
    /// Column pointer wraps within the current page.
    Page = 0x02,
}

/// Fade-out / blinking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FadeBlink {
    Disable = 0x00,
    FadeOut = 0x02,
    Blinking = 0x03,
}

/// Time interval between scroll steps, in frames.
///
/// The controller encodes the intervals out of order, so the
/// discriminants are the register values, not the frame counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ScrollFrames {
    Frames2 = 0x07,
    Frames3 = 0x04,
    Frames4 = 0x05,
    Frames5 = 0x00,
    Frames25 = 0x06,
    Frames64 = 0x01,
    Frames128 = 0x02,
    Frames256 = 0x03,
}

/// Which column address is mapped to SEG0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SegmentRemap {
    Column0 = 0x00,
    Column127 = 0x01,
}

/// Normal or inverted pixel polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DisplayMode {
    Normal = 0x00,
    Inverse = 0x01,
}

/// COM output scan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ScanDirection {
    /// Scan from COM0 to COM[N-1].
    Com0Start = 0x00,
    /// Scan from COM[N-1] to COM0.
    ComNStart = 0x08,
}

/// COM pins hardware configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ComPinsConf {
    Sequential = 0x00,
    Alternative = 0x01,
}

/// COM left/right remap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ComLeftRightRemap {
    Disable = 0x00,
    Enable = 0x01,
}

/// V<sub>COMH</sub> deselect level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DeselectLevel {
    /// ~0.65 × V<sub>CC</sub>
    Vcc0_65 = 0x00,
    /// ~0.77 × V<sub>CC</sub>
    Vcc0_77 = 0x02,
    /// ~0.83 × V<sub>CC</sub>
    Vcc0_83 = 0x03,
}

// ── Command ──────────────────────────────────────────────────────────────

/// One controller register write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Lower nibble of the page-mode column start address. Range 0-15.
    LowColumnStartAddress(u8),
    /// Upper nibble of the page-mode column start address. Range 0-15.
    HighColumnStartAddress(u8),
    MemoryAddressingMode(AddressingMode),
    /// Column start and end for horizontal/vertical addressing. Range 0-127.
    ColumnAddressRange(u8, u8),
    /// Page start and end for horizontal/vertical addressing. Range 0-7.
    PageAddressRange(u8, u8),
    /// Mode and frame interval (0-15, in units of 8 frames).
    FadeBlinking(FadeBlink, u8),
    /// Start page, end page, interval.
    RightHorizontalScroll(u8, u8, ScrollFrames),
    LeftHorizontalScroll(u8, u8, ScrollFrames),
    /// Start page, end page, vertical offset rows (0-63), interval.
    VerticalRightHorizontalScroll(u8, u8, u8, ScrollFrames),
    VerticalLeftHorizontalScroll(u8, u8, u8, ScrollFrames),
    DeactivateScroll,
    ActivateScroll,
    /// RAM row mapped to the first display line. Range 0-63.
    DisplayStartLine(u8),
    Contrast(u8),
    ChargePump(bool),
    SegmentRemap(SegmentRemap),
    /// Rows in the top fixed area (0-63) and rows in the scroll area
    /// (0-127, no more than the fixed area).
    VerticalScrollArea(u8, u8),
    /// `true` lights every pixel regardless of RAM content.
    EntireDisplay(bool),
    DisplayMode(DisplayMode),
    /// Mux ratio minus one. Range 15-63.
    MultiplexRatio(u8),
    Display(bool),
    /// Page start for page addressing. Range 0-7.
    PageAddress(u8),
    ScanDirection(ScanDirection),
    /// Vertical COM shift. Range 0-63.
    DisplayOffset(u8),
    /// Oscillator frequency (0-15) and clock divide ratio minus one (0-15).
    DisplayClock(u8, u8),
    ZoomIn(bool),
    /// Phase 1 and phase 2 periods in DCLKs. Each range 0-15.
    PrechargePeriod(u8, u8),
    ComPinsHardwareConf(ComPinsConf, ComLeftRightRemap),
    DeselectLevel(DeselectLevel),
    Nop,
}

/// An encoded command payload of 1 to [`MAX_COMMAND_LEN`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoded {
    buf: [u8; MAX_COMMAND_LEN],
    len: usize,
}

impl Encoded {
    fn new(bytes: &[u8]) -> Self {
        let mut buf = [0u8; MAX_COMMAND_LEN];
        buf[..bytes.len()].copy_from_slice(bytes);
        Self {
            buf,
            len: bytes.len(),
        }
    }

    /// The payload bytes in transmission order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

fn check(value: u8, max: u8, param: Param) -> Result<u8, Param> {
    if value > max {
        Err(param)
    } else {
        Ok(value)
    }
}

impl Command {
    /// Validate the arguments and build the command-mode payload.
    ///
    /// Arguments are checked in declaration order, so the returned
    /// [`Param`] names the first out-of-range argument.
    pub fn encode(self) -> Result<Encoded, Param> {
        let encoded = match self {
            Command::LowColumnStartAddress(addr) => {
                let addr = check(addr, NIBBLE_MAX, Param::Address)?;
                Encoded::new(&[SET_LOW_COLUMN_START | addr])
            }
            Command::HighColumnStartAddress(addr) => {
                let addr = check(addr, NIBBLE_MAX, Param::Address)?;
                Encoded::new(&[SET_HIGH_COLUMN_START | addr])
            }
            Command::MemoryAddressingMode(mode) => {
                Encoded::new(&[SET_MEMORY_ADDRESSING_MODE, mode as u8])
            }
            Command::ColumnAddressRange(start, end) => {
                let start = check(start, COLUMN_MAX, Param::StartAddress)?;
                let end = check(end, COLUMN_MAX, Param::EndAddress)?;
                Encoded::new(&[SET_COLUMN_ADDRESS, start, end])
            }
            Command::PageAddressRange(start, end) => {
                let start = check(start, PAGE_MAX, Param::StartAddress)?;
                let end = check(end, PAGE_MAX, Param::EndAddress)?;
                Encoded::new(&[SET_PAGE_ADDRESS_RANGE, start, end])
            }
            Command::FadeBlinking(mode, frames) => {
                let frames = check(frames, NIBBLE_MAX, Param::Frames)?;
                Encoded::new(&[SET_FADE_OUT_AND_BLINKING, (mode as u8) << 4 | frames])
            }
            Command::RightHorizontalScroll(start, end, frames) => {
                horizontal_scroll(RIGHT_HORIZONTAL_SCROLL, start, end, frames)?
            }
            Command::LeftHorizontalScroll(start, end, frames) => {
                horizontal_scroll(LEFT_HORIZONTAL_SCROLL, start, end, frames)?
            }
            Command::VerticalRightHorizontalScroll(start, end, rows, frames) => {
                vertical_scroll(VERTICAL_RIGHT_HORIZONTAL_SCROLL, start, end, rows, frames)?
            }
            Command::VerticalLeftHorizontalScroll(start, end, rows, frames) => {
                vertical_scroll(VERTICAL_LEFT_HORIZONTAL_SCROLL, start, end, rows, frames)?
            }
            Command::DeactivateScroll => Encoded::new(&[DEACTIVATE_SCROLL]),
            Command::ActivateScroll => Encoded::new(&[ACTIVATE_SCROLL]),
            Command::DisplayStartLine(line) => {
                let line = check(line, ROW_MAX, Param::Line)?;
                Encoded::new(&[SET_DISPLAY_START_LINE | line])
            }
            Command::Contrast(contrast) => Encoded::new(&[SET_CONTRAST_CONTROL, contrast]),
            Command::ChargePump(enable) => {
                Encoded::new(&[SET_CHARGE_PUMP, 0x10 | (enable as u8) << 2])
            }
            Command::SegmentRemap(remap) => Encoded::new(&[SET_SEGMENT_REMAP | remap as u8]),
            Command::VerticalScrollArea(fixed, scroll) => {
                let fixed = check(fixed, ROW_MAX, Param::StartRow)?;
                let scroll = check(scroll, COLUMN_MAX, Param::EndRow)?;
                if scroll > fixed {
                    return Err(Param::ScrollArea);
                }
                Encoded::new(&[SET_VERTICAL_SCROLL_AREA, fixed, scroll])
            }
            Command::EntireDisplay(on) => Encoded::new(&[if on {
                ENTIRE_DISPLAY_ON
            } else {
                ENTIRE_DISPLAY_OFF
            }]),
            Command::DisplayMode(mode) => Encoded::new(&[match mode {
                DisplayMode::Normal => SET_NORMAL_DISPLAY,
                DisplayMode::Inverse => SET_INVERSE_DISPLAY,
            }]),
            Command::MultiplexRatio(ratio) => {
                if !(MULTIPLEX_MIN..=ROW_MAX).contains(&ratio) {
                    return Err(Param::MultiplexRatio);
                }
                Encoded::new(&[SET_MULTIPLEX_RATIO, ratio])
            }
            Command::Display(on) => Encoded::new(&[if on { DISPLAY_ON } else { DISPLAY_OFF }]),
            Command::PageAddress(page) => {
                let page = check(page, PAGE_MAX, Param::Address)?;
                Encoded::new(&[SET_PAGE_START_ADDRESS | page])
            }
            Command::ScanDirection(dir) => Encoded::new(&[SET_COM_SCAN_DIRECTION | dir as u8]),
            Command::DisplayOffset(offset) => {
                let offset = check(offset, ROW_MAX, Param::Offset)?;
                Encoded::new(&[SET_DISPLAY_OFFSET, offset])
            }
            Command::DisplayClock(osc, divide) => {
                let osc = check(osc, NIBBLE_MAX, Param::OscillatorFrequency)?;
                let divide = check(divide, NIBBLE_MAX, Param::ClockDivide)?;
                Encoded::new(&[SET_DISPLAY_CLOCK, osc << 4 | divide])
            }
            Command::ZoomIn(enable) => Encoded::new(&[SET_ZOOM_IN, enable as u8]),
            Command::PrechargePeriod(phase1, phase2) => {
                let phase1 = check(phase1, NIBBLE_MAX, Param::Phase1Period)?;
                let phase2 = check(phase2, NIBBLE_MAX, Param::Phase2Period)?;
                Encoded::new(&[SET_PRECHARGE_PERIOD, phase2 << 4 | phase1])
            }
            Command::ComPinsHardwareConf(conf, remap) => Encoded::new(&[
                SET_COM_PINS_HARDWARE,
                (conf as u8) << 4 | (remap as u8) << 5 | 0x02,
            ]),
            Command::DeselectLevel(level) => {
                Encoded::new(&[SET_VCOMH_DESELECT_LEVEL, (level as u8) << 4])
            }
            Command::Nop => Encoded::new(&[NOP]),
        };
        Ok(encoded)
    }
}

fn horizontal_scroll(op: u8, start: u8, end: u8, frames: ScrollFrames) -> Result<Encoded, Param> {
    let start = check(start, PAGE_MAX, Param::StartPage)?;
    let end = check(end, PAGE_MAX, Param::EndPage)?;
    // Dummy 0x00 ahead of the pages, 0x00/0xFF trailer.
    Ok(Encoded::new(&[op, 0x00, start, frames as u8, end, 0x00, 0xFF]))
}

fn vertical_scroll(
    op: u8,
    start: u8,
    end: u8,
    rows: u8,
    frames: ScrollFrames,
) -> Result<Encoded, Param> {
    let start = check(start, PAGE_MAX, Param::StartPage)?;
    let end = check(end, PAGE_MAX, Param::EndPage)?;
    let rows = check(rows, ROW_MAX, Param::Rows)?;
    Ok(Encoded::new(&[op, 0x00, start, frames as u8, end, rows]))
}

// ── Tests ────────────────────────────────────────────────────────────────
