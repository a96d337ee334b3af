//! Screen layout and console behaviour

use embedded_graphics_core::pixelcolor::{Rgb565, RgbColor};

use super::radio::RadioConfig;
use crate::gfx::colour;
use crate::wireless::STRIP_COUNT;

/// Dials on screen, one per colour channel
pub const DIAL_COUNT: usize = STRIP_COUNT;

/// Where a dial sits and what colour its face is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialLayout {
    pub x: u16,
    pub y: u16,
    pub face: Rgb565,
}

impl DialLayout {
    pub const fn new(x: u16, y: u16, face: Rgb565) -> Self {
        Self { x, y, face }
    }
}

/// Radii of the parts of every dial, in pixels from its centre
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DialGeometry {
    pub ring_inner: u16,
    pub ring_outer: u16,
    pub pointer_inner: u16,
    pub pointer_outer: u16,
    pub major_tick_inner: u16,
    pub major_tick_outer: u16,
    pub minor_tick_inner: u16,
    pub minor_tick_outer: u16,
    /// Angle steps between minor ticks
    pub tick_spacing: u16,
    /// Angle steps between major ticks
    pub major_tick_spacing: u16,
}

impl Default for DialGeometry {
    fn default() -> Self {
        Self {
            // 46 +/- 8
            ring_inner: 38,
            ring_outer: 54,
            pointer_inner: 5,
            pointer_outer: 35,
            major_tick_inner: 39,
            major_tick_outer: 53,
            minor_tick_inner: 42,
            minor_tick_outer: 51,
            tick_spacing: 8,
            major_tick_spacing: 16,
        }
    }
}

/// Complete console configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub screen_width: u16,
    pub screen_height: u16,
    /// Red, green, blue and warm white, top to bottom
    pub dials: [DialLayout; DIAL_COUNT],
    pub geometry: DialGeometry,
    /// Top-left corner of the sample glyph
    pub glyph_origin: (u16, u16),
    pub glyph_paint: Rgb565,
    pub radio: RadioConfig,
    /// How long the button must read released before it can select again
    pub release_debounce_ms: u64,
    /// Pointer angle and channel level at power-up
    pub initial_angle: u8,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            screen_width: 320,
            screen_height: 480,
            dials: [
                DialLayout::new(260, 60, colour(0xFA20)),
                DialLayout::new(260, 180, colour(0x8400)),
                DialLayout::new(260, 300, colour(0x49F1)),
                DialLayout::new(260, 420, colour(0xCDCA)),
            ],
            geometry: DialGeometry::default(),
            glyph_origin: (10, 10),
            glyph_paint: Rgb565::YELLOW,
            radio: RadioConfig::default(),
            release_debounce_ms: 32,
            initial_angle: 128,
        }
    }
}
