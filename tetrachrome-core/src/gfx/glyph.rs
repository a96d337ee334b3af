//! Run-length alpha glyphs
//!
//! # Format
//!
//! ```text
//! [width: u16 LE] [height: u16 LE] [token]* [terminator]
//! ```
//!
//! Each token byte selects a mode with its top two bits:
//!
//! | Bits | Meaning                                     |
//! |------|---------------------------------------------|
//! | `00` | one pixel, low six bits are its alpha       |
//! | `01` | transparent run, low six bits are the length |
//! | `10` | opaque run, low six bits are the length     |
//! | `11` | end of glyph                                |
//!
//! Pixels fill the glyph's rectangle row by row.

use embedded_graphics_core::pixelcolor::Rgb565;

use super::compose::{multiply_pixel, FULL};
use super::{Canvas, Region};
use crate::traits::{DisplayBus, DisplayError};

const MODE_MASK: u8 = 0xC0;
const LENGTH_MASK: u8 = 0x3F;

const MODE_PIXEL: u8 = 0x00;
const MODE_CLEAR: u8 = 0x40;
const MODE_SOLID: u8 = 0x80;

/// Lower-case "a", 8x8
pub const LETTER_A: Glyph<'static> = Glyph::new(&[
    0x08, 0x00, 0x08, 0x00, //
    0x00, 0x0E, 0x33, 0x3F, 0x3E, 0x2E, 0x06, 0x42, 0x36, 0x25, 0x02, 0x05, 0x30, 0x2B, 0x46, 0x20,
    0x38, 0x42, 0x16, 0x33, 0x3D, 0x3F, 0x3C, 0x38, 0x00, 0x0B, 0x3F, 0x1C, 0x01, 0x00, 0x20, 0x38,
    0x00, 0x18, 0x3F, 0x43, 0x2A, 0x38, 0x00, 0x11, 0x3F, 0x10, 0x01, 0x1A, 0x34, 0x3B, 0x01, 0x00,
    0x26, 0x3E, 0x3D, 0x24, 0x0A, 0x3A, 0x38, 0xFF,
]);

/// A run of identical coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub alpha: u8,
    pub length: u8,
}

/// Encoded glyph borrowed from flash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph<'a> {
    data: &'a [u8],
}

impl<'a> Glyph<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    fn header(&self, offset: usize) -> u16 {
        match self.data.get(offset..offset + 2) {
            Some(&[lo, hi]) => u16::from_le_bytes([lo, hi]),
            _ => 0,
        }
    }

    pub fn width(&self) -> u16 {
        self.header(0)
    }

    pub fn height(&self) -> u16 {
        self.header(2)
    }

    /// Decode the token stream
    ///
    /// Stops at the terminator or at the end of the data, whichever
    /// comes first.
    pub fn spans(&self) -> Spans<'a> {
        Spans {
            tokens: self.data.get(4..).unwrap_or(&[]).iter(),
        }
    }
}

/// Iterator over the spans of a [`Glyph`]
pub struct Spans<'a> {
    tokens: core::slice::Iter<'a, u8>,
}

impl<'a> Iterator for Spans<'a> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        let &token = self.tokens.next()?;
        let length = token & LENGTH_MASK;
        match token & MODE_MASK {
            MODE_PIXEL => Some(Span {
                alpha: token,
                length: 1,
            }),
            MODE_CLEAR => Some(Span { alpha: 0, length }),
            MODE_SOLID => Some(Span {
                alpha: FULL,
                length,
            }),
            _ => {
                // Terminator: fuse
                let empty: &'a [u8] = &[];
                self.tokens = empty.iter();
                None
            }
        }
    }
}

impl<B: DisplayBus> Canvas<B> {
    /// Draw `glyph` with its top-left corner at (`x`, `y`) in `paint`
    ///
    /// Coverage darkens `paint` towards black, so glyphs are meant for a
    /// black background. A zero-length run streams nothing.
    pub fn render_glyph(
        &mut self,
        x: u16,
        y: u16,
        glyph: &Glyph<'_>,
        paint: Rgb565,
    ) -> Result<(), DisplayError> {
        let (width, height) = (glyph.width(), glyph.height());
        if width == 0 || height == 0 {
            return Ok(());
        }

        let mut stream = self.open(Region::new(
            x,
            y,
            x.wrapping_add(width - 1),
            y.wrapping_add(height - 1),
        ))?;
        for span in glyph.spans() {
            if span.length > 0 {
                stream.fill(multiply_pixel(paint, span.alpha), u32::from(span.length))?;
            }
        }
        stream.close()
    }
}
