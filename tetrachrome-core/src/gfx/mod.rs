//! Dial rendering
//!
//! Everything here draws through a [`Canvas`], which owns the display bus
//! and hands out one [`Stream`] per addressed region. A stream returns the
//! bus to idle when it is closed or dropped, so an early `?` can never
//! leave the controller mid-transaction.

pub mod compose;
pub mod glyph;
pub mod raster;
pub mod trig;

use embedded_graphics_core::pixelcolor::raw::RawU16;
use embedded_graphics_core::pixelcolor::Rgb565;
use embedded_graphics_core::prelude::RawData;

use crate::traits::{DisplayBus, DisplayError};

pub use compose::FULL;
pub use glyph::Glyph;
pub use trig::Vector;

/// Inclusive rectangle in display coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Region {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl Region {
    pub const fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Number of pixels covered
    pub fn area(&self) -> u32 {
        let width = u32::from(self.x1.wrapping_sub(self.x0)) + 1;
        let height = u32::from(self.y1.wrapping_sub(self.y0)) + 1;
        width * height
    }
}

/// Direction of a pixel run or pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// Along a row (x varies)
    Horizontal,
    /// Along a column (y varies)
    Vertical,
}

/// Foreground over background colour pair used for antialiased edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub foreground: Rgb565,
    pub background: Rgb565,
}

impl Pen {
    pub const fn new(foreground: Rgb565, background: Rgb565) -> Self {
        Self {
            foreground,
            background,
        }
    }
}

/// Raw 5/6/5 word for a colour
#[inline]
pub fn word(colour: Rgb565) -> u16 {
    RawU16::from(colour).into_inner()
}

/// Colour from a raw 5/6/5 word
#[inline]
pub fn colour(word: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(word))
}

/// Drawing surface over a display bus
pub struct Canvas<B> {
    bus: B,
}

impl<B: DisplayBus> Canvas<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn into_inner(self) -> B {
        self.bus
    }

    /// Address `region` and start streaming into it
    pub fn open(&mut self, region: Region) -> Result<Stream<'_, B>, DisplayError> {
        let mut stream = Stream {
            bus: &mut self.bus,
            closed: false,
        };
        stream.bus.begin_region(region)?;
        Ok(stream)
    }
}

/// Open region on the display
///
/// Dropping the stream idles the bus. Use [`close`](Stream::close) on the
/// success path to see errors from that final idle.
pub struct Stream<'a, B: DisplayBus> {
    bus: &'a mut B,
    closed: bool,
}

impl<B: DisplayBus> Stream<'_, B> {
    /// Write one pixel
    pub fn write(&mut self, colour: Rgb565) -> Result<(), DisplayError> {
        self.bus.write_data_word(word(colour))
    }

    /// Write `count` copies of one pixel
    pub fn fill(&mut self, colour: Rgb565, count: u32) -> Result<(), DisplayError> {
        let raw = word(colour);
        let mut remaining = count;
        while remaining > 0 {
            let chunk = remaining.min(256);
            // 256 is encoded as 0
            self.bus.repeat_data_word(raw, chunk as u8)?;
            remaining -= chunk;
        }
        Ok(())
    }

    /// Finish the transaction and idle the bus
    pub fn close(mut self) -> Result<(), DisplayError> {
        self.closed = true;
        self.bus.idle()
    }
}

impl<B: DisplayBus> Drop for Stream<'_, B> {
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.bus.idle();
        }
    }
}
