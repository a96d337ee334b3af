//! Gamma-aware alpha compositing
//!
//! Channels are treated as gamma-encoded 6-bit values. Each one is squared
//! into an approximately linear 12-bit intensity, scaled by a 6-bit alpha,
//! and brought back to 6 bits with an integer square root. Red and blue
//! only have five bits on the wire, so they travel through the maths as
//! even 6-bit values.
//!
//! The round trip is lossy: results are never brighter than the exact
//! answer and at most one step darker per channel.

use embedded_graphics_core::pixelcolor::Rgb565;

use super::{colour, word};

/// Alpha value for a fully opaque foreground
pub const FULL: u8 = 63;

/// Integer square root from 12 bits (0..=4095) to 6 bits (0..=63)
///
/// Builds the root one bit at a time from 0x20 down, keeping a bit when
/// the candidate squared does not exceed `n`.
pub const fn scale_channel_by_sqrt(n: u16) -> u8 {
    let mut root: u8 = 0;
    let mut mask: u8 = 0x20;
    while mask != 0 {
        let candidate = root | mask;
        if (candidate as u16) * (candidate as u16) <= n {
            root = candidate;
        }
        mask >>= 1;
    }
    root
}

/// Scale a gamma-encoded 6-bit channel by a 6-bit alpha
///
/// Returns `(p² / 4) · a`, a 16-bit intensity.
pub const fn multiply_channel(channel: u8, alpha: u8) -> u16 {
    let p = channel as u16;
    ((p * p) / 4) * alpha as u16
}

/// Mix two channels: `fg` weighted by `alpha`, `bg` by the remainder
///
/// Alpha above [`FULL`] counts as opaque.
pub const fn blend_channel(fg: u8, bg: u8, alpha: u8) -> u8 {
    let alpha = if alpha > FULL { FULL } else { alpha };
    let weighted = multiply_channel(fg, alpha) + multiply_channel(bg, FULL - alpha);
    scale_channel_by_sqrt(weighted >> 4)
}

/// Split a 5/6/5 word into even-aligned 6-bit red, green and blue
fn channels(raw: u16) -> [u8; 3] {
    [
        ((raw >> 10) & 0x3E) as u8,
        ((raw >> 5) & 0x3F) as u8,
        ((raw << 1) & 0x3E) as u8,
    ]
}

/// Pack 6-bit channels back into a 5/6/5 word
fn pack([red, green, blue]: [u8; 3]) -> u16 {
    (((red & 0x3E) as u16) << 10) | ((green as u16) << 5) | ((blue as u16) >> 1)
}

/// Darken a pixel by `alpha` (against black)
pub fn multiply_pixel(pixel: Rgb565, alpha: u8) -> Rgb565 {
    if alpha >= FULL {
        return pixel;
    }

    let scaled =
        channels(word(pixel)).map(|c| scale_channel_by_sqrt(multiply_channel(c, alpha) >> 4));
    colour(pack(scaled))
}

/// Composite `fg` over `bg` with coverage `alpha`
///
/// Black is the "no background" marker: blending over it is a plain
/// [`multiply_pixel`].
pub fn blend_pixel(fg: Rgb565, bg: Rgb565, alpha: u8) -> Rgb565 {
    let bg_raw = word(bg);
    if bg_raw == 0 {
        return multiply_pixel(fg, alpha);
    }
    if alpha >= FULL {
        return fg;
    }
    if alpha == 0 {
        return bg;
    }

    let [fr, fg6, fb] = channels(word(fg));
    let [br, bg6, bb] = channels(bg_raw);
    colour(pack([
        blend_channel(fr, br, alpha),
        blend_channel(fg6, bg6, alpha),
        blend_channel(fb, bb, alpha),
    ]))
}
