//! Antialiased dial primitives
//!
//! Coordinates are computed in `i32` and truncated to `u16` when a region
//! is addressed, the same wrapping the controller applies to its 16-bit
//! address registers. Every primitive opens its own region and idles the
//! bus before returning.

use embedded_graphics_core::pixelcolor::Rgb565;

use super::compose::{blend_pixel, multiply_pixel, FULL};
use super::Orientation::{self, Horizontal, Vertical};
use super::{Canvas, Pen, Region, Vector};
use crate::traits::{DisplayBus, DisplayError};

/// Coverage at the start, middle and end of a pixel run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunAlpha {
    pub start: u8,
    pub middle: u8,
    pub end: u8,
}

impl RunAlpha {
    pub const fn new(start: u8, middle: u8, end: u8) -> Self {
        Self { start, middle, end }
    }
}

/// One side of a hollow ring: a midpoint-circle error tracker
struct Edge {
    x: i32,
    dx: i32,
    error: i32,
}

impl Edge {
    fn new(radius: u16) -> Self {
        let x = i32::from(radius);
        Self {
            x,
            dx: 1 - 2 * x,
            error: 0,
        }
    }

    /// Fraction of the boundary pixel inside the circle, 0..=63
    fn coverage(&self) -> u8 {
        let coverage = (i32::from(FULL) * (2 * self.error + self.dx)) / (2 * self.dx);
        coverage.clamp(0, i32::from(FULL)) as u8
    }

    fn advance(&mut self, dy: i32) {
        self.error += dy;
        if 2 * self.error + self.dx > 0 {
            self.x -= 1;
            self.error += self.dx;
            self.dx += 2;
        }
    }
}

#[inline]
fn coord(value: i32) -> u16 {
    value as u16
}

impl<B: DisplayBus> Canvas<B> {
    /// Fill a `width` x `height` rectangle with one colour
    pub fn fill_region(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        colour: Rgb565,
    ) -> Result<(), DisplayError> {
        if width == 0 || height == 0 {
            return Ok(());
        }

        let region = Region::new(x, y, x.wrapping_add(width - 1), y.wrapping_add(height - 1));
        let mut stream = self.open(region)?;
        stream.fill(colour, region.area())?;
        stream.close()
    }

    /// Two adjacent pixels blended with complementary coverage
    ///
    /// The first pixel gets `alpha` of the pen's foreground and the second
    /// gets the rest, so a line edge spread across them keeps its weight.
    pub fn paint_pair(
        &mut self,
        orientation: Orientation,
        x: u16,
        y: u16,
        alpha: u8,
        pen: Pen,
    ) -> Result<(), DisplayError> {
        let alpha = alpha.min(FULL);
        let region = match orientation {
            Horizontal => Region::new(x, y, x.wrapping_add(1), y),
            Vertical => Region::new(x, y, x, y.wrapping_add(1)),
        };

        let mut stream = self.open(region)?;
        stream.write(blend_pixel(pen.foreground, pen.background, alpha))?;
        stream.write(blend_pixel(pen.foreground, pen.background, FULL - alpha))?;
        stream.close()
    }

    /// Run of pixels along one row or column, darkened from `paint`
    ///
    /// `major` is the row (horizontal) or column (vertical). Pixels from
    /// `first` to `last` inclusive get `alpha.start`, then `alpha.middle`,
    /// and the last one `alpha.end`.
    pub fn pixel_run(
        &mut self,
        orientation: Orientation,
        major: u16,
        first: u16,
        last: u16,
        paint: Rgb565,
        alpha: RunAlpha,
    ) -> Result<(), DisplayError> {
        let region = match orientation {
            Horizontal => Region::new(first, major, last, major),
            Vertical => Region::new(major, first, major, last),
        };

        let start = multiply_pixel(paint, alpha.start);
        let mut stream = self.open(region)?;
        stream.write(start)?;

        if last > first {
            let middle = u32::from(last - first - 1);
            if middle > 0 {
                stream.fill(multiply_pixel(paint, alpha.middle), middle)?;
            }
            let end = if alpha.end == alpha.start {
                start
            } else {
                multiply_pixel(paint, alpha.end)
            };
            stream.write(end)?;
        }

        stream.close()
    }

    /// Antialiased segment of the line from (`x0`, `y0`) along `vector`
    ///
    /// Only the steps with `min_extent < step <= max_extent` along the
    /// dominant axis are painted, so the same direction can draw pointers
    /// and ticks at different distances from the dial centre.
    pub fn plot_partial_line(
        &mut self,
        x0: u16,
        y0: u16,
        vector: Vector,
        min_extent: i32,
        max_extent: i32,
        pen: Pen,
    ) -> Result<(), DisplayError> {
        let (x0, y0) = (i32::from(x0), i32::from(y0));
        let (sx, dx) = if vector.dx < 0 {
            (-1, -i32::from(vector.dx))
        } else {
            (1, i32::from(vector.dx))
        };
        let (sy, dy) = if vector.dy < 0 {
            (-1, -i32::from(vector.dy))
        } else {
            (1, i32::from(vector.dy))
        };

        let swapped = dx < dy;
        let (major, minor) = if swapped { (dy, dx) } else { (dx, dy) };
        if major == 0 {
            return Ok(());
        }

        let mut remainder = 0;
        let mut along = 0;
        let mut across = 0;

        while along <= major && along <= max_extent {
            if along > min_extent {
                let (xp, yp) = if swapped {
                    (across, along)
                } else {
                    (along, across)
                };
                let x = x0 + sx * xp;
                let y = y0 + sy * yp;
                let alpha = (i32::from(FULL) * remainder / major) as u8;

                let (orientation, px, py, weight) = match (swapped, sx < 0, sy < 0) {
                    (false, _, true) => (Vertical, x, y - 1, alpha),
                    (false, _, false) => (Vertical, x, y, FULL - alpha),
                    (true, true, _) => (Horizontal, x - 1, y, alpha),
                    (true, false, _) => (Horizontal, x, y, FULL - alpha),
                };
                self.paint_pair(orientation, coord(px), coord(py), weight, pen)?;
            }

            remainder += minor;
            if remainder >= major {
                across += 1;
                remainder -= major;
            }
            along += 1;
        }

        Ok(())
    }

    /// Radial segment from `inner` to `outer` pixels out along `vector`
    pub fn plot_radial(
        &mut self,
        cx: u16,
        cy: u16,
        vector: Vector,
        inner: u16,
        outer: u16,
        pen: Pen,
    ) -> Result<(), DisplayError> {
        self.plot_partial_line(
            cx,
            cy,
            vector,
            vector.dominant_extent(inner),
            vector.dominant_extent(outer),
            pen,
        )
    }

    /// Antialiased annulus between radii `inner` and `outer`, in `paint`
    ///
    /// Inner and outer midpoint-circle trackers advance together one row
    /// at a time. Each row paints the four spans of the octant pair it
    /// covers, and their mirror images when the row is off the centre line.
    pub fn plot_hollow_ring(
        &mut self,
        cx: u16,
        cy: u16,
        inner: u16,
        outer: u16,
        paint: Rgb565,
    ) -> Result<(), DisplayError> {
        let (cx, cy) = (i32::from(cx), i32::from(cy));
        let mut inside = Edge::new(inner);
        let mut outside = Edge::new(outer);
        let mut y = 0;
        let mut dy = 1;

        while outside.x >= y {
            let (inner_alpha, x1) = if inside.x >= y {
                (FULL - inside.coverage(), inside.x)
            } else {
                (FULL, y)
            };
            let outer_alpha = outside.coverage();
            let x2 = outside.x;

            let rising = RunAlpha::new(inner_alpha, FULL, outer_alpha);
            let falling = RunAlpha::new(outer_alpha, FULL, inner_alpha);

            // The centre row and column have no mirror image
            let mirrors = if y > 0 { 2 } else { 1 };
            for offset in [y, -y].into_iter().take(mirrors) {
                let row = coord(cy + offset);
                let column = coord(cx + offset);
                let (right, left) = ((cx + x1, cx + x2), (cx - x2, cx - x1));
                let (below, above) = ((cy + x1, cy + x2), (cy - x2, cy - x1));

                self.pixel_run(Horizontal, row, coord(right.0), coord(right.1), paint, rising)?;
                self.pixel_run(Horizontal, row, coord(left.0), coord(left.1), paint, falling)?;
                self.pixel_run(Vertical, column, coord(below.0), coord(below.1), paint, rising)?;
                self.pixel_run(Vertical, column, coord(above.0), coord(above.1), paint, falling)?;
            }

            inside.advance(dy);
            outside.advance(dy);
            y += 1;
            dy += 2;
        }

        Ok(())
    }
}
