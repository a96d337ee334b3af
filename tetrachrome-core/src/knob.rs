//! On-screen dials
//!
//! A knob remembers the angle its pointer was last drawn at (`curstep`)
//! and the angle the operator has asked for (`nextstep`). Turning only
//! moves the target; the pointer catches up in [`Knob::reconcile`], which
//! the cycle calls once per tick.

use embedded_graphics_core::pixelcolor::{Rgb565, RgbColor};

use crate::config::{DialGeometry, DialLayout};
use crate::gfx::trig::unit_vector;
use crate::gfx::{Canvas, Pen};
use crate::input::Direction;
use crate::traits::{DisplayBus, DisplayError};

/// One dial's pointer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Knob {
    pub x: u16,
    pub y: u16,
    curstep: u8,
    nextstep: u8,
}

impl Knob {
    /// Knob at (`x`, `y`) whose pointer is drawn and aimed at `angle`
    pub const fn new(x: u16, y: u16, angle: u8) -> Self {
        Self {
            x,
            y,
            curstep: angle,
            nextstep: angle,
        }
    }

    pub fn from_layout(layout: &DialLayout, angle: u8) -> Self {
        Self::new(layout.x, layout.y, angle)
    }

    /// Angle the pointer is drawn at
    pub fn angle(&self) -> u8 {
        self.curstep
    }

    /// Angle the pointer should move to
    pub fn target(&self) -> u8 {
        self.nextstep
    }

    pub fn is_settled(&self) -> bool {
        self.curstep == self.nextstep
    }

    /// Move the target one step, stopping at either end of the scale
    pub fn advance_target(&mut self, direction: Direction) {
        self.nextstep = match direction {
            Direction::Forward => self.nextstep.saturating_add(1),
            Direction::Backward => self.nextstep.saturating_sub(1),
        };
    }

    /// Draw the pointer at the current angle in `colour`
    pub fn draw_pointer<B: DisplayBus>(
        &self,
        canvas: &mut Canvas<B>,
        geometry: &DialGeometry,
        colour: Rgb565,
    ) -> Result<(), DisplayError> {
        canvas.plot_radial(
            self.x,
            self.y,
            unit_vector(u16::from(self.curstep)),
            geometry.pointer_inner,
            geometry.pointer_outer,
            Pen::new(colour, Rgb565::BLACK),
        )
    }

    /// Bring the pointer to the target
    ///
    /// Erases the old pointer before drawing the new one. Returns whether
    /// anything was drawn.
    pub fn reconcile<B: DisplayBus>(
        &mut self,
        canvas: &mut Canvas<B>,
        geometry: &DialGeometry,
    ) -> Result<bool, DisplayError> {
        if self.is_settled() {
            return Ok(false);
        }

        self.draw_pointer(canvas, geometry, Rgb565::BLACK)?;
        self.curstep = self.nextstep;
        self.draw_pointer(canvas, geometry, Rgb565::WHITE)?;
        Ok(true)
    }

    /// Draw the whole dial: face ring, tick marks and pointer
    pub fn draw_dial<B: DisplayBus>(
        &self,
        canvas: &mut Canvas<B>,
        face: Rgb565,
        geometry: &DialGeometry,
    ) -> Result<(), DisplayError> {
        canvas.plot_hollow_ring(self.x, self.y, geometry.ring_inner, geometry.ring_outer, face)?;

        let pen = Pen::new(Rgb565::WHITE, face);
        let spacing = usize::from(geometry.tick_spacing.max(1));
        for step in (0..=256u16).step_by(spacing) {
            let vector = unit_vector(step);
            if step % geometry.major_tick_spacing.max(1) == 0 {
                canvas.plot_radial(
                    self.x,
                    self.y,
                    vector,
                    geometry.major_tick_inner,
                    geometry.major_tick_outer,
                    pen,
                )?;
            }
            canvas.plot_radial(
                self.x,
                self.y,
                vector,
                geometry.minor_tick_inner,
                geometry.minor_tick_outer,
                pen,
            )?;
        }

        self.draw_pointer(canvas, geometry, Rgb565::WHITE)
    }
}
