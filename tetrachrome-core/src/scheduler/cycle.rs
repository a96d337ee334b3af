//! The console and its tick

use embedded_graphics_core::pixelcolor::{Rgb565, RgbColor};

use crate::config::{ConsoleConfig, DIAL_COUNT};
use crate::gfx::glyph::LETTER_A;
use crate::gfx::Canvas;
use crate::input::{InputEvent, InputQueue};
use crate::knob::Knob;
use crate::traits::{DisplayBus, DisplayError, Radio, RadioError};
use crate::wireless::{DispatchEvent, Dispatcher, CHANNEL_COUNT};

/// Errors surfaced by the console cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError {
    Display(DisplayError),
    Radio(RadioError),
}

impl From<DisplayError> for ConsoleError {
    fn from(e: DisplayError) -> Self {
        ConsoleError::Display(e)
    }
}

impl From<RadioError> for ConsoleError {
    fn from(e: RadioError) -> Self {
        ConsoleError::Radio(e)
    }
}

/// A tick that hit an adapter error, with what it managed before that
///
/// `report.dispatch` holds any transmission outcome reached before the
/// failure, so a delivered or dropped strip is never lost to a redraw
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickError {
    pub error: ConsoleError,
    pub report: TickReport,
}

/// What one tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Input events applied before the tick
    pub events: usize,
    pub dispatch: Option<DispatchEvent>,
    /// Dials whose pointer was redrawn
    pub redrawn: [bool; DIAL_COUNT],
}

impl TickReport {
    pub fn is_quiet(&self) -> bool {
        self.events == 0 && self.dispatch.is_none() && !self.redrawn.iter().any(|&r| r)
    }
}

/// Display, radio and all console state
pub struct Console<B, R> {
    canvas: Canvas<B>,
    radio: R,
    knobs: [Knob; DIAL_COUNT],
    dispatcher: Dispatcher,
    selected: u8,
    config: ConsoleConfig,
}

impl<B: DisplayBus, R: Radio> Console<B, R> {
    pub fn new(bus: B, radio: R, config: ConsoleConfig) -> Self {
        let knobs = config
            .dials
            .map(|dial| Knob::from_layout(&dial, config.initial_angle));
        Self {
            canvas: Canvas::new(bus),
            radio,
            knobs,
            dispatcher: Dispatcher::new(config.radio.address_suffix),
            selected: (DIAL_COUNT - 1) as u8,
            config,
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn knobs(&self) -> &[Knob; DIAL_COUNT] {
        &self.knobs
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Knob the encoder currently turns
    pub fn selected(&self) -> u8 {
        self.selected
    }

    pub fn canvas(&self) -> &Canvas<B> {
        &self.canvas
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    /// Give back the display bus and the radio
    pub fn release(self) -> (B, R) {
        (self.canvas.into_inner(), self.radio)
    }

    /// Draw the start-up screen and queue the initial mix for every strip
    pub fn start(&mut self) -> Result<(), ConsoleError> {
        let config = &self.config;
        self.canvas.fill_region(
            0,
            0,
            config.screen_width,
            config.screen_height,
            Rgb565::BLACK,
        )?;

        let (x, y) = config.glyph_origin;
        self.canvas.render_glyph(x, y, &LETTER_A, config.glyph_paint)?;

        for (knob, dial) in self.knobs.iter().zip(config.dials.iter()) {
            knob.draw_dial(&mut self.canvas, dial.face, &config.geometry)?;
        }

        self.dispatcher
            .set_all([config.initial_angle; CHANNEL_COUNT]);
        Ok(())
    }

    /// Apply one decoded input event
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Turn { knob, direction } => {
                if let Some(knob) = self.knobs.get_mut(usize::from(knob)) {
                    knob.advance_target(direction);
                }
            }
            InputEvent::Select { knob } => self.selected = knob,
        }
    }

    /// One pass of the cycle: pump the radio, then catch up every dial
    ///
    /// A radio error is returned only after the dials have been brought
    /// up to date. A display error stops the redraw; if both fail the
    /// display error wins.
    pub fn tick(&mut self) -> Result<TickReport, TickError> {
        let (dispatch, radio_error) = match self.dispatcher.pump(&mut self.radio) {
            Ok(event) => (event, None),
            Err(e) => (None, Some(e)),
        };
        let mut report = TickReport {
            dispatch,
            ..TickReport::default()
        };

        for (channel, knob) in self.knobs.iter_mut().enumerate() {
            if knob.is_settled() {
                continue;
            }
            self.dispatcher.set_channel(channel, knob.target());
            match knob.reconcile(&mut self.canvas, &self.config.geometry) {
                Ok(drawn) => report.redrawn[channel] = drawn,
                Err(e) => {
                    return Err(TickError {
                        error: e.into(),
                        report,
                    })
                }
            }
        }

        match radio_error {
            Some(e) => Err(TickError {
                error: e.into(),
                report,
            }),
            None => Ok(report),
        }
    }

    /// Drain pending input, then tick. Never blocks.
    pub fn poll<const N: usize>(&mut self, queue: &InputQueue<N>) -> Result<TickReport, TickError> {
        let mut events = 0;
        while let Some(event) = queue.pop() {
            self.handle(event);
            events += 1;
        }

        match self.tick() {
            Ok(report) => Ok(TickReport { events, ..report }),
            Err(TickError { error, report }) => Err(TickError {
                error,
                report: TickReport { events, ..report },
            }),
        }
    }
}
