//! Parallel data port abstractions
//!
//! The display bus latches a full byte on every write strobe. Boards that
//! can drive a whole GPIO bank at once implement [`DataPort`] directly;
//! everything else can use [`PinPort`] over eight individual pins.

use embedded_hal::digital::{OutputPin, PinState};

/// 8-bit parallel output port
pub trait DataPort {
    /// Error type for port writes
    type Error;

    /// Drive all eight data lines to `byte` (bit 0 on D0)
    fn write(&mut self, byte: u8) -> Result<(), Self::Error>;
}

/// Data port built from eight independent output pins
///
/// `pins[0]` carries D0 and `pins[7]` carries D7.
pub struct PinPort<P> {
    pins: [P; 8],
    /// Last byte driven, so unchanged lines are not touched again
    latched: Option<u8>,
}

impl<P: OutputPin> PinPort<P> {
    /// Create a port from pins ordered D0..D7
    pub fn new(pins: [P; 8]) -> Self {
        Self {
            pins,
            latched: None,
        }
    }

    /// Release the pins
    pub fn release(self) -> [P; 8] {
        self.pins
    }
}

impl<P: OutputPin> DataPort for PinPort<P> {
    type Error = P::Error;

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        let changed = match self.latched {
            Some(previous) => previous ^ byte,
            None => 0xFF,
        };

        for (bit, pin) in self.pins.iter_mut().enumerate() {
            let mask = 1u8 << bit;
            if changed & mask != 0 {
                pin.set_state(PinState::from(byte & mask != 0))?;
            }
        }

        self.latched = Some(byte);
        Ok(())
    }
}
