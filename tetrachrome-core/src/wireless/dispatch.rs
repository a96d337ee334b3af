//! Single-slot transmission queue
//!
//! Each strip carries a pending flag. [`Dispatcher::pump`] either starts a
//! transmission for the lowest-numbered pending strip or, while one is in
//! flight, polls the radio until it is acknowledged or runs out of
//! retries. An update that runs out of retries is dropped, not re-queued.

use crate::traits::{Radio, RadioError};

use super::registers::{reg, status};

/// Strip receivers on the air
pub const STRIP_COUNT: usize = 4;

/// Colour channels per strip (red, green, blue, warm white)
pub const CHANNEL_COUNT: usize = 4;

/// Bytes in every payload, one per channel
pub const PAYLOAD_LEN: usize = CHANNEL_COUNT;

/// One strip's mix and whether it still has to be sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Strip {
    pub colour: [u8; CHANNEL_COUNT],
    pub pending: bool,
}

/// What a [`Dispatcher::pump`] call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchEvent {
    /// A payload for this strip was handed to the radio
    Started { strip: u8 },
    /// The strip acknowledged its payload
    Delivered { strip: u8 },
    /// Retries ran out; the update was discarded
    Dropped { strip: u8 },
}

/// Per-strip colour state plus the single transmission slot
#[derive(Debug, Clone)]
pub struct Dispatcher {
    strips: [Strip; STRIP_COUNT],
    in_flight: Option<u8>,
    /// Shared tail of every strip address; the strip digit goes in front
    suffix: [u8; 4],
}

impl Dispatcher {
    pub const fn new(suffix: [u8; 4]) -> Self {
        Self {
            strips: [Strip {
                colour: [0; CHANNEL_COUNT],
                pending: false,
            }; STRIP_COUNT],
            in_flight: None,
            suffix,
        }
    }

    pub fn strips(&self) -> &[Strip; STRIP_COUNT] {
        &self.strips
    }

    pub fn in_flight(&self) -> Option<u8> {
        self.in_flight
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none()
    }

    /// True while any strip is waiting or a transmission is open
    pub fn has_work(&self) -> bool {
        !self.is_idle() || self.strips.iter().any(|s| s.pending)
    }

    /// Radio address of a strip, e.g. `"15925"` for strip 0
    pub fn address(&self, strip: u8) -> [u8; 5] {
        let [a, b, c, d] = self.suffix;
        [b'1' + strip, a, b, c, d]
    }

    /// Set one channel on every strip and queue them all
    ///
    /// Marking an already pending strip has no further effect.
    pub fn set_channel(&mut self, channel: usize, value: u8) {
        for strip in self.strips.iter_mut() {
            strip.colour[channel] = value;
            strip.pending = true;
        }
    }

    /// Set every channel on every strip and queue them all
    pub fn set_all(&mut self, colour: [u8; CHANNEL_COUNT]) {
        for strip in self.strips.iter_mut() {
            strip.colour = colour;
            strip.pending = true;
        }
    }

    /// Advance the transmission slot by one step
    pub fn pump<R: Radio>(&mut self, radio: &mut R) -> Result<Option<DispatchEvent>, RadioError> {
        match self.in_flight {
            None => self.start_next(radio),
            Some(strip) => self.check_sent(radio, strip),
        }
    }

    fn start_next<R: Radio>(&mut self, radio: &mut R) -> Result<Option<DispatchEvent>, RadioError> {
        let Some(index) = self.strips.iter().position(|s| s.pending) else {
            return Ok(None);
        };
        let strip = index as u8;

        // A failed hand-off leaves the strip pending for the next pump
        let address = self.address(strip);
        radio.write_address(reg::RX_ADDR_P0, &address)?;
        radio.write_address(reg::TX_ADDR, &address)?;
        radio.write_register(reg::RX_PW_P0, PAYLOAD_LEN as u8)?;
        radio.write_tx_payload(&self.strips[index].colour)?;

        self.strips[index].pending = false;
        self.in_flight = Some(strip);
        Ok(Some(DispatchEvent::Started { strip }))
    }

    fn check_sent<R: Radio>(
        &mut self,
        radio: &mut R,
        strip: u8,
    ) -> Result<Option<DispatchEvent>, RadioError> {
        let flags = radio.read_status()?;
        if flags & (status::TX_DS | status::MAX_RT) == 0 {
            return Ok(None);
        }

        let dropped = flags & status::MAX_RT != 0;
        if dropped {
            radio.flush_tx()?;
        }
        radio.write_register(reg::STATUS, status::CLEAR_IRQ)?;
        self.in_flight = None;

        Ok(Some(if dropped {
            DispatchEvent::Dropped { strip }
        } else {
            DispatchEvent::Delivered { strip }
        }))
    }
}
