//! Quadrature and push-button debounce

use heapless::Vec;

use super::events::{Direction, InputEvent};

/// Knobs the button cycles through
pub const KNOB_COUNT: u8 = 4;

/// Knob selected before the first press; the press wraps it to 0
const INITIAL_KNOB: u8 = KNOB_COUNT - 1;

const PHASE_MASK: u8 = 0x03;
const BUTTON_BIT: u8 = 0x80;

/// Encoder and button levels captured on one pin-change edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSample {
    /// Encoder phase, A in bit 0 and B in bit 1
    pub phase: u8,
    pub pressed: bool,
}

impl InputSample {
    pub fn new(a: bool, b: bool, pressed: bool) -> Self {
        Self {
            phase: u8::from(a) | (u8::from(b) << 1),
            pressed,
        }
    }

    /// From a port byte: phases in bits 0-1, active-low button in bit 7
    pub fn from_port(port: u8) -> Self {
        Self {
            phase: port & PHASE_MASK,
            pressed: port & BUTTON_BIT == 0,
        }
    }
}

/// Progress through one quadrature detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TurnState {
    /// Waiting for both phases low
    Idle,
    /// Both phases seen low; nothing else yet
    SawFirstPhase,
    /// Armed and last saw this intermediate phase (1 or 2)
    SawSecondPhase(u8),
}

/// Outcome of one edge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    /// At most one turn followed by at most one selection
    pub events: Vec<InputEvent, 2>,
    /// The button is down: restart the release timer
    pub arm_release: bool,
}

/// Interrupt-side input state
#[derive(Debug, Clone)]
pub struct EncoderDecoder {
    turn: TurnState,
    selected: u8,
    held: bool,
}

impl EncoderDecoder {
    pub const fn new() -> Self {
        Self {
            turn: TurnState::Idle,
            selected: INITIAL_KNOB,
            held: false,
        }
    }

    pub fn selected(&self) -> u8 {
        self.selected
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn turn_state(&self) -> TurnState {
        self.turn
    }

    /// Feed one pin-change sample
    pub fn on_change(&mut self, sample: InputSample) -> Decoded {
        let mut decoded = Decoded::default();

        if let Some(direction) = self.step(sample.phase) {
            // Capacity 2 holds one turn and one selection
            let _ = decoded.events.push(InputEvent::Turn {
                knob: self.selected,
                direction,
            });
        }

        if sample.pressed {
            // Only the first edge of a press selects
            if !self.held {
                self.selected = (self.selected + 1) % KNOB_COUNT;
                let _ = decoded.events.push(InputEvent::Select {
                    knob: self.selected,
                });
            }
            self.held = true;
            decoded.arm_release = true;
        }

        decoded
    }

    /// The button has read released for the whole debounce window
    pub fn on_release_elapsed(&mut self) {
        self.held = false;
    }

    fn step(&mut self, phase: u8) -> Option<Direction> {
        let turning = match self.turn {
            _ if phase == 0 => {
                self.turn = TurnState::SawFirstPhase;
                return None;
            }
            TurnState::Idle => return None,
            TurnState::SawFirstPhase => 1,
            TurnState::SawSecondPhase(seen) => seen,
        };

        if phase == PHASE_MASK {
            self.turn = TurnState::Idle;
            Some(if turning & 1 == 1 {
                Direction::Backward
            } else {
                Direction::Forward
            })
        } else {
            self.turn = TurnState::SawSecondPhase(phase);
            None
        }
    }
}

impl Default for EncoderDecoder {
    fn default() -> Self {
        Self::new()
    }
}
