//! Decoded input events

/// Which way a detent moved the encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise; raises the target angle
    Forward,
    /// Counter-clockwise; lowers the target angle
    Backward,
}

/// Something the operator did
///
/// Both variants carry the knob that was selected when the edge was
/// decoded, so a later selection cannot redirect an earlier turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// One detent on the encoder
    Turn { knob: u8, direction: Direction },
    /// The push-button moved the selection to `knob`
    Select { knob: u8 },
}
