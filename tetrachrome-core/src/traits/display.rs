//! Display bus trait for the parallel-interface LCD

use crate::gfx::Region;

/// Errors that can occur on the display bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// A control or data line could not be driven
    Bus,
}

/// Command/data protocol of the display controller
///
/// The graphics stack is the only client. It never toggles control lines
/// itself: every drawing operation opens a region, streams data words and
/// then calls [`idle`](DisplayBus::idle), on error paths included.
pub trait DisplayBus {
    /// Send a command opcode followed by its argument bytes
    ///
    /// Leaves the bus idle.
    fn send_command(&mut self, opcode: u8, args: &[u8]) -> Result<(), DisplayError>;

    /// Set the column/page address window and enter memory-write mode
    ///
    /// Leaves the bus selected so data words can follow.
    fn begin_region(&mut self, region: Region) -> Result<(), DisplayError>;

    /// Stream one 16-bit pixel word into the open region
    fn write_data_word(&mut self, word: u16) -> Result<(), DisplayError>;

    /// Stream `count` copies of `word`
    ///
    /// A count of 0 means 256.
    fn repeat_data_word(&mut self, word: u16, count: u8) -> Result<(), DisplayError>;

    /// Return every control line to its inactive state
    fn idle(&mut self) -> Result<(), DisplayError>;
}
