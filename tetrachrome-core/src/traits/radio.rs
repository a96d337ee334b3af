//! Packet radio trait for the strip links

use crate::wireless::registers::cmd;

/// Errors that can occur talking to the radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// SPI transaction failed
    Bus,
}

/// Register-level access to an nRF24-style transceiver
///
/// The dispatch queue only sequences these calls. Bus timing and the
/// power-up configuration belong to the implementation.
pub trait Radio {
    /// Send a bare command byte
    fn write_command(&mut self, opcode: u8) -> Result<(), RadioError>;

    /// Write a single-byte register
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), RadioError>;

    /// Write a 5-byte address register
    fn write_address(&mut self, register: u8, address: &[u8; 5]) -> Result<(), RadioError>;

    /// Read the status register
    fn read_status(&mut self) -> Result<u8, RadioError>;

    /// Load a payload into the transmit FIFO
    fn write_tx_payload(&mut self, payload: &[u8]) -> Result<(), RadioError>;

    /// Discard everything in the transmit FIFO
    fn flush_tx(&mut self) -> Result<(), RadioError> {
        self.write_command(cmd::FLUSH_TX)
    }
}
