//! nRF24L01+ register map
//!
//! Only the registers and commands the console touches are listed.

/// Register addresses
pub mod reg {
    /// Power, mode and CRC configuration
    pub const CONFIG: u8 = 0x00;
    /// Auto acknowledgement per pipe
    pub const EN_AA: u8 = 0x01;
    /// Enabled receive pipes
    pub const EN_RXADDR: u8 = 0x02;
    /// Automatic retransmission delay and count
    pub const SETUP_RETR: u8 = 0x04;
    /// RF channel
    pub const RF_CH: u8 = 0x05;
    /// Data rate and output power
    pub const RF_SETUP: u8 = 0x06;
    /// Interrupt flags and FIFO state
    pub const STATUS: u8 = 0x07;
    /// Receive address, pipe 0 (carries auto-ack replies)
    pub const RX_ADDR_P0: u8 = 0x0A;
    /// Transmit address
    pub const TX_ADDR: u8 = 0x10;
    /// Payload width, pipe 0
    pub const RX_PW_P0: u8 = 0x11;
    /// Dynamic payload length per pipe
    pub const DYNPD: u8 = 0x1C;
    /// Feature switches
    pub const FEATURE: u8 = 0x1D;
}

/// SPI commands
pub mod cmd {
    /// OR with a register address to write it
    pub const W_REGISTER: u8 = 0x20;
    pub const W_TX_PAYLOAD: u8 = 0xA0;
    pub const FLUSH_TX: u8 = 0xE1;
    pub const FLUSH_RX: u8 = 0xE2;
    /// No operation; clocks out the status register
    pub const NOP: u8 = 0xFF;
}

/// STATUS register bits
pub mod status {
    /// Data sent (acknowledged)
    pub const TX_DS: u8 = 0x20;
    /// Maximum retransmits reached
    pub const MAX_RT: u8 = 0x10;
    /// Write-one-to-clear mask for all three interrupt flags
    pub const CLEAR_IRQ: u8 = 0x70;
}

/// CONFIG value: powered up, transmitter, 2-byte CRC
pub const CONFIG_PTX: u8 = 0x0E;
