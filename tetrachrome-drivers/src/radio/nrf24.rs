//! nRF24L01+ transceiver (SPI)
//!
//! Every register access is one SPI transaction, so chip select framing
//! belongs to the [`SpiDevice`]. CE is tied high by the board; a loaded
//! payload goes on the air as soon as the transmit FIFO is written.

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::{Operation, SpiDevice};
use tetrachrome_core::config::RadioConfig;
use tetrachrome_core::traits::{Radio, RadioError};
use tetrachrome_core::wireless::registers::{cmd, reg, status, CONFIG_PTX};

/// Auto-acknowledge and receive on pipes 0 and 1
const PIPES_0_1: u8 = 0x03;

/// Power-up settle time after writing CONFIG
const POWER_UP_MS: u32 = 5;

/// Supply settle time before the first command
const STARTUP_MS: u32 = 100;

/// nRF24L01+ on an SPI device
pub struct Nrf24<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Nrf24<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    pub fn release(self) -> SPI {
        self.spi
    }

    /// Configure as a primary transmitter with auto-acknowledge
    pub fn init<D: DelayNs>(&mut self, config: &RadioConfig, delay: &mut D) -> Result<(), RadioError> {
        delay.delay_ms(STARTUP_MS);
        self.flush_tx()?;
        self.write_register(reg::CONFIG, CONFIG_PTX)?;
        delay.delay_ms(POWER_UP_MS);

        self.write_register(reg::SETUP_RETR, config.setup_retr)?;
        self.write_register(reg::RF_SETUP, config.rf_setup)?;
        // No dynamic payloads or payloads with ACK
        self.write_register(reg::FEATURE, 0x00)?;
        self.write_register(reg::DYNPD, 0x00)?;
        self.write_register(reg::STATUS, status::CLEAR_IRQ)?;
        self.write_register(reg::RF_CH, config.channel)?;

        self.write_command(cmd::FLUSH_TX)?;
        self.write_command(cmd::FLUSH_RX)?;
        self.write_register(reg::CONFIG, CONFIG_PTX)?;
        delay.delay_ms(POWER_UP_MS);

        // Pipe 0 receives the acknowledgements
        self.write_register(reg::EN_AA, PIPES_0_1)?;
        self.write_register(reg::EN_RXADDR, PIPES_0_1)
    }
}

impl<SPI: SpiDevice> Radio for Nrf24<SPI> {
    fn write_command(&mut self, opcode: u8) -> Result<(), RadioError> {
        self.spi.write(&[opcode]).map_err(|_| RadioError::Bus)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), RadioError> {
        self.spi
            .write(&[cmd::W_REGISTER | register, value])
            .map_err(|_| RadioError::Bus)
    }

    fn write_address(&mut self, register: u8, address: &[u8; 5]) -> Result<(), RadioError> {
        let mut frame = [0u8; 6];
        frame[0] = cmd::W_REGISTER | register;
        frame[1..].copy_from_slice(address);
        self.spi.write(&frame).map_err(|_| RadioError::Bus)
    }

    fn read_status(&mut self) -> Result<u8, RadioError> {
        // STATUS is clocked out while the command byte goes in
        let mut frame = [cmd::NOP];
        self.spi
            .transfer_in_place(&mut frame)
            .map_err(|_| RadioError::Bus)?;
        Ok(frame[0])
    }

    fn write_tx_payload(&mut self, payload: &[u8]) -> Result<(), RadioError> {
        self.spi
            .transaction(&mut [
                Operation::Write(&[cmd::W_TX_PAYLOAD]),
                Operation::Write(payload),
            ])
            .map_err(|_| RadioError::Bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{log, MockDelay, MockSpi, Signal};

    #[test]
    fn test_register_write_framing() {
        let mut radio = Nrf24::new(MockSpi::default());
        radio.write_register(reg::RX_PW_P0, 4).unwrap();
        radio.write_address(reg::TX_ADDR, b"15925").unwrap();
        radio.write_command(cmd::FLUSH_TX).unwrap();

        assert_eq!(
            radio.release().frames,
            vec![
                vec![0x31, 4],
                vec![0x30, b'1', b'5', b'9', b'2', b'5'],
                vec![0xE1],
            ]
        );
    }

    #[test]
    fn test_read_status_clocks_nop() {
        let mut spi = MockSpi::default();
        spi.status = 0x2E;
        let mut radio = Nrf24::new(spi);
        assert_eq!(radio.read_status(), Ok(0x2E));
        assert_eq!(radio.release().frames, vec![vec![0xFF]]);
    }

    #[test]
    fn test_payload_is_one_transaction() {
        let mut radio = Nrf24::new(MockSpi::default());
        radio.write_tx_payload(&[1, 2, 3, 4]).unwrap();
        assert_eq!(radio.release().frames, vec![vec![0xA0, 1, 2, 3, 4]]);
    }

    #[test]
    fn test_flush_tx_default() {
        let mut radio = Nrf24::new(MockSpi::default());
        radio.flush_tx().unwrap();
        assert_eq!(radio.release().frames, vec![vec![cmd::FLUSH_TX]]);
    }

    #[test]
    fn test_init_sequence() {
        let log = log();
        let mut radio = Nrf24::new(MockSpi::default());
        radio
            .init(&RadioConfig::default(), &mut MockDelay::new(&log))
            .unwrap();

        assert_eq!(
            radio.release().frames,
            vec![
                vec![0xE1],
                vec![0x20, 0x0E],
                vec![0x24, 0x34],
                vec![0x26, 0x04],
                vec![0x3D, 0x00],
                vec![0x3C, 0x00],
                vec![0x27, 0x70],
                vec![0x25, 76],
                vec![0xE1],
                vec![0xE2],
                vec![0x20, 0x0E],
                vec![0x21, 0x03],
                vec![0x22, 0x03],
            ]
        );
        assert_eq!(
            *log.borrow(),
            vec![Signal::DelayMs(100), Signal::DelayMs(5), Signal::DelayMs(5)]
        );
    }
}
