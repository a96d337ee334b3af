//! Transmitter settings

/// nRF24L01+ link settings shared by the console and the strip receivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioConfig {
    /// RF channel, 2400 + n MHz
    pub channel: u8,
    /// Last four address bytes; the strip digit `'1'..='4'` goes first
    pub address_suffix: [u8; 4],
    /// SETUP_RETR: retransmit delay in the high nibble, count in the low
    pub setup_retr: u8,
    /// RF_SETUP: data rate and output power
    pub rf_setup: u8,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            channel: 76,
            address_suffix: *b"5925",
            // 1000us, 4 retries
            setup_retr: 0x34,
            // 1Mbps, -6dBm
            rf_setup: 0x04,
        }
    }
}
