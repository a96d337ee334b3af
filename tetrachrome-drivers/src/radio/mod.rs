//! Radio transceiver implementations

pub mod nrf24;

pub use nrf24::Nrf24;
