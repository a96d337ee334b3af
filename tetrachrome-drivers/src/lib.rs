//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tetrachrome-core:
//!
//! - Display: ILI9481 over an 8-bit parallel bus
//! - Radio: nRF24L01+ over SPI

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod radio;

#[cfg(test)]
mod mock;

pub use display::{ControlLines, Ili9481};
pub use radio::Nrf24;
