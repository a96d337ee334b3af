//! Tetrachrome Hardware Abstraction Layer
//!
//! This crate defines the board-level traits that sit below the display
//! and radio drivers. Digital pins and SPI come from `embedded-hal`; the
//! only thing it lacks is a byte-wide parallel port, which the ILI9481
//! front panel needs.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │  tetrachrome-drivers (ILI9481, nRF24L01+)  │
//! └────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌────────────────────────────────────────────┐
//! │  tetrachrome-hal (this crate - traits)     │
//! └────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌────────────────────────────────────────────┐
//! │  embedded-hal pins (embassy-rp, mocks)     │
//! └────────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`port::DataPort`] - 8-bit parallel data bus

#![no_std]
#![deny(unsafe_code)]

pub mod port;

pub use port::{DataPort, PinPort};
