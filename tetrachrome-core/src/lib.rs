//! Board-agnostic core logic for the mixing console firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (display bus, radio)
//! - Gamma-aware compositing and antialiased dial rendering
//! - Run-length alpha glyph decoding
//! - Encoder and push-button debounce
//! - Single-slot wireless dispatch to the strip receivers
//! - The cooperative console cycle
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod gfx;
pub mod input;
pub mod knob;
pub mod scheduler;
pub mod traits;
pub mod wireless;

#[cfg(test)]
pub(crate) mod testing;
