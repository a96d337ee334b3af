//! Configuration types
//!
//! Everything is fixed at compile time; the defaults describe the
//! reference console board.

pub mod console;
pub mod radio;

pub use console::*;
pub use radio::*;
