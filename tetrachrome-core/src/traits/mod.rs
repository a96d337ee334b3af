//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod display;
pub mod radio;

pub use display::{DisplayBus, DisplayError};
pub use radio::{Radio, RadioError};
