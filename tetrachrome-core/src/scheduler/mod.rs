//! Cooperative console cycle
//!
//! One foreground loop owns the display, the radio and all knob and strip
//! state. Interrupt handlers only touch the [`InputQueue`](crate::input::InputQueue),
//! which the loop drains before every tick.

pub mod cycle;

pub use cycle::{Console, ConsoleError, TickError, TickReport};
