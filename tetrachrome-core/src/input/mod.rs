//! Rotary encoder and push-button input
//!
//! The edge handler feeds raw pin samples into an [`InputQueue`]; the
//! decoder turns them into discrete [`InputEvent`]s that the foreground
//! drains in order.

pub mod decoder;
pub mod events;
pub mod queue;

pub use decoder::{Decoded, EncoderDecoder, InputSample, TurnState};
pub use events::{Direction, InputEvent};
pub use queue::InputQueue;
