//! Wireless links to the strip receivers
//!
//! Every strip listens on its own address and takes a fixed 4-byte
//! payload: red, green, blue and warm white. Only one transmission is
//! ever in flight; see [`Dispatcher`].

pub mod dispatch;
pub mod registers;

pub use dispatch::{DispatchEvent, Dispatcher, Strip, CHANNEL_COUNT, PAYLOAD_LEN, STRIP_COUNT};
