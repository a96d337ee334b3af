//! Display controller implementations

pub mod ili9481;

pub use ili9481::{ControlLines, Ili9481};
