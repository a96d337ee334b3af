//! Embassy async tasks
//!
//! Both tasks stand in for interrupt handlers: they only feed the shared
//! input queue. All drawing and radio traffic stays in the main loop.

pub mod input;
pub mod release;

pub use input::input_task;
pub use release::release_task;
