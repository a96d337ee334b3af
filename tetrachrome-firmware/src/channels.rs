//! State shared between the input tasks and the console loop

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use tetrachrome_core::input::InputQueue;

/// Decoded events waiting for the console loop
const INPUT_QUEUE_SIZE: usize = 16;

/// Encoder and button events, filled by the input task
pub static INPUT_QUEUE: InputQueue<INPUT_QUEUE_SIZE> = InputQueue::new();

/// (Re)start the button release window
pub static RELEASE_ARM: Signal<CriticalSectionRawMutex, ()> = Signal::new();
