//! Button release debounce timer
//!
//! The button counts as released once `window` passes with no new press
//! edge. Every press edge restarts the window.

use defmt::*;
use embassy_time::{with_timeout, Duration};

use crate::channels::{INPUT_QUEUE, RELEASE_ARM};

#[embassy_executor::task]
pub async fn release_task(window: Duration) {
    info!("Release timer task started");

    loop {
        RELEASE_ARM.wait().await;
        while with_timeout(window, RELEASE_ARM.wait()).await.is_ok() {}

        INPUT_QUEUE.release_elapsed();
        trace!("Button released");
    }
}
