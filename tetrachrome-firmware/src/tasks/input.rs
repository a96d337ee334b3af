//! Encoder and push-button edge task

use defmt::*;
use embassy_futures::select::select3;
use embassy_rp::gpio::Input;

use tetrachrome_core::input::InputSample;

use crate::channels::{INPUT_QUEUE, RELEASE_ARM};

/// Sample all three inputs on every edge of any of them
#[embassy_executor::task]
pub async fn input_task(
    mut encoder_a: Input<'static>,
    mut encoder_b: Input<'static>,
    mut button: Input<'static>,
) {
    info!("Input task started");

    loop {
        select3(
            encoder_a.wait_for_any_edge(),
            encoder_b.wait_for_any_edge(),
            button.wait_for_any_edge(),
        )
        .await;

        // A new wait drops edge status latched before it, so keep
        // sampling until the levels stop moving. Button is active low.
        let arm_release = INPUT_QUEUE.follow(|| {
            let sample = InputSample::new(encoder_a.is_high(), encoder_b.is_high(), button.is_low());
            trace!("Input sample: {:?}", sample);
            sample
        });

        if arm_release {
            RELEASE_ARM.signal(());
        }
    }
}
