//! Interrupt-shared input state
//!
//! The decoder and the pending events live behind one critical section.
//! The edge and timer handlers only ever call [`InputQueue::pin_change`]
//! and [`InputQueue::release_elapsed`]; the foreground loop drains events
//! with [`InputQueue::pop`].

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use super::decoder::{EncoderDecoder, InputSample};
use super::events::InputEvent;

struct Shared<const N: usize> {
    decoder: EncoderDecoder,
    events: Deque<InputEvent, N>,
    overruns: u32,
}

/// Bounded queue of decoded input events
pub struct InputQueue<const N: usize> {
    inner: Mutex<RefCell<Shared<N>>>,
}

impl<const N: usize> InputQueue<N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Shared {
                decoder: EncoderDecoder::new(),
                events: Deque::new(),
                overruns: 0,
            })),
        }
    }

    /// Decode one pin-change sample
    ///
    /// Returns true when the caller should restart the release timer. If
    /// the queue is full the new event is discarded and counted.
    pub fn pin_change(&self, sample: InputSample) -> bool {
        critical_section::with(|cs| {
            let mut shared = self.inner.borrow_ref_mut(cs);
            let decoded = shared.decoder.on_change(sample);
            for event in decoded.events {
                if shared.events.push_back(event).is_err() {
                    shared.overruns = shared.overruns.saturating_add(1);
                }
            }
            decoded.arm_release
        })
    }

    /// Decode samples from `read` until the pins hold still
    ///
    /// Levels are read again after every decode. An edge that landed
    /// after the last read is decoded straight away instead of waiting
    /// for a wake-up that will never come. Returns true when any of the
    /// samples asked for the release timer.
    pub fn follow<F: FnMut() -> InputSample>(&self, mut read: F) -> bool {
        let mut arm_release = false;
        let mut sample = read();
        loop {
            arm_release |= self.pin_change(sample);
            let next = read();
            if next == sample {
                return arm_release;
            }
            sample = next;
        }
    }

    /// The release window ran out without another press
    pub fn release_elapsed(&self) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).decoder.on_release_elapsed());
    }

    /// Oldest undelivered event
    pub fn pop(&self) -> Option<InputEvent> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).events.pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).events.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Events dropped since the last call
    pub fn take_overruns(&self) -> u32 {
        critical_section::with(|cs| core::mem::take(&mut self.inner.borrow_ref_mut(cs).overruns))
    }
}

impl<const N: usize> Default for InputQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
