// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fixed-rate frame scheduler.
//!
//! Every callback requested before a frame boundary runs at that boundary, in
//! request order. A single driver task per scheduler sleeps one frame period at
//! a time using the runtime's [`Timer`] and exits as soon as no callbacks are
//! queued, so an idle scheduler costs nothing.

use crate::runtime::Runtime;
use crate::tick_scheduler::{TickCallback, TickScheduler, TickToken};
use crate::timer::Timer;
use core::marker::PhantomData;
use core::time::Duration;
use parking_lot::Mutex;
use std::sync::Arc;

/// One frame at 60 Hz.
pub const DEFAULT_FRAME_PERIOD: Duration = Duration::from_micros(16_667);

struct FrameQueue {
    next_id: u64,
    queued: Vec<(TickToken, TickCallback)>,
    driver_running: bool,
}

/// Clears `driver_running` when the driver task is dropped before going idle,
/// whether it was dropped unpolled, mid-frame, or by a failed spawn. Callbacks
/// still queued at that point wait for the next driver.
struct DriverGuard(Option<Arc<Mutex<FrameQueue>>>);

impl Drop for DriverGuard {
    fn drop(&mut self) {
        if let Some(queue) = self.0.take() {
            queue.lock().driver_running = false;
        }
    }
}

/// A [`TickScheduler`] ticking every `period` on runtime `R`.
pub struct FrameScheduler<R: Runtime> {
    queue: Arc<Mutex<FrameQueue>>,
    period: Duration,
    _runtime: PhantomData<fn() -> R>,
}

impl<R: Runtime> FrameScheduler<R> {
    /// A scheduler ticking at [`DEFAULT_FRAME_PERIOD`].
    pub fn new() -> Self {
        Self::with_period(DEFAULT_FRAME_PERIOD)
    }

    /// A scheduler ticking every `period`.
    pub fn with_period(period: Duration) -> Self {
        Self {
            queue: Arc::new(Mutex::new(FrameQueue {
                next_id: 0,
                queued: Vec::new(),
                driver_running: false,
            })),
            period,
            _runtime: PhantomData,
        }
    }

    /// The time between two frames.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.queue.lock().queued.len()
    }

    /// Claims the driver slot if callbacks are queued and no driver runs.
    fn claim_driver(&self) -> bool {
        let mut state = self.queue.lock();
        if state.driver_running || state.queued.is_empty() {
            return false;
        }
        state.driver_running = true;
        true
    }

    fn start_driver(&self) {
        let queue = Arc::clone(&self.queue);
        let period = self.period;
        let guard = DriverGuard(Some(Arc::clone(&queue)));

        trace!("frame driver starting, period {:?}", period);
        R::spawn(async move {
            let mut guard = guard;
            let timer = R::Timer::default();
            loop {
                timer.sleep_future(period).await;

                let due = core::mem::take(&mut queue.lock().queued);
                for (_, callback) in due {
                    callback();
                }

                let mut state = queue.lock();
                if state.queued.is_empty() {
                    state.driver_running = false;
                    guard.0 = None;
                    trace!("frame driver idle, stopping");
                    break;
                }
            }
        });
    }
}

impl<R: Runtime> Default for FrameScheduler<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Runtime> Clone for FrameScheduler<R> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
            period: self.period,
            _runtime: PhantomData,
        }
    }
}

impl<R: Runtime> core::fmt::Debug for FrameScheduler<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("period", &self.period)
            .field("pending", &self.pending())
            .finish()
    }
}

impl<R: Runtime> TickScheduler for FrameScheduler<R> {
    /// # Panics
    ///
    /// Starting the driver panics if `R` cannot spawn from the calling context,
    /// e.g. `TokioRuntime` outside of a Tokio runtime.
    fn request_tick(&self, callback: TickCallback) -> TickToken {
        let token = {
            let mut state = self.queue.lock();
            let token = TickToken::new(state.next_id);
            state.next_id += 1;
            state.queued.push((token, callback));
            token
        };

        if self.claim_driver() {
            self.start_driver();
        }
        token
    }

    fn cancel_tick(&self, token: TickToken) {
        self.queue.lock().queued.retain(|(queued, _)| *queued != token);
    }

    /// Spawns a new driver on the calling runtime when callbacks outlived the
    /// previous one.
    fn resume(&self) {
        if self.claim_driver() {
            debug!("frame driver resumed with {} queued callbacks", self.pending());
            self.start_driver();
        }
    }
}
