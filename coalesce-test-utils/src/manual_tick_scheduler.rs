// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use coalesce_runtime::{TickCallback, TickScheduler, TickToken};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

#[derive(Default)]
struct ManualTicks {
    next_id: u64,
    queued: Vec<(TickToken, TickCallback)>,
    requested: usize,
    cancelled: usize,
    resumed: usize,
}

/// A [`TickScheduler`] that ticks only when [`tick`](Self::tick) is called.
///
/// Clones share the same queue, so a test keeps one handle while the clock
/// under test owns another.
#[derive(Clone, Default)]
pub struct ManualTickScheduler {
    state: Arc<Mutex<ManualTicks>>,
}

impl ManualTickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every callback requested so far and returns how many ran.
    ///
    /// Callbacks requested while ticking wait for the next tick.
    pub fn tick(&self) -> usize {
        let due = std::mem::take(&mut self.state.lock().queued);
        let count = due.len();
        for (_, callback) in due {
            callback();
        }
        count
    }

    /// Callbacks waiting for the next tick.
    pub fn pending(&self) -> usize {
        self.state.lock().queued.len()
    }

    /// Total number of `request_tick` calls.
    pub fn requested(&self) -> usize {
        self.state.lock().requested
    }

    /// Number of `cancel_tick` calls that withdrew a queued callback.
    pub fn cancelled(&self) -> usize {
        self.state.lock().cancelled
    }

    /// Number of `resume` calls.
    pub fn resumed(&self) -> usize {
        self.state.lock().resumed
    }
}

impl fmt::Debug for ManualTickScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ManualTickScheduler")
            .field("pending", &state.queued.len())
            .field("requested", &state.requested)
            .field("cancelled", &state.cancelled)
            .field("resumed", &state.resumed)
            .finish()
    }
}

impl TickScheduler for ManualTickScheduler {
    fn request_tick(&self, callback: TickCallback) -> TickToken {
        let mut state = self.state.lock();
        let token = TickToken::new(state.next_id);
        state.next_id += 1;
        state.requested += 1;
        state.queued.push((token, callback));
        token
    }

    fn cancel_tick(&self, token: TickToken) {
        let mut state = self.state.lock();
        let before = state.queued.len();
        state.queued.retain(|(queued, _)| *queued != token);
        if state.queued.len() < before {
            state.cancelled += 1;
        }
    }

    fn resume(&self) {
        self.state.lock().resumed += 1;
    }
}
