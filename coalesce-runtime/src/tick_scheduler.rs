// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The per-tick scheduling primitive consumed by the tick clock.
//!
//! Modelled on display-refresh callbacks: a callback requested now runs once,
//! on the next tick, unless its token is cancelled first.

use core::fmt;

/// A callback run once on the next tick.
pub type TickCallback = Box<dyn FnOnce() + Send + 'static>;

/// Identifies one outstanding tick request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickToken(u64);

impl TickToken {
    /// Build a token from a scheduler-assigned id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The scheduler-assigned id.
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TickToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick#{}", self.0)
    }
}

/// Schedules callbacks on the host's tick cadence.
///
/// Implementations must:
/// - run each callback at most once, on a tick after the request
/// - never run a callback whose token was cancelled before its tick
/// - treat cancelling an unknown, fired, or already cancelled token as a no-op
/// - never hold internal locks while running callbacks, so a callback may
///   request the next tick
pub trait TickScheduler: Clone + Send + Sync + 'static {
    /// Run `callback` on the next tick.
    fn request_tick(&self, callback: TickCallback) -> TickToken;

    /// Withdraw a pending request.
    fn cancel_tick(&self, token: TickToken);

    /// Restart delivery for requests that are already queued.
    ///
    /// Called by consumers that are polled while waiting on a tick. Schedulers
    /// whose delivery cannot stop on its own keep the default no-op.
    fn resume(&self) {}
}
