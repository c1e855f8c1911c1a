// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use coalesce_runtime::Timer;
use parking_lot::Mutex;
use std::future::Future;
use std::ops::{Add, Sub};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};
use std::time::Duration;

/// A point on a [`ManualTimer`]'s timeline: the time elapsed since it was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ManualInstant(Duration);

impl ManualInstant {
    pub const fn since_start(self) -> Duration {
        self.0
    }
}

impl Add<Duration> for ManualInstant {
    type Output = ManualInstant;

    fn add(self, rhs: Duration) -> Self::Output {
        ManualInstant(self.0 + rhs)
    }
}

impl Sub<ManualInstant> for ManualInstant {
    type Output = Duration;

    fn sub(self, rhs: ManualInstant) -> Self::Output {
        self.0.saturating_sub(rhs.0)
    }
}

#[derive(Debug, Default)]
struct ManualClock {
    now: Duration,
    sleepers: Vec<(Duration, Waker)>,
}

/// A [`Timer`] whose time only moves through [`advance`](Self::advance).
///
/// Clones share the same timeline.
#[derive(Clone, Debug, Default)]
pub struct ManualTimer {
    clock: Arc<Mutex<ManualClock>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward and wakes every sleep that is now due.
    pub fn advance(&self, by: Duration) {
        let due: Vec<Waker> = {
            let mut clock = self.clock.lock();
            clock.now += by;
            let now = clock.now;
            let (due, waiting) = std::mem::take(&mut clock.sleepers)
                .into_iter()
                .partition(|(deadline, _)| *deadline <= now);
            clock.sleepers = waiting;
            due.into_iter().map(|(_, waker)| waker).collect()
        };

        for waker in due {
            waker.wake();
        }
    }

    /// Time elapsed since the timer was created.
    pub fn elapsed(&self) -> Duration {
        self.clock.lock().now
    }
}

impl Timer for ManualTimer {
    type Sleep = ManualSleep;

    type Instant = ManualInstant;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        let deadline = self.clock.lock().now + duration;
        ManualSleep {
            clock: Arc::clone(&self.clock),
            deadline,
        }
    }

    fn now(&self) -> Self::Instant {
        ManualInstant(self.clock.lock().now)
    }
}

/// Sleep future of a [`ManualTimer`].
#[derive(Debug)]
pub struct ManualSleep {
    clock: Arc<Mutex<ManualClock>>,
    deadline: Duration,
}

impl Future for ManualSleep {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut clock = self.clock.lock();
        if clock.now >= self.deadline {
            return Poll::Ready(());
        }
        clock.sleepers.push((self.deadline, cx.waker().clone()));
        Poll::Pending
    }
}
