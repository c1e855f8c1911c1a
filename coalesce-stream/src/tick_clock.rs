// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A per-tick clock.
//!
//! [`TickClock::ticks`] starts an infinite producer that yields, once per
//! scheduler tick, the time elapsed since the producer was created. Each call
//! gets its own independent producer; dropping it withdraws the outstanding
//! tick request from the scheduler.
//!
//! With the `runtime-tokio` feature a process-wide clock is available through
//! [`TickClock::shared`]. It is built once, on first use, from [`TokioTimer`]
//! and a [`FrameScheduler`] at the default frame rate, and lives for the rest of
//! the process. Code that needs a different time source or cadence builds its
//! own clock with [`TickClock::new`].

use coalesce_core::StreamItem;
use coalesce_runtime::{TickScheduler, TickToken, Timer};
use core::fmt;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};
use core::time::Duration;
use futures::stream::{FusedStream, Stream};
use parking_lot::Mutex;
use std::sync::Arc;

#[cfg(feature = "runtime-tokio")]
use coalesce_runtime::{
    impls::tokio::{TokioRuntime, TokioTimer},
    FrameScheduler,
};
#[cfg(feature = "runtime-tokio")]
use std::sync::OnceLock;

/// The process-wide clock type.
#[cfg(feature = "runtime-tokio")]
pub type DefaultTickClock = TickClock<TokioTimer, FrameScheduler<TokioRuntime>>;

struct ClockSource<Tm, Sch> {
    timer: Tm,
    scheduler: Sch,
}

/// A time source paired with a tick scheduler.
///
/// Cloning is cheap and clones share identity, see [`TickClock::ptr_eq`].
pub struct TickClock<Tm, Sch> {
    source: Arc<ClockSource<Tm, Sch>>,
}

impl<Tm: Timer, Sch: TickScheduler> TickClock<Tm, Sch> {
    pub fn new(timer: Tm, scheduler: Sch) -> Self {
        Self {
            source: Arc::new(ClockSource { timer, scheduler }),
        }
    }

    pub fn timer(&self) -> &Tm {
        &self.source.timer
    }

    pub fn scheduler(&self) -> &Sch {
        &self.source.scheduler
    }

    /// Starts a new tick producer measuring from now.
    pub fn ticks(&self) -> Ticks<Tm, Sch> {
        Ticks {
            clock: self.clone(),
            started_at: self.timer().now(),
            last: Duration::ZERO,
            slot: Arc::new(Mutex::new(TickSlot::default())),
            requested: None,
        }
    }

    /// Whether both handles refer to the same clock instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source, &other.source)
    }
}

#[cfg(feature = "runtime-tokio")]
impl TickClock<TokioTimer, FrameScheduler<TokioRuntime>> {
    /// The process-wide clock, built on first use.
    ///
    /// Ticks are driven by a task on the Tokio runtime that is current when a
    /// tick is first requested.
    pub fn shared() -> Self {
        static SHARED: OnceLock<DefaultTickClock> = OnceLock::new();

        SHARED
            .get_or_init(|| {
                trace!("building shared tick clock");
                TickClock::new(TokioTimer, FrameScheduler::new())
            })
            .clone()
    }
}

impl<Tm, Sch> Clone for TickClock<Tm, Sch> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<Tm: fmt::Debug, Sch: fmt::Debug> fmt::Debug for TickClock<Tm, Sch> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickClock")
            .field("timer", &self.source.timer)
            .field("scheduler", &self.source.scheduler)
            .finish()
    }
}

#[derive(Default)]
struct TickSlot {
    fired: bool,
    waker: Option<Waker>,
}

/// Infinite producer of elapsed time, one item per tick.
///
/// Items never decrease. A tick is only requested while the producer is being
/// polled, so a consumer that stops polling schedules no further work.
pub struct Ticks<Tm: Timer, Sch: TickScheduler> {
    clock: TickClock<Tm, Sch>,
    started_at: Tm::Instant,
    last: Duration,
    slot: Arc<Mutex<TickSlot>>,
    requested: Option<TickToken>,
}

impl<Tm: Timer, Sch: TickScheduler> Ticks<Tm, Sch> {
    /// Whether a tick request is outstanding with the scheduler.
    pub fn is_scheduled(&self) -> bool {
        self.requested.is_some()
    }

    fn request(&mut self) {
        let slot = Arc::clone(&self.slot);
        let token = self.clock.scheduler().request_tick(Box::new(move || {
            let waker = {
                let mut slot = slot.lock();
                slot.fired = true;
                slot.waker.take()
            };
            if let Some(waker) = waker {
                waker.wake();
            }
        }));
        self.requested = Some(token);
    }
}

impl<Tm: Timer, Sch: TickScheduler> Unpin for Ticks<Tm, Sch> {}

impl<Tm: Timer, Sch: TickScheduler> Stream for Ticks<Tm, Sch> {
    type Item = StreamItem<Duration>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        {
            let mut slot = this.slot.lock();
            if slot.fired {
                slot.fired = false;
                drop(slot);

                this.requested = None;
                let elapsed = (this.clock.timer().now() - this.started_at).max(this.last);
                this.last = elapsed;
                return Poll::Ready(Some(StreamItem::Value(elapsed)));
            }
            slot.waker = Some(cx.waker().clone());
        }

        if this.requested.is_none() {
            this.request();
        } else {
            this.clock.scheduler().resume();
        }
        Poll::Pending
    }
}

impl<Tm: Timer, Sch: TickScheduler> FusedStream for Ticks<Tm, Sch> {
    fn is_terminated(&self) -> bool {
        false
    }
}

impl<Tm: Timer, Sch: TickScheduler> Drop for Ticks<Tm, Sch> {
    fn drop(&mut self) {
        if let Some(token) = self.requested.take() {
            trace!("tick producer dropped, cancelling {}", token);
            self.clock.scheduler().cancel_tick(token);
        }
    }
}
