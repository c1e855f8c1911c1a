// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Ready-made window signals.
//!
//! A window stays open until its signal yields a first value or ends. Any
//! `Stream<Item = StreamItem<X>>` works as a signal; the constructors here
//! cover the common shapes.
//!
//! | Constructor | Window closes |
//! |---|---|
//! | [`immediate`] | on the first poll |
//! | [`never`] | never |
//! | [`timer`] / [`timer_with`] | after a fixed duration |
//! | [`from_future`] / [`try_from_future`] | when a deferred computation resolves |
//! | [`next_tick`] / [`next_tick_of`] | on the next tick of a [`TickClock`] |

use crate::tick_clock::{TickClock, Ticks};
use coalesce_core::{CoalesceError, StreamItem};
use coalesce_runtime::{TickScheduler, Timer};
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use core::time::Duration;
use futures::stream::{self, FusedStream, Stream, StreamExt, Take};
use futures::FutureExt;
use pin_project::pin_project;

#[cfg(feature = "runtime-tokio")]
use crate::tick_clock::DefaultTickClock;
#[cfg(feature = "runtime-tokio")]
use coalesce_runtime::{impls::tokio::TokioRuntime, impls::tokio::TokioTimer, FrameScheduler};

/// A zero-length window: completes as soon as it is polled.
pub fn immediate() -> stream::Empty<StreamItem<()>> {
    stream::empty()
}

/// A window that never closes.
pub fn never() -> stream::Pending<StreamItem<()>> {
    stream::pending()
}

/// A window that closes after `duration` on the Tokio timer.
#[cfg(feature = "runtime-tokio")]
pub fn timer(duration: Duration) -> TimerSignal<TokioTimer> {
    timer_with(&TokioTimer, duration)
}

/// A window that closes after `duration` on `timer`.
pub fn timer_with<Tm: Timer>(timer: &Tm, duration: Duration) -> TimerSignal<Tm> {
    TimerSignal {
        sleep: Some(timer.sleep_future(duration)),
    }
}

/// A window that closes when `future` resolves.
pub fn from_future<F: Future>(future: F) -> impl Stream<Item = StreamItem<F::Output>> {
    stream::once(future.map(StreamItem::Value))
}

/// A window that closes when `future` resolves, or fails the pipeline if it
/// resolves to an error.
pub fn try_from_future<F, X, E>(future: F) -> impl Stream<Item = StreamItem<X>>
where
    F: Future<Output = Result<X, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    stream::once(future.map(|result| StreamItem::from(result.map_err(CoalesceError::user_error))))
}

/// A window that closes on the next tick of the shared clock.
#[cfg(feature = "runtime-tokio")]
pub fn next_tick() -> Take<Ticks<TokioTimer, FrameScheduler<TokioRuntime>>> {
    next_tick_of(&DefaultTickClock::shared())
}

/// A window that closes on the next tick of `clock`.
pub fn next_tick_of<Tm, Sch>(clock: &TickClock<Tm, Sch>) -> Take<Ticks<Tm, Sch>>
where
    Tm: Timer,
    Sch: TickScheduler,
{
    clock.ticks().take(1)
}

/// Signal that fires once after a sleep.
#[pin_project]
pub struct TimerSignal<Tm: Timer> {
    #[pin]
    sleep: Option<Tm::Sleep>,
}

impl<Tm: Timer> Stream for TimerSignal<Tm> {
    type Item = StreamItem<()>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        match this.sleep.as_mut().as_pin_mut() {
            None => Poll::Ready(None),
            Some(sleep) => match sleep.poll(cx) {
                Poll::Ready(()) => {
                    this.sleep.set(None);
                    Poll::Ready(Some(StreamItem::Value(())))
                }
                Poll::Pending => Poll::Pending,
            },
        }
    }
}

impl<Tm: Timer> FusedStream for TimerSignal<Tm> {
    fn is_terminated(&self) -> bool {
        self.sleep.is_none()
    }
}
