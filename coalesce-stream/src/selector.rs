// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::tick_clock::{TickClock, Ticks};
use coalesce_core::{CoalesceError, StreamItem};
use coalesce_runtime::{TickScheduler, Timer};
use core::fmt;
use core::time::Duration;
use futures::stream::{Stream, StreamExt, Take};

#[cfg(feature = "runtime-tokio")]
use coalesce_runtime::{impls::tokio::TokioRuntime, impls::tokio::TokioTimer, FrameScheduler};

/// The selector used when none is given: the next tick of the shared clock.
#[cfg(feature = "runtime-tokio")]
pub type DefaultNextTick = NextTick<TokioTimer, FrameScheduler<TokioRuntime>>;

/// Computes the window signal for the value that opens a window.
///
/// Called exactly once per opened window. Only the first item of the returned
/// signal matters: a value or the end of the stream closes the window, an
/// error fails the whole pipeline. An `Err` from `select` fails the pipeline
/// without opening a window.
pub trait DurationSelector<T> {
    type Tick;
    type Signal: Stream<Item = StreamItem<Self::Tick>>;

    fn select(&mut self, value: &T) -> Result<Self::Signal, CoalesceError>;
}

/// Adapts an infallible closure `FnMut(&T) -> signal`.
#[derive(Clone)]
pub struct SelectorFn<F>(F);

impl<F> SelectorFn<F> {
    pub fn new(selector: F) -> Self {
        Self(selector)
    }
}

impl<T, F, W, X> DurationSelector<T> for SelectorFn<F>
where
    F: FnMut(&T) -> W,
    W: Stream<Item = StreamItem<X>>,
{
    type Tick = X;
    type Signal = W;

    fn select(&mut self, value: &T) -> Result<W, CoalesceError> {
        Ok((self.0)(value))
    }
}

impl<F> fmt::Debug for SelectorFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SelectorFn")
    }
}

/// Adapts a fallible closure `FnMut(&T) -> Result<signal, E>`.
///
/// An `Err` surfaces downstream as [`CoalesceError::DurationSelectorError`].
#[derive(Clone)]
pub struct TrySelectorFn<F>(F);

impl<F> TrySelectorFn<F> {
    pub fn new(selector: F) -> Self {
        Self(selector)
    }
}

impl<T, F, W, X, E> DurationSelector<T> for TrySelectorFn<F>
where
    F: FnMut(&T) -> Result<W, E>,
    W: Stream<Item = StreamItem<X>>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Tick = X;
    type Signal = W;

    fn select(&mut self, value: &T) -> Result<W, CoalesceError> {
        (self.0)(value).map_err(CoalesceError::selector_error)
    }
}

impl<F> fmt::Debug for TrySelectorFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TrySelectorFn")
    }
}

/// Opens every window until the next tick of a [`TickClock`].
pub struct NextTick<Tm, Sch> {
    clock: TickClock<Tm, Sch>,
}

impl<Tm: Timer, Sch: TickScheduler> NextTick<Tm, Sch> {
    pub fn new(clock: TickClock<Tm, Sch>) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &TickClock<Tm, Sch> {
        &self.clock
    }
}

#[cfg(feature = "runtime-tokio")]
impl NextTick<TokioTimer, FrameScheduler<TokioRuntime>> {
    /// Ticks of [`TickClock::shared`].
    pub fn shared() -> Self {
        Self::new(TickClock::shared())
    }
}

#[cfg(feature = "runtime-tokio")]
impl Default for NextTick<TokioTimer, FrameScheduler<TokioRuntime>> {
    fn default() -> Self {
        Self::shared()
    }
}

impl<Tm, Sch> Clone for NextTick<Tm, Sch> {
    fn clone(&self) -> Self {
        Self {
            clock: self.clock.clone(),
        }
    }
}

impl<Tm: fmt::Debug, Sch: fmt::Debug> fmt::Debug for NextTick<Tm, Sch> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NextTick").field("clock", &self.clock).finish()
    }
}

impl<T, Tm: Timer, Sch: TickScheduler> DurationSelector<T> for NextTick<Tm, Sch> {
    type Tick = Duration;
    type Signal = Take<Ticks<Tm, Sch>>;

    fn select(&mut self, _value: &T) -> Result<Self::Signal, CoalesceError> {
        Ok(self.clock.ticks().take(1))
    }
}
