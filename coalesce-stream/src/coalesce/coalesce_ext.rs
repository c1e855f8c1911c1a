// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::coalesce_stream::CoalesceStream;
use crate::config::CoalesceConfig;
use crate::selector::{DurationSelector, NextTick, SelectorFn, TrySelectorFn};
use crate::tick_clock::TickClock;
use coalesce_core::{Producer, StreamItem};
use coalesce_runtime::{TickScheduler, Timer};
use futures::stream::Stream;

#[cfg(feature = "runtime-tokio")]
use crate::selector::DefaultNextTick;

/// Extension trait providing the `coalesce` operators for producers.
///
/// Each call builds a fresh pipeline with its own window state.
pub trait CoalesceExt<T>: Producer<T> + Sized {
    /// Coalesces on the ticks of the shared clock: every window lasts until
    /// the next frame.
    #[cfg(feature = "runtime-tokio")]
    fn coalesce(self, config: CoalesceConfig) -> CoalesceStream<Self, T, DefaultNextTick> {
        CoalesceStream::new(self, NextTick::shared(), config)
    }

    /// Coalesces on the ticks of `clock`.
    fn coalesce_on_ticks<Tm, Sch>(
        self,
        clock: &TickClock<Tm, Sch>,
        config: CoalesceConfig,
    ) -> CoalesceStream<Self, T, NextTick<Tm, Sch>>
    where
        Tm: Timer,
        Sch: TickScheduler,
    {
        CoalesceStream::new(self, NextTick::new(clock.clone()), config)
    }

    /// Coalesces with windows computed per value by `selector`.
    ///
    /// # Arguments
    ///
    /// * `selector` - called with the value that opens each window; the
    ///   window closes on the first item or the end of the returned signal
    /// * `config` - which window edges are emitted
    fn coalesce_with<F, W, X>(
        self,
        selector: F,
        config: CoalesceConfig,
    ) -> CoalesceStream<Self, T, SelectorFn<F>>
    where
        F: FnMut(&T) -> W,
        W: Stream<Item = StreamItem<X>>,
    {
        CoalesceStream::new(self, SelectorFn::new(selector), config)
    }

    /// Like [`coalesce_with`](Self::coalesce_with), with a selector that may
    /// fail. A failure is emitted as a duration selector error and ends the
    /// stream.
    fn try_coalesce_with<F, W, X, E>(
        self,
        selector: F,
        config: CoalesceConfig,
    ) -> CoalesceStream<Self, T, TrySelectorFn<F>>
    where
        F: FnMut(&T) -> Result<W, E>,
        W: Stream<Item = StreamItem<X>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        CoalesceStream::new(self, TrySelectorFn::new(selector), config)
    }

    /// Coalesces with any [`DurationSelector`].
    fn coalesce_by<Sel>(self, selector: Sel, config: CoalesceConfig) -> CoalesceStream<Self, T, Sel>
    where
        Sel: DurationSelector<T>,
    {
        CoalesceStream::new(self, selector, config)
    }
}

impl<S, T> CoalesceExt<T> for S where S: Producer<T> {}
