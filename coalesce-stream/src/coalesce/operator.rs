// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::coalesce_stream::CoalesceStream;
use crate::config::CoalesceConfig;
use crate::selector::{DurationSelector, NextTick, SelectorFn, TrySelectorFn};
use crate::tick_clock::TickClock;
use coalesce_core::StreamItem;
use coalesce_runtime::{TickScheduler, Timer};
use futures::stream::Stream;

#[cfg(feature = "runtime-tokio")]
use crate::selector::DefaultNextTick;

/// A reusable coalesce operator: a selector plus a config.
///
/// [`apply`](Self::apply) turns a producer into a coalesced producer and can be
/// called any number of times. Each application gets its own copy of the
/// selector and its own window state, so pipelines built from the same
/// operator never suppress each other.
///
/// ```rust
/// use coalesce_core::StreamItem;
/// use coalesce_stream::{signal, Coalesce, CoalesceConfig};
/// use futures::{executor::block_on, stream, StreamExt};
///
/// let operator = Coalesce::new(|_: &u32| signal::never(), CoalesceConfig::LEADING);
///
/// let source = stream::iter([1, 2, 3].map(StreamItem::Value));
/// let values: Vec<_> = block_on(operator.apply(source).collect());
///
/// assert_eq!(values, vec![StreamItem::Value(1)]);
/// ```
#[derive(Clone, Debug)]
pub struct Coalesce<Sel> {
    selector: Sel,
    config: CoalesceConfig,
}

impl<Sel> Coalesce<Sel> {
    /// An operator using any [`DurationSelector`].
    pub fn with_selector(selector: Sel, config: CoalesceConfig) -> Self {
        Self { selector, config }
    }

    pub fn config(&self) -> CoalesceConfig {
        self.config
    }

    pub fn apply<S, T>(&self, source: S) -> CoalesceStream<S, T, Sel>
    where
        S: Stream<Item = StreamItem<T>>,
        Sel: DurationSelector<T> + Clone,
    {
        CoalesceStream::new(source, self.selector.clone(), self.config)
    }
}

impl<F> Coalesce<SelectorFn<F>> {
    /// An operator whose windows come from `selector`.
    pub fn new<T, W, X>(selector: F, config: CoalesceConfig) -> Self
    where
        F: FnMut(&T) -> W,
        W: Stream<Item = StreamItem<X>>,
    {
        Self::with_selector(SelectorFn::new(selector), config)
    }
}

impl<F> Coalesce<TrySelectorFn<F>> {
    /// An operator whose selector may fail; a failure ends the pipeline with
    /// a duration selector error.
    pub fn fallible<T, W, X, E>(selector: F, config: CoalesceConfig) -> Self
    where
        F: FnMut(&T) -> Result<W, E>,
        W: Stream<Item = StreamItem<X>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::with_selector(TrySelectorFn::new(selector), config)
    }
}

impl<Tm: Timer, Sch: TickScheduler> Coalesce<NextTick<Tm, Sch>> {
    /// An operator whose windows last until the next tick of `clock`.
    pub fn on_ticks_of(clock: &TickClock<Tm, Sch>, config: CoalesceConfig) -> Self {
        Self::with_selector(NextTick::new(clock.clone()), config)
    }
}

#[cfg(feature = "runtime-tokio")]
impl Coalesce<DefaultNextTick> {
    /// An operator whose windows last until the next tick of the shared clock.
    pub fn on_next_tick(config: CoalesceConfig) -> Self {
        Self::with_selector(NextTick::shared(), config)
    }
}

#[cfg(feature = "runtime-tokio")]
impl Default for Coalesce<DefaultNextTick> {
    fn default() -> Self {
        Self::on_next_tick(CoalesceConfig::default())
    }
}
