// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The windowing state machine behind the coalesce operator.
//!
//! The controller is either idle or windowing. A value arriving while idle
//! opens a window (one selector call, one signal) and is either released at
//! once (leading edge) or parked in the pending slot. A value arriving while
//! windowing overwrites the pending slot. When the signal yields its first item
//! or ends, the window closes and the pending value is flushed if the trailing
//! edge is enabled. Closing never reopens a window by itself.
//!
//! The emission policy is only consulted at those two transitions, which is
//! what keeps a signal that completes on its first poll from being lost or
//! handled twice.

use crate::config::CoalesceConfig;
use crate::selector::DurationSelector;
use coalesce_core::{CoalesceError, StreamItem};
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::Stream;

/// What happened to a value handed to [`WindowController::on_value`].
#[derive(Debug)]
pub enum Admission<T> {
    /// Leading edge: emit this value now.
    Emit(T),
    /// Parked in the pending slot, or dropped when no edge wants it.
    Held,
    /// The selector failed. `leading` carries the value if it was already
    /// released on the leading edge; it must be emitted before `error`.
    Failed {
        leading: Option<T>,
        error: CoalesceError,
    },
}

/// Owns the pending slot and the window signal of one pipeline.
pub struct WindowController<T, W> {
    config: CoalesceConfig,
    pending: Option<T>,
    window: Option<Pin<Box<W>>>,
}

impl<T, W> WindowController<T, W> {
    pub fn new(config: CoalesceConfig) -> Self {
        Self {
            config,
            pending: None,
            window: None,
        }
    }

    pub fn config(&self) -> CoalesceConfig {
        self.config
    }

    /// Whether a window is open.
    pub fn is_windowing(&self) -> bool {
        self.window.is_some()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Feeds one source value.
    pub fn on_value<Sel>(&mut self, value: T, selector: &mut Sel) -> Admission<T>
    where
        Sel: DurationSelector<T, Signal = W>,
    {
        if self.window.is_some() {
            self.pending = Some(value);
            return Admission::Held;
        }

        let signal = selector.select(&value);

        let released = if self.config.leading {
            Some(value)
        } else {
            self.pending = Some(value);
            None
        };

        match signal {
            Ok(signal) => {
                trace!("coalesce window opened, leading={}", released.is_some());
                self.window = Some(Box::pin(signal));
                match released {
                    Some(value) => Admission::Emit(value),
                    None => Admission::Held,
                }
            }
            Err(error) => {
                debug!("duration selector failed: {}", error);
                self.pending = None;
                Admission::Failed {
                    leading: released,
                    error,
                }
            }
        }
    }

    /// Polls the open window.
    ///
    /// Resolves when the window closes, with the value to flush on the
    /// trailing edge if any, or with a [`CoalesceError::WindowSignalError`] if
    /// the signal failed. Either way the signal has been dropped and the
    /// pending slot is empty afterwards.
    ///
    /// An idle controller returns `Poll::Pending` without registering a waker;
    /// check [`is_windowing`](Self::is_windowing) first.
    pub fn poll_window<X>(&mut self, cx: &mut Context<'_>) -> Poll<Result<Option<T>, CoalesceError>>
    where
        W: Stream<Item = StreamItem<X>>,
    {
        let Some(window) = self.window.as_mut() else {
            return Poll::Pending;
        };

        let closed = match window.as_mut().poll_next(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(Some(StreamItem::Error(error))) => Err(error),
            Poll::Ready(Some(StreamItem::Value(_)) | None) => Ok(()),
        };

        self.window = None;
        let pending = self.pending.take();

        Poll::Ready(match closed {
            Ok(()) => {
                let flushed = pending.filter(|_| self.config.trailing);
                trace!("coalesce window closed, flushing={}", flushed.is_some());
                Ok(flushed)
            }
            Err(error) => {
                debug!("window signal failed: {}", error);
                Err(CoalesceError::window_signal_error(error))
            }
        })
    }

    /// Closes any open window because the source completed, returning the
    /// value to emit before completion.
    pub fn on_source_complete(&mut self) -> Option<T> {
        self.window = None;
        let flushed = self.pending.take().filter(|_| self.config.trailing);
        trace!("source completed, flushing={}", flushed.is_some());
        flushed
    }

    /// Drops the window and the pending value without emitting anything.
    pub fn teardown(&mut self) {
        self.window = None;
        self.pending = None;
    }
}

impl<T, W> core::fmt::Debug for WindowController<T, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowController")
            .field("config", &self.config)
            .field("windowing", &self.is_windowing())
            .field("pending", &self.has_pending())
            .finish()
    }
}
