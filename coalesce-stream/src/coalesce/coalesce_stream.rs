// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::CoalesceConfig;
use crate::selector::DurationSelector;
use crate::window_controller::{Admission, WindowController};
use coalesce_core::{CoalesceError, StreamItem};
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::{FusedStream, Stream};
use pin_project::pin_project;

/// Stream returned by the coalesce operator.
///
/// Owns the source, the selector and one [`WindowController`]. On completion
/// or error the source and any open window are dropped before the terminal
/// item is returned, and the stream yields `None` from then on. Dropping it
/// drops both at once.
#[pin_project]
pub struct CoalesceStream<S, T, Sel>
where
    Sel: DurationSelector<T>,
{
    #[pin]
    source: Option<S>,
    selector: Sel,
    controller: WindowController<T, Sel::Signal>,
    terminal: Option<CoalesceError>,
    // Set once `None` has been returned
    done: bool,
}

impl<S, T, Sel> CoalesceStream<S, T, Sel>
where
    S: Stream<Item = StreamItem<T>>,
    Sel: DurationSelector<T>,
{
    pub fn new(source: S, selector: Sel, config: CoalesceConfig) -> Self {
        Self {
            source: Some(source),
            selector,
            controller: WindowController::new(config),
            terminal: None,
            done: false,
        }
    }

    pub fn config(&self) -> CoalesceConfig {
        self.controller.config()
    }

    /// Whether a window is currently open.
    pub fn is_windowing(&self) -> bool {
        self.controller.is_windowing()
    }
}

impl<S, T, Sel> Stream for CoalesceStream<S, T, Sel>
where
    S: Stream<Item = StreamItem<T>>,
    Sel: DurationSelector<T>,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(error) = this.terminal.take() {
                return Poll::Ready(Some(StreamItem::Error(error)));
            }

            // 1. Close the window first so a later value opens a new one
            if this.controller.is_windowing() {
                match this.controller.poll_window(cx) {
                    Poll::Ready(Ok(Some(value))) => {
                        return Poll::Ready(Some(StreamItem::Value(value)));
                    }
                    Poll::Ready(Ok(None)) | Poll::Pending => {}
                    Poll::Ready(Err(error)) => {
                        this.source.set(None);
                        this.controller.teardown();
                        return Poll::Ready(Some(StreamItem::Error(error)));
                    }
                }
            }

            // 2. Poll source
            let Some(source) = this.source.as_mut().as_pin_mut() else {
                *this.done = true;
                return Poll::Ready(None);
            };

            match source.poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    match this.controller.on_value(value, this.selector) {
                        Admission::Emit(value) => {
                            return Poll::Ready(Some(StreamItem::Value(value)));
                        }
                        // A fresh window may already be closed, poll it before the source
                        Admission::Held => continue,
                        Admission::Failed { leading, error } => {
                            this.source.set(None);
                            this.controller.teardown();
                            return match leading {
                                Some(value) => {
                                    *this.terminal = Some(error);
                                    Poll::Ready(Some(StreamItem::Value(value)))
                                }
                                None => Poll::Ready(Some(StreamItem::Error(error))),
                            };
                        }
                    }
                }
                Poll::Ready(Some(StreamItem::Error(error))) => {
                    debug!("coalesce source failed: {}", error);
                    this.source.set(None);
                    this.controller.teardown();
                    return Poll::Ready(Some(StreamItem::Error(error)));
                }
                Poll::Ready(None) => {
                    let flushed = this.controller.on_source_complete();
                    this.source.set(None);
                    if flushed.is_none() {
                        *this.done = true;
                    }
                    return Poll::Ready(flushed.map(StreamItem::Value));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

impl<S, T, Sel> FusedStream for CoalesceStream<S, T, Sel>
where
    S: Stream<Item = StreamItem<T>>,
    Sel: DurationSelector<T>,
{
    fn is_terminated(&self) -> bool {
        self.done
    }
}
