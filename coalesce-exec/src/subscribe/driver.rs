// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::pin::Pin;
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::{Context, Poll};
use coalesce_core::{CancellationToken, Notification, Observer, StreamItem};
use event_listener::Event;
use futures::future::{poll_fn, select, Either};
use futures::{pin_mut, Stream};
use parking_lot::Mutex;
use std::sync::Arc;

/// Type-erased half of a driver that a [`Subscription`](crate::Subscription) holds.
pub(crate) trait Teardown: Send + Sync {
    /// Drop the producer and the observer. Returns `true` for the call that closed it.
    fn close(&self) -> bool;

    fn is_closed(&self) -> bool;

    fn terminated(&self) -> &Event;
}

/// Shared state between a subscription handle and the task pulling its producer.
///
/// The producer and the observer sit behind separate locks so that an observer
/// may unsubscribe from inside a callback.
pub(crate) struct Driver<S, O> {
    stream: Mutex<Option<Pin<Box<S>>>>,
    observer: Mutex<Option<O>>,
    closed: AtomicBool,
    terminated: Event,
}

impl<S, O> Driver<S, O> {
    pub(crate) fn new(stream: S, observer: O) -> Self {
        Self {
            stream: Mutex::new(Some(Box::pin(stream))),
            observer: Mutex::new(Some(observer)),
            closed: AtomicBool::new(false),
            terminated: Event::new(),
        }
    }
}

impl<S, O, T> Driver<S, O>
where
    S: Stream<Item = StreamItem<T>>,
    O: Observer<T>,
{
    /// Pull the producer until it terminates or `cancel` fires.
    pub(crate) async fn run(self: Arc<Self>, cancel: CancellationToken) {
        loop {
            let next = {
                let cancelled = cancel.cancelled();
                let pull = poll_fn(|cx| self.poll_source(cx));
                pin_mut!(cancelled, pull);

                match select(cancelled, pull).await {
                    Either::Left(_) => {
                        trace!("subscription driver cancelled");
                        self.observer.lock().take();
                        return;
                    }
                    Either::Right((item, _)) => item,
                }
            };

            match next {
                Some(StreamItem::Value(value)) => {
                    if !self.deliver(value) {
                        return;
                    }
                }
                Some(StreamItem::Error(error)) => {
                    debug!("subscription terminated with error: {}", error);
                    self.finish(Notification::Error(error));
                    return;
                }
                None => {
                    debug!("subscription completed");
                    self.finish(Notification::Complete);
                    return;
                }
            }
        }
    }

    fn poll_source(&self, cx: &mut Context<'_>) -> Poll<Option<StreamItem<T>>> {
        match self.stream.lock().as_mut() {
            Some(stream) => stream.as_mut().poll_next(cx),
            // Closed; the cancellation branch resolves the driver.
            None => Poll::Pending,
        }
    }

    /// Returns `false` once the subscription is closed.
    fn deliver(&self, value: T) -> bool {
        let mut observer = self.observer.lock();
        if self.closed.load(Ordering::Acquire) {
            observer.take();
            return false;
        }

        if let Some(observer) = observer.as_mut() {
            observer.on_next(value);
        }

        // The callback may have unsubscribed.
        if self.closed.load(Ordering::Acquire) {
            observer.take();
            return false;
        }
        true
    }

    fn finish(&self, notification: Notification<T>) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        // Release the producer before the terminal signal is observed.
        let stream = self.stream.lock().take();
        drop(stream);

        let observer = self.observer.lock().take();
        if let Some(mut observer) = observer {
            observer.notify(notification);
        }
        self.terminated.notify(usize::MAX);
    }
}

impl<S, O> Teardown for Driver<S, O>
where
    S: Send,
    O: Send,
{
    fn close(&self) -> bool {
        if self.closed.swap(true, Ordering::AcqRel) {
            return false;
        }

        let stream = self.stream.lock().take();
        drop(stream);

        // Held only while a notification is in flight; the delivering side drops it then.
        if let Some(mut observer) = self.observer.try_lock() {
            observer.take();
        }

        self.terminated.notify(usize::MAX);
        true
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn terminated(&self) -> &Event {
        &self.terminated
    }
}
