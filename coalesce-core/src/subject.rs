// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber producer.
//!
//! A [`Subject`] broadcasts each [`StreamItem<T>`] to all current subscribers.
//! Every subscriber gets its own producer, so operators applied to different
//! subscriptions never share state.
//!
//! - **Hot**: late subscribers only see items sent after they subscribed.
//! - **Unbounded**: no backpressure.
//! - **Cheap to clone**: all clones share the same subscriber list.
//! - **Terminal**: `error` and `close` end every subscriber's producer.
//!
//! ## Example
//!
//! ```
//! use coalesce_core::{StreamItem, Subject};
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = Subject::<i32>::new();
//! let mut first = subject.subscribe().unwrap();
//! let mut second = subject.subscribe().unwrap();
//!
//! subject.next(1).unwrap();
//! subject.close();
//!
//! assert_eq!(first.next().await, Some(StreamItem::Value(1)));
//! assert_eq!(second.next().await, Some(StreamItem::Value(1)));
//! assert_eq!(first.next().await, None);
//! # }
//! ```

use crate::{CoalesceError, StreamItem, SubjectError};
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::stream::{FusedStream, Stream};
use parking_lot::Mutex;
use std::sync::Arc;

struct SubjectState<T> {
    closed: bool,
    senders: Vec<UnboundedSender<StreamItem<T>>>,
}

/// A hot subject that broadcasts items to every live subscriber.
pub struct Subject<T: Clone> {
    state: Arc<Mutex<SubjectState<T>>>,
}

/// One subscriber's view of a [`Subject`].
///
/// Dropping it unsubscribes; the subject prunes it on the next send.
pub struct SubjectStream<T> {
    rx: UnboundedReceiver<StreamItem<T>>,
}

impl<T: Clone> Subject<T> {
    /// Creates an open subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                closed: false,
                senders: Vec::new(),
            })),
        }
    }

    /// Subscribe to items sent from now on.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn subscribe(&self) -> Result<SubjectStream<T>, SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        let (tx, rx) = mpsc::unbounded();
        state.senders.push(tx);
        Ok(SubjectStream { rx })
    }

    /// Send an item to all live subscribers.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn send(&self, item: StreamItem<T>) -> Result<(), SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        let before = state.senders.len();
        state
            .senders
            .retain(|tx| tx.unbounded_send(item.clone()).is_ok());
        if state.senders.len() != before {
            trace!("subject pruned {} dropped subscribers", before - state.senders.len());
        }
        Ok(())
    }

    /// Send a value to all live subscribers.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn next(&self, value: T) -> Result<(), SubjectError> {
        self.send(StreamItem::Value(value))
    }

    /// Send an error to all subscribers and close the subject.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject was already closed.
    pub fn error(&self, err: CoalesceError) -> Result<(), SubjectError> {
        let result = self.send(StreamItem::Error(err));
        self.close();
        result
    }

    /// Complete every subscriber. Idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.senders.clear();
    }

    /// Returns `true` once the subject has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of subscribers still registered.
    ///
    /// Dropped subscribers are only pruned on the next send.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().senders.len()
    }
}

impl<T: Clone> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Stream for SubjectStream<T> {
    type Item = StreamItem<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}

impl<T> FusedStream for SubjectStream<T> {
    fn is_terminated(&self) -> bool {
        self.rx.is_terminated()
    }
}
