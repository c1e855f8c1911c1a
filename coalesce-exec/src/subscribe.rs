// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub(crate) mod driver;

use crate::Subscription;
use coalesce_core::{CancellationToken, CoalesceTask, Observer, Producer};
use driver::Driver;
use futures::future::BoxFuture;
use std::sync::Arc;

/// Extension trait attaching an [`Observer`] to any producer.
///
/// The observer receives `on_next` for every value and then exactly one of
/// `on_error` or `on_complete`, unless the subscription is cancelled first,
/// in which case it receives nothing further. The producer is released
/// before the terminal callback runs.
pub trait SubscribeExt<T>: Producer<T> + Sized {
    /// Drive the producer on the Tokio runtime and push its signals to `observer`.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coalesce_core::{Notification, StreamItem};
    /// use coalesce_exec::SubscribeExt;
    /// use futures::stream;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let subscription = stream::pending::<StreamItem<u32>>()
    ///     .subscribe(|n: Notification<u32>| panic!("unexpected {n:?}"));
    ///
    /// subscription.unsubscribe();
    /// subscription.unsubscribe();
    /// assert!(subscription.is_closed());
    /// # }
    /// ```
    #[cfg(feature = "runtime-tokio")]
    fn subscribe<O>(self, observer: O) -> Subscription
    where
        Self: Send + 'static,
        O: Observer<T> + Send + 'static,
        T: Send + 'static,
    {
        let driver = Arc::new(Driver::new(self, observer));
        let runner = Arc::clone(&driver);
        let task = CoalesceTask::spawn(move |cancel| runner.run(cancel));
        Subscription::new(driver, task)
    }

    /// Like [`subscribe`](SubscribeExt::subscribe), handing the driver future
    /// to `spawn` instead of Tokio.
    ///
    /// The future finishes on its own once the producer terminates or the
    /// subscription is cancelled.
    fn subscribe_with<O, Sp>(self, observer: O, spawn: Sp) -> Subscription
    where
        Self: Send + 'static,
        O: Observer<T> + Send + 'static,
        T: Send + 'static,
        Sp: FnOnce(BoxFuture<'static, ()>),
    {
        let driver = Arc::new(Driver::new(self, observer));
        let cancel = CancellationToken::new();
        spawn(Box::pin(Arc::clone(&driver).run(cancel.clone())));
        Subscription::new(driver, CoalesceTask::from_token(cancel))
    }
}

impl<S, T> SubscribeExt<T> for S where S: Producer<T> {}
