// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension methods turning a tokio `UnboundedReceiver` into a producer.

use coalesce_core::StreamItem;
use futures::stream::{Map, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Producer returned by [`UnboundedReceiverExt::into_producer`].
pub type ReceiverProducer<T> = Map<UnboundedReceiverStream<T>, fn(T) -> StreamItem<T>>;

/// Extension trait for `UnboundedReceiver` to create producers.
pub trait UnboundedReceiverExt<T> {
    /// Wrap every received value in `StreamItem::Value`.
    ///
    /// The producer completes once every sender is dropped. Dropping the
    /// producer closes the channel, so senders observe an unsubscribe.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coalesce_rx::prelude::*;
    /// use tokio::sync::mpsc;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let (tx, rx) = mpsc::unbounded_channel::<u32>();
    /// let renders = rx
    ///     .into_producer()
    ///     .coalesce_with(|_| signal::never(), CoalesceConfig::TRAILING);
    ///
    /// drop(renders);
    /// assert!(tx.is_closed());
    /// # }
    /// ```
    fn into_producer(self) -> ReceiverProducer<T>;
}

impl<T> UnboundedReceiverExt<T> for mpsc::UnboundedReceiver<T> {
    fn into_producer(self) -> ReceiverProducer<T> {
        UnboundedReceiverStream::new(self).map(StreamItem::Value as fn(T) -> StreamItem<T>)
    }
}
