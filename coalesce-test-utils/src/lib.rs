// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the coalesce workspace.
//!
//! This crate provides channels, assertion helpers, deterministic test doubles
//! and fixtures for testing producers and the coalesce operator. It is designed
//! for use in development and testing only, not for production code.
//!
//! # Architecture
//!
//! Production code consumes producers through `Stream` combinators that take
//! `self`, while tests need to push values imperatively. Test channels bridge
//! the two: the sender stays with the test, the receiving end is a producer.
//!
//! # Key Types
//!
//! - [`ManualTickScheduler`] - a tick scheduler that only ticks when told to
//! - [`ManualTimer`] - a time source that only moves when advanced
//! - [`WindowProbe`] - counts window signals that are alive, to observe teardown
//! - [`RecordingObserver`] - an observer that records every notification
//!
//! # Examples
//!
//! ## Driving a tick clock by hand
//!
//! ```rust
//! use coalesce_runtime::TickScheduler;
//! use coalesce_test_utils::ManualTickScheduler;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! let scheduler = ManualTickScheduler::new();
//! let fired = Arc::new(AtomicBool::new(false));
//! let flag = Arc::clone(&fired);
//!
//! scheduler.request_tick(Box::new(move || flag.store(true, Ordering::SeqCst)));
//! assert!(!fired.load(Ordering::SeqCst));
//!
//! assert_eq!(scheduler.tick(), 1);
//! assert!(fired.load(Ordering::SeqCst));
//! ```
//!
//! ## Using Assertion Helpers
//!
//! ```rust
//! use coalesce_test_utils::assert_no_element_emitted;
//! use futures::stream;
//!
//! # async fn example() {
//! let mut silent = stream::pending::<i32>();
//! assert_no_element_emitted(&mut silent, 10).await;
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod manual_tick_scheduler;
pub mod manual_timer;
pub mod recording_observer;
pub mod test_data;
pub mod window_probe;

use coalesce_core::StreamItem;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use helpers::{assert_no_element_emitted, collect_ready, recv_timeout, unwrap_stream};
pub use manual_tick_scheduler::ManualTickScheduler;
pub use manual_timer::{ManualInstant, ManualTimer};
pub use recording_observer::RecordingObserver;
pub use test_data::ViewState;
pub use window_probe::{ProbedSignal, WindowProbe};

/// Creates a test channel that automatically wraps values in `StreamItem::Value`.
///
/// # Example
///
/// ```rust
/// use coalesce_test_utils::test_channel;
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (tx, mut stream) = test_channel();
///
/// tx.send(42).unwrap();
///
/// let item = stream.next().await.unwrap().unwrap(); // Option -> StreamItem -> Value
/// assert_eq!(item, 42);
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel that accepts `StreamItem<T>` for testing error propagation.
///
/// # Example
///
/// ```rust
/// use coalesce_test_utils::test_channel_with_errors;
/// use coalesce_core::{StreamItem, CoalesceError};
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (tx, mut stream) = test_channel_with_errors();
///
/// tx.send(StreamItem::Value(42)).unwrap();
/// tx.send(StreamItem::Error(CoalesceError::stream_error("test error"))).unwrap();
///
/// let value = stream.next().await.unwrap();
/// let error = stream.next().await.unwrap();
/// # }
/// ```
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}
