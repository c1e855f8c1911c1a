// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Coalesce
//!
//! Temporal coalescing for async streams.
//!
//! ## Overview
//!
//! `coalesce` emits at most one value per window, where each window is opened
//! by an incoming value and closed by a signal computed from that value. Which
//! edge of a window is observable is configurable: the value that opened it
//! (leading), the latest value seen while it was open (trailing), both or
//! neither. With no selector given, a window lasts until the next frame of a
//! shared tick clock, so a burst of state updates renders once per frame.
//!
//! ## Crates
//!
//! - `coalesce-core` - the producer contract: [`StreamItem`], [`Notification`], [`Observer`], [`CoalesceError`]
//! - `coalesce-runtime` - [`Timer`], [`TickScheduler`] and the runtime-driven [`FrameScheduler`]
//! - `coalesce-stream` - the operator, its window controller, the [`TickClock`] and window [`signal`]s
//! - `coalesce-exec` - push-style [`Subscription`]s with synchronous unsubscribe
//!
//! ## Quick Start
//!
//! ```rust
//! use coalesce_rx::prelude::*;
//! use std::time::Duration;
//! use tokio::sync::mpsc;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let (tx, rx) = mpsc::unbounded_channel::<u32>();
//! let seen = RecordingLog::default();
//!
//! let subscription = rx
//!     .into_producer()
//!     .coalesce_with(
//!         |_| signal::timer(Duration::from_millis(50)),
//!         CoalesceConfig::LEADING_AND_TRAILING,
//!     )
//!     .subscribe(seen.clone());
//!
//! for value in 1..=5 {
//!     tx.send(value).unwrap();
//! }
//! drop(tx);
//!
//! subscription.closed().await;
//! assert_eq!(
//!     seen.take(),
//!     vec![Notification::Next(1), Notification::Next(5), Notification::Complete]
//! );
//! # }
//! #
//! # #[derive(Clone, Default)]
//! # struct RecordingLog(std::sync::Arc<std::sync::Mutex<Vec<Notification<u32>>>>);
//! # impl RecordingLog {
//! #     fn take(&self) -> Vec<Notification<u32>> { std::mem::take(&mut *self.0.lock().unwrap()) }
//! # }
//! # impl Observer<u32> for RecordingLog {
//! #     fn on_next(&mut self, v: u32) { self.0.lock().unwrap().push(Notification::Next(v)); }
//! #     fn on_error(&mut self, e: CoalesceError) { self.0.lock().unwrap().push(Notification::Error(e)); }
//! #     fn on_complete(&mut self) { self.0.lock().unwrap().push(Notification::Complete); }
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "runtime-tokio")]
pub mod receiver_ext;

pub use coalesce_core::{
    CancellationToken, CoalesceError, CoalesceTask, Notification, Observer, Producer, StreamItem,
    Subject, SubjectError,
};
pub use coalesce_exec::{SubscribeExt, Subscription};
pub use coalesce_runtime::{FrameScheduler, Runtime, TickScheduler, TickToken, Timer};
pub use coalesce_stream::{
    signal, Admission, Coalesce, CoalesceConfig, CoalesceExt, CoalesceStream, DurationSelector,
    NextTick, SelectorFn, TickClock, Ticks, TrySelectorFn, WindowController,
};

#[cfg(feature = "runtime-tokio")]
pub use coalesce_runtime::impls::tokio::{TokioRuntime, TokioTimer};
#[cfg(feature = "runtime-tokio")]
pub use coalesce_stream::{DefaultNextTick, DefaultTickClock};
#[cfg(feature = "runtime-tokio")]
pub use receiver_ext::{ReceiverProducer, UnboundedReceiverExt};

/// Prelude module for convenient imports
pub mod prelude {
    pub use coalesce_core::{CoalesceError, Notification, Observer, StreamItem};
    pub use coalesce_exec::{SubscribeExt, Subscription};
    pub use coalesce_stream::prelude::*;

    #[cfg(feature = "runtime-tokio")]
    pub use crate::receiver_ext::UnboundedReceiverExt;
}
