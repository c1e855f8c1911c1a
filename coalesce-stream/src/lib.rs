// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Temporal coalescing for producers of [`StreamItem`](coalesce_core::StreamItem).
//!
//! The coalesce operator emits at most one value per window, where each
//! window's length is decided per value by a window signal. It generalises a
//! throttle: instead of a fixed duration, the silence period is any producer,
//! and the leading and trailing edges of a window can be observed
//! independently.
//!
//! # Overview
//!
//! - **[`CoalesceExt`]** - `.coalesce(config)`, `.coalesce_with(selector, config)` and friends
//! - **[`Coalesce`]** - a reusable operator value, applied to any number of sources
//! - **[`CoalesceConfig`]** - which window edges are emitted
//! - **[`DurationSelector`]** - computes the window signal for a value
//! - **[`TickClock`]** - per-tick elapsed time, the default window signal
//! - **[`signal`]** - ready-made window signals
//! - **[`WindowController`]** - the windowing state machine, usable on its own
//!
//! # Runtime Support
//!
//! - `runtime-tokio` (default) - the shared [`TickClock`], the default next-tick
//!   selector and Tokio timer signals
//! - `tracing` - window and teardown events through `tracing`
//!
//! # Example
//!
//! ```rust,no_run
//! use coalesce_core::StreamItem;
//! use coalesce_stream::prelude::*;
//! use futures::channel::mpsc;
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (tx, rx) = mpsc::unbounded::<u32>();
//!
//! // At most one render per frame, always with the latest state.
//! let mut renders = rx.map(StreamItem::Value).coalesce(CoalesceConfig::default());
//!
//! tx.unbounded_send(1).unwrap();
//! tx.unbounded_send(2).unwrap();
//! tx.unbounded_send(3).unwrap();
//!
//! assert_eq!(renders.next().await, Some(StreamItem::Value(3)));
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

mod coalesce;
mod config;
pub mod selector;
pub mod signal;
pub mod tick_clock;
pub mod window_controller;

pub mod prelude;

pub use coalesce::{Coalesce, CoalesceExt, CoalesceStream};
pub use config::CoalesceConfig;
pub use selector::{DurationSelector, NextTick, SelectorFn, TrySelectorFn};
pub use tick_clock::{TickClock, Ticks};
pub use window_controller::{Admission, WindowController};

#[cfg(feature = "runtime-tokio")]
pub use selector::DefaultNextTick;
#[cfg(feature = "runtime-tokio")]
pub use tick_clock::DefaultTickClock;
