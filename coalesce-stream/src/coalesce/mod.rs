// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The coalesce operator.
//!
//! Emits at most one value per window. A window opens when a value arrives and
//! none is open; it closes when the signal chosen for that value yields its
//! first item or ends. [`CoalesceConfig`](crate::CoalesceConfig) picks which
//! edges of a window reach downstream:
//!
//! - leading: the value that opened the window, emitted immediately
//! - trailing: the latest value seen while the window was open, emitted when
//!   it closes
//!
//! Source completion flushes a pending trailing value before completing.
//! Source errors, selector failures and window signal errors end the stream
//! with an error and discard the pending value.
//!
//! # Example
//!
//! ```rust
//! use coalesce_core::StreamItem;
//! use coalesce_stream::{signal, CoalesceConfig, CoalesceExt};
//! use futures::{executor::block_on, stream, StreamExt};
//!
//! // A synchronous burst collapses into its last value.
//! let burst = stream::iter([1, 2, 3, 4].map(StreamItem::Value));
//! let coalesced = burst.coalesce_with(|_| signal::never(), CoalesceConfig::TRAILING);
//!
//! let values: Vec<_> = block_on(coalesced.collect());
//! assert_eq!(values, vec![StreamItem::Value(4)]);
//! ```

mod coalesce_ext;
mod coalesce_stream;
mod operator;

pub use coalesce_ext::CoalesceExt;
pub use coalesce_stream::CoalesceStream;
pub use operator::Coalesce;
