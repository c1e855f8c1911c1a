// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The capability contract every coalesce component is built on.
//!
//! A producer is a stream of [`StreamItem`]s:
//!
//! | Signal        | Stream form                        |
//! |---------------|------------------------------------|
//! | `next(v)`     | `Some(StreamItem::Value(v))`       |
//! | `error(e)`    | `Some(StreamItem::Error(e))`       |
//! | `complete()`  | `None`                             |
//! | subscribe     | start polling                      |
//! | unsubscribe   | drop the stream                    |
//!
//! Dropping is naturally idempotent, and it releases everything the producer
//! owns (upstream producers, pending timers) synchronously.

use crate::StreamItem;
use futures::Stream;

/// A stream of values and errors, terminated by completion.
///
/// Blanket-implemented for every `Stream<Item = StreamItem<T>>`. The operator
/// and subscription extension traits are implemented for every `Producer`.
pub trait Producer<T>: Stream<Item = StreamItem<T>> {}

impl<S, T> Producer<T> for S where S: Stream<Item = StreamItem<T>> {}
