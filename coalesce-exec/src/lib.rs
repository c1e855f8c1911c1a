// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Push-style consumption of coalesce producers.
//!
//! A producer is a pull-based `Stream<Item = StreamItem<T>>`. [`SubscribeExt::subscribe`]
//! turns it into the push contract: a background task drives the stream and
//! forwards every signal to an [`Observer`](coalesce_core::Observer), and the
//! returned [`Subscription`] stops it.
//!
//! ```rust
//! use coalesce_core::{Notification, StreamItem};
//! use coalesce_exec::SubscribeExt;
//! use futures::stream;
//! use std::sync::{Arc, Mutex};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let log = seen.clone();
//!
//! let subscription = stream::iter(vec![StreamItem::Value(1), StreamItem::Value(2)])
//!     .subscribe(move |n: Notification<i32>| log.lock().unwrap().push(n));
//!
//! subscription.closed().await;
//! assert_eq!(
//!     *seen.lock().unwrap(),
//!     vec![Notification::Next(1), Notification::Next(2), Notification::Complete]
//! );
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod subscribe;
pub mod subscription;

pub use subscribe::SubscribeExt;
pub use subscription::Subscription;
