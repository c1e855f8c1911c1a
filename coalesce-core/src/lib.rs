// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types shared by every coalesce crate.
//!
//! - [`StreamItem`] and [`Producer`] - the next/error/complete contract expressed as a stream
//! - [`Notification`] and [`Observer`] - the push-side view of the same contract
//! - [`CoalesceError`] - the error taxonomy carried by `StreamItem::Error`
//! - [`CancellationToken`] and [`CoalesceTask`] - cooperative cancellation for driven producers
//! - [`Subject`] - a hot producer that fans values out to independent subscribers

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod cancellation_token;
pub mod coalesce_error;
pub mod coalesce_task;
pub mod notification;
pub mod observer;
pub mod producer;
pub mod stream_item;
pub mod subject;
pub mod subject_error;

pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::coalesce_error::{CoalesceError, Result};
pub use self::coalesce_task::CoalesceTask;
pub use self::notification::Notification;
pub use self::observer::Observer;
pub use self::producer::Producer;
pub use self::stream_item::StreamItem;
pub use self::subject::Subject;
pub use self::subject_error::SubjectError;
