// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{CoalesceError, StreamItem};

/// A materialised producer signal.
///
/// `StreamItem` covers `next` and `error`; completion has no item of its own
/// in a stream, so observers and recorders use `Notification` to see all three.
#[derive(Debug, Clone)]
pub enum Notification<T> {
    /// A value was produced
    Next(T),
    /// The producer terminated with an error
    Error(CoalesceError),
    /// The producer completed
    Complete,
}

impl<T> Notification<T> {
    /// Returns `true` for `Error` and `Complete`.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Notification::Next(_))
    }

    /// The value of a `Next` notification.
    pub fn value(self) -> Option<T> {
        match self {
            Notification::Next(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: PartialEq> PartialEq for Notification<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Notification::Next(a), Notification::Next(b)) => a == b,
            (Notification::Complete, Notification::Complete) => true,
            // Errors compare by message
            (Notification::Error(a), Notification::Error(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

impl<T> From<StreamItem<T>> for Notification<T> {
    fn from(item: StreamItem<T>) -> Self {
        match item {
            StreamItem::Value(v) => Notification::Next(v),
            StreamItem::Error(e) => Notification::Error(e),
        }
    }
}

impl<T> From<Option<StreamItem<T>>> for Notification<T> {
    fn from(item: Option<StreamItem<T>>) -> Self {
        item.map_or(Notification::Complete, Notification::from)
    }
}
