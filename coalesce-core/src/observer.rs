// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{CoalesceError, Notification};

/// Push-side consumer of a producer.
///
/// Receives zero or more `on_next` calls followed by at most one of
/// `on_error` or `on_complete`. Nothing is delivered after a terminal call,
/// and nothing at all after the subscription has been cancelled.
pub trait Observer<T> {
    /// Called for every value.
    fn on_next(&mut self, value: T);

    /// Called once if the producer terminates with an error.
    ///
    /// Required: this is the only path a pipeline failure takes.
    fn on_error(&mut self, error: CoalesceError);

    /// Called once if the producer completes.
    fn on_complete(&mut self) {}

    /// Dispatch a materialised notification to the matching callback.
    fn notify(&mut self, notification: Notification<T>) {
        match notification {
            Notification::Next(v) => self.on_next(v),
            Notification::Error(e) => self.on_error(e),
            Notification::Complete => self.on_complete(),
        }
    }
}

/// Any `FnMut(Notification<T>)` closure observes every signal.
impl<T, F> Observer<T> for F
where
    F: FnMut(Notification<T>),
{
    fn on_next(&mut self, value: T) {
        self(Notification::Next(value));
    }

    fn on_error(&mut self, error: CoalesceError) {
        self(Notification::Error(error));
    }

    fn on_complete(&mut self) {
        self(Notification::Complete);
    }
}
