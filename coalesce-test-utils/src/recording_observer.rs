// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use coalesce_core::{CoalesceError, Notification, Observer};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// An [`Observer`] that records every notification it receives.
///
/// Clones share the same log, so a test can hand one clone to a subscription
/// and inspect another.
pub struct RecordingObserver<T> {
    log: Arc<Mutex<Vec<Notification<T>>>>,
}

impl<T> RecordingObserver<T> {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn len(&self) -> usize {
        self.log.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.lock().is_empty()
    }

    /// Whether an error or completion has been recorded.
    pub fn is_terminated(&self) -> bool {
        self.log.lock().iter().any(Notification::is_terminal)
    }
}

impl<T: Clone> RecordingObserver<T> {
    pub fn notifications(&self) -> Vec<Notification<T>> {
        self.log.lock().clone()
    }

    pub fn values(&self) -> Vec<T> {
        self.log
            .lock()
            .iter()
            .filter_map(|n| n.clone().value())
            .collect()
    }
}

impl<T> Default for RecordingObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RecordingObserver<T> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RecordingObserver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordingObserver")
            .field(&*self.log.lock())
            .finish()
    }
}

impl<T> Observer<T> for RecordingObserver<T> {
    fn on_next(&mut self, value: T) {
        self.log.lock().push(Notification::Next(value));
    }

    fn on_error(&mut self, error: CoalesceError) {
        self.log.lock().push(Notification::Error(error));
    }

    fn on_complete(&mut self) {
        self.log.lock().push(Notification::Complete);
    }
}
