// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Background task handle with cooperative cancellation.

use crate::CancellationToken;
#[cfg(feature = "runtime-tokio")]
use core::future::Future;

/// Handle to a spawned background task that is cancelled when dropped.
///
/// The spawned future receives a [`CancellationToken`] and is expected to
/// stop at its next checkpoint once the token fires. The task is never
/// aborted forcibly.
///
/// ```rust
/// use coalesce_core::CoalesceTask;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = CoalesceTask::spawn(|cancel| async move {
///     cancel.cancelled().await;
/// });
///
/// assert!(!task.is_cancelled());
/// drop(task);
/// # }
/// ```
#[derive(Debug)]
pub struct CoalesceTask {
    cancel: CancellationToken,
}

impl CoalesceTask {
    /// Spawn `f` on the configured runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    #[cfg(feature = "runtime-tokio")]
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let future = f(cancel.clone());

        trace!("spawning coalesce task");
        tokio::spawn(future);

        Self { cancel }
    }

    /// Wrap an already spawned task that watches `cancel`.
    ///
    /// Lets callers bring their own executor while keeping cancel-on-drop.
    pub fn from_token(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    /// Signal the task to stop. Does not wait for it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns `true` once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// A handle to the token the task observes.
    pub fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

impl Drop for CoalesceTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
