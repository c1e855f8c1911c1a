// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::subscribe::driver::Teardown;
use coalesce_core::CoalesceTask;
use core::fmt;
use std::sync::Arc;

/// Handle to a running subscription.
///
/// Unsubscribing drops the producer, and with it every upstream source and
/// open window, before returning. No notification is started afterwards; one
/// already being delivered on another thread runs to the end. Unsubscribing is
/// idempotent and also happens when the handle is dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    driver: Arc<dyn Teardown>,
    task: CoalesceTask,
}

impl Subscription {
    pub(crate) fn new(driver: Arc<dyn Teardown>, task: CoalesceTask) -> Self {
        Self { driver, task }
    }

    /// Stop the subscription. Calling it again, or after the producer
    /// terminated, has no effect.
    pub fn unsubscribe(&self) {
        self.task.cancel();
        if self.driver.close() {
            debug!("unsubscribed");
        }
    }

    /// `true` once the producer completed, failed or was unsubscribed.
    pub fn is_closed(&self) -> bool {
        self.driver.is_closed()
    }

    /// Wait until the subscription is closed by any cause.
    pub async fn closed(&self) {
        loop {
            if self.is_closed() {
                return;
            }

            let listener = self.driver.terminated().listen();

            if self.is_closed() {
                return;
            }
            listener.await;
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
