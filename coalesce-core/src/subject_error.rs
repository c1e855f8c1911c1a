// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Errors raised by [`Subject`](crate::Subject) lifecycle misuse.
///
/// Distinct from [`CoalesceError`](crate::CoalesceError): these are returned to
/// the caller pushing into the subject, never sent downstream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubjectError {
    /// The subject has been closed and cannot accept new items or subscribers.
    #[error("Subject is closed")]
    Closed,
}
