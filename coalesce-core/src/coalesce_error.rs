// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for coalescing pipelines.
//!
//! Every failure that reaches a downstream consumer travels as
//! [`StreamItem::Error`](crate::StreamItem::Error) and terminates the pipeline.
//! The variants tell the consumer where the failure originated:
//!
//! - a duration selector that failed to produce a window ([`CoalesceError::DurationSelectorError`])
//! - a window signal that errored while a window was open ([`CoalesceError::WindowSignalError`])
//! - the source itself, forwarded unchanged
//!
//! # Examples
//!
//! ```
//! use coalesce_core::{CoalesceError, Result};
//!
//! fn open_window() -> Result<()> {
//!     Err(CoalesceError::stream_error("window source not ready"))
//! }
//!
//! assert!(open_window().is_err());
//! ```

/// Root error type for all coalesce operations
#[derive(Debug, thiserror::Error)]
pub enum CoalesceError {
    /// Stream processing encountered an error
    ///
    /// The general-purpose variant, and the one sources typically send.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// Custom error from user code
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The duration selector failed while opening a window
    ///
    /// No window is opened; the pipeline terminates.
    #[error("Duration selector error: {0}")]
    DurationSelectorError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The window signal producer errored while its window was open
    #[error("Window signal error: {source}")]
    WindowSignalError {
        /// The error the window signal produced
        source: Box<CoalesceError>,
    },
}

impl CoalesceError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Wrap a failure raised by a duration selector
    pub fn selector_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::DurationSelectorError(Box::new(error))
    }

    /// Wrap an error emitted by a window signal
    pub fn window_signal_error(error: CoalesceError) -> Self {
        Self::WindowSignalError {
            source: Box::new(error),
        }
    }

    /// Returns `true` if the error was raised by a duration selector.
    #[must_use]
    pub const fn is_selector_error(&self) -> bool {
        matches!(self, Self::DurationSelectorError(_))
    }

    /// Returns `true` if the error was raised by a window signal.
    #[must_use]
    pub const fn is_window_signal_error(&self) -> bool {
        matches!(self, Self::WindowSignalError { .. })
    }
}

/// Specialized Result type for coalesce operations
pub type Result<T> = std::result::Result<T, CoalesceError>;

impl Clone for CoalesceError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // Boxed errors can't be cloned, keep their message
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {e}"),
            },
            Self::DurationSelectorError(e) => Self::StreamProcessingError {
                context: format!("Duration selector error: {e}"),
            },
            Self::WindowSignalError { source } => Self::WindowSignalError {
                source: source.clone(),
            },
        }
    }
}
