// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Which edges of a window are observable downstream.
///
/// - `leading`: the value that opens a window is emitted immediately.
/// - `trailing`: the latest value buffered while the window was open is
///   emitted when the window closes, or when the source completes first.
///
/// Every combination is valid. With both edges disabled the operator emits no
/// values at all but still forwards errors and completion.
///
/// The default is trailing only: one emission per window, carrying the most
/// recent value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CoalesceConfig {
    pub leading: bool,
    pub trailing: bool,
}

impl CoalesceConfig {
    /// Emit the value that opens each window, drop everything else.
    pub const LEADING: Self = Self::new(true, false);

    /// Emit the latest value of each window when it closes.
    pub const TRAILING: Self = Self::new(false, true);

    /// Emit both the opening value and the latest buffered one.
    pub const LEADING_AND_TRAILING: Self = Self::new(true, true);

    /// Suppress every value.
    pub const SUPPRESS_ALL: Self = Self::new(false, false);

    pub const fn new(leading: bool, trailing: bool) -> Self {
        Self { leading, trailing }
    }

    #[must_use]
    pub const fn with_leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    #[must_use]
    pub const fn with_trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }

    /// `true` when neither edge is observable.
    pub const fn suppresses_all(&self) -> bool {
        !self.leading && !self.trailing
    }
}

impl Default for CoalesceConfig {
    fn default() -> Self {
        Self::TRAILING
    }
}
