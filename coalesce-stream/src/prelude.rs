// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting the commonly used traits and types.
//!
//! ```ignore
//! use coalesce_stream::prelude::*;
//!
//! let renders = updates.coalesce(CoalesceConfig::default());
//! let saves = edits.coalesce_with(|_| signal::timer(Duration::from_secs(1)), CoalesceConfig::LEADING_AND_TRAILING);
//! ```

pub use crate::coalesce::{Coalesce, CoalesceExt};
pub use crate::config::CoalesceConfig;
pub use crate::selector::DurationSelector;
pub use crate::signal;
pub use crate::tick_clock::TickClock;
