// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime abstraction for coalesce.
//!
//! - [`timer::Timer`] - time source and sleep futures
//! - [`runtime::Runtime`] - bundles a timer with a task spawner
//! - [`tick_scheduler::TickScheduler`] - the `request_tick` / `cancel_tick` primitive
//! - [`frame_scheduler::FrameScheduler`] - a fixed-rate frame scheduler driven by a runtime

#[macro_use]
mod logging;

pub mod frame_scheduler;
pub mod impls;
pub mod runtime;
pub mod tick_scheduler;
pub mod timer;

pub use frame_scheduler::{FrameScheduler, DEFAULT_FRAME_PERIOD};
pub use runtime::Runtime;
pub use tick_scheduler::{TickCallback, TickScheduler, TickToken};
pub use timer::Timer;

#[cfg(feature = "runtime-tokio")]
pub type DefaultRuntime = impls::tokio::TokioRuntime;
