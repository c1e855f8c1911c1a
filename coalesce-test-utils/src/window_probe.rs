// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use parking_lot::Mutex;
use pin_project::pin_project;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

#[derive(Debug, Default)]
struct ProbeCounts {
    opened: usize,
    live: usize,
    max_live: usize,
}

/// Tracks the window signals handed out by a selector.
///
/// Wrap each signal with [`wrap`](Self::wrap) inside the selector; the probe
/// then knows how many signals were created and how many are still alive.
/// A signal counts as alive until it is dropped, which is how a pipeline
/// unsubscribes from it.
#[derive(Clone, Debug, Default)]
pub struct WindowProbe {
    counts: Arc<Mutex<ProbeCounts>>,
}

impl WindowProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wrap<W>(&self, signal: W) -> ProbedSignal<W> {
        let mut counts = self.counts.lock();
        counts.opened += 1;
        counts.live += 1;
        counts.max_live = counts.max_live.max(counts.live);

        ProbedSignal {
            inner: signal,
            _alive: AliveGuard(Arc::clone(&self.counts)),
        }
    }

    /// Signals created so far.
    pub fn opened(&self) -> usize {
        self.counts.lock().opened
    }

    /// Signals not yet dropped.
    pub fn live(&self) -> usize {
        self.counts.lock().live
    }

    /// The highest number of signals alive at the same time.
    pub fn max_live(&self) -> usize {
        self.counts.lock().max_live
    }
}

struct AliveGuard(Arc<Mutex<ProbeCounts>>);

impl Drop for AliveGuard {
    fn drop(&mut self) {
        self.0.lock().live -= 1;
    }
}

/// A window signal observed by a [`WindowProbe`].
#[pin_project]
pub struct ProbedSignal<W> {
    #[pin]
    inner: W,
    _alive: AliveGuard,
}

impl<W: Stream> Stream for ProbedSignal<W> {
    type Item = W::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().inner.poll_next(cx)
    }
}
