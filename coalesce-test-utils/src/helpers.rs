// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use coalesce_core::{CoalesceError, Notification, StreamItem};
use futures::stream::StreamExt;
use futures::task::noop_waker_ref;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{sleep, timeout};

pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!(
                "Unexpected item emitted, expected no output."
            );
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}

/// Waits up to `timeout_ms` for the next value of `stream`.
///
/// Errors carried by the stream are returned as `Err`; the end of the stream
/// and an elapsed timeout become stream processing errors.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> Result<T, CoalesceError>
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(Some(StreamItem::Value(value))) => Ok(value),
        Ok(Some(StreamItem::Error(error))) => Err(error),
        Ok(None) => Err(CoalesceError::stream_error("Stream ended")),
        Err(_) => Err(CoalesceError::stream_error("Timed out waiting for an item")),
    }
}

pub async fn recv_timeout<T>(rx: &mut UnboundedReceiver<T>, timeout_ms: u64) -> Option<T> {
    timeout(Duration::from_millis(timeout_ms), rx.recv())
        .await
        .ok()
        .flatten()
}

/// Polls `stream` without blocking and returns everything it has ready.
///
/// Stops at the first `Poll::Pending`. The end of the stream is recorded as
/// `Notification::Complete`.
pub fn collect_ready<S, T>(stream: &mut S) -> Vec<Notification<T>>
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    let mut cx = Context::from_waker(noop_waker_ref());
    let mut ready = Vec::new();

    loop {
        match Pin::new(&mut *stream).poll_next(&mut cx) {
            Poll::Ready(Some(item)) => ready.push(Notification::from(item)),
            Poll::Ready(None) => {
                ready.push(Notification::Complete);
                return ready;
            }
            Poll::Pending => return ready,
        }
    }
}
