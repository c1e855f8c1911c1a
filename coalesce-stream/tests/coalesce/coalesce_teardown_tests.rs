// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use coalesce_core::{Notification, StreamItem};
use coalesce_stream::{signal, CoalesceConfig, CoalesceExt};
use coalesce_test_utils::{collect_ready, test_channel, ManualTimer, WindowProbe};
use futures::stream::FusedStream;
use futures::StreamExt;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(1);

#[test]
fn test_drop_releases_source_and_window() -> anyhow::Result<()> {
    // Arrange
    let probe = WindowProbe::new();
    let window_probe = probe.clone();
    let (tx, source) = test_channel::<i32>();
    let mut coalesced = source.coalesce_with(
        move |_| window_probe.wrap(signal::never()),
        CoalesceConfig::LEADING_AND_TRAILING,
    );

    tx.send(1)?;
    tx.send(2)?;
    assert_eq!(collect_ready(&mut coalesced), vec![Notification::Next(1)]);
    assert_eq!(probe.live(), 1);

    // Act
    drop(coalesced);

    // Assert
    assert_eq!(probe.live(), 0);
    assert!(tx.is_closed());
    Ok(())
}

#[test]
fn test_drop_before_any_signal_releases_source() {
    let (tx, source) = test_channel::<i32>();
    let coalesced = source.coalesce_with(|_| signal::never(), CoalesceConfig::default());

    drop(coalesced);

    assert!(tx.is_closed());
}

#[test]
fn test_completion_releases_window() -> anyhow::Result<()> {
    let probe = WindowProbe::new();
    let window_probe = probe.clone();
    let (tx, source) = test_channel::<i32>();
    let mut coalesced = source.coalesce_with(
        move |_| window_probe.wrap(signal::never()),
        CoalesceConfig::TRAILING,
    );

    tx.send(1)?;
    assert!(collect_ready(&mut coalesced).is_empty());
    assert_eq!(probe.live(), 1);

    drop(tx);
    assert_eq!(
        collect_ready(&mut coalesced),
        vec![Notification::Next(1), Notification::Complete]
    );
    assert_eq!(probe.live(), 0);
    Ok(())
}

#[test]
fn test_at_most_one_window_is_open() -> anyhow::Result<()> {
    // Arrange
    let timer = ManualTimer::new();
    let probe = WindowProbe::new();
    let (window_timer, window_probe) = (timer.clone(), probe.clone());
    let (tx, source) = test_channel::<u32>();
    let mut coalesced = source.coalesce_with(
        move |_| window_probe.wrap(signal::timer_with(&window_timer, TICK * 2)),
        CoalesceConfig::LEADING_AND_TRAILING,
    );

    // Act
    for value in 0..100 {
        tx.send(value)?;
        if value % 7 == 0 {
            timer.advance(TICK);
        }
        let _ = collect_ready(&mut coalesced);
    }

    // Assert
    assert!(probe.opened() > 1);
    assert_eq!(probe.max_live(), 1);
    Ok(())
}

#[test]
fn test_selector_runs_once_per_window() -> anyhow::Result<()> {
    let timer = ManualTimer::new();
    let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let (window_timer, counter) = (timer.clone(), calls.clone());
    let (tx, source) = test_channel::<u32>();
    let mut coalesced = source.coalesce_with(
        move |_| {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            signal::timer_with(&window_timer, TICK * 3)
        },
        CoalesceConfig::TRAILING,
    );

    for value in 0..6 {
        tx.send(value)?;
    }
    let _ = collect_ready(&mut coalesced);
    timer.advance(TICK * 3);
    assert_eq!(collect_ready(&mut coalesced), vec![Notification::Next(5)]);

    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_terminated_stream_keeps_returning_none() {
    let mut coalesced = futures::stream::iter(vec![StreamItem::Value(1)])
        .coalesce_with(|_| signal::immediate(), CoalesceConfig::LEADING);

    assert_eq!(
        collect_ready(&mut coalesced),
        vec![Notification::Next(1), Notification::Complete]
    );
    assert!(coalesced.is_terminated());
    assert_eq!(collect_ready(&mut coalesced), vec![Notification::Complete]);
}

#[test]
fn test_flushed_stream_terminates_only_after_yielding_none() {
    // Arrange
    let mut coalesced = futures::stream::iter(vec![StreamItem::Value(1), StreamItem::Value(2)])
        .coalesce_with(|_| signal::never(), CoalesceConfig::TRAILING);

    // Act
    let flushed = futures::executor::block_on(coalesced.next());

    // Assert
    assert_eq!(flushed, Some(StreamItem::Value(2)));
    assert!(!coalesced.is_terminated());
    assert_eq!(futures::executor::block_on(coalesced.next()), None);
    assert!(coalesced.is_terminated());
}

#[test]
fn test_errored_stream_terminates_only_after_yielding_none() {
    let mut coalesced = futures::stream::iter(vec![
        StreamItem::Value(1),
        StreamItem::Error(coalesce_core::CoalesceError::stream_error("gone")),
    ])
    .coalesce_with(|_| signal::never(), CoalesceConfig::TRAILING);

    let first = futures::executor::block_on(coalesced.next());

    assert!(matches!(first, Some(StreamItem::Error(_))));
    assert!(!coalesced.is_terminated());
    assert!(futures::executor::block_on(coalesced.next()).is_none());
    assert!(coalesced.is_terminated());
}
