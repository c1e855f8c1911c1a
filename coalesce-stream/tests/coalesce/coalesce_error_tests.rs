// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use coalesce_core::{CoalesceError, Notification, StreamItem};
use coalesce_stream::{signal, CoalesceConfig, CoalesceExt};
use coalesce_test_utils::{collect_ready, test_channel, test_channel_with_errors, WindowProbe};
use futures::stream::{self, FusedStream};

#[derive(Debug, thiserror::Error)]
#[error("no window for {0}")]
struct NoWindow(i32);

#[test]
fn test_selector_failure_without_leading_emits_only_the_error() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel::<i32>();
    let mut coalesced = source.try_coalesce_with(
        |value: &i32| Err::<stream::Pending<StreamItem<()>>, _>(NoWindow(*value)),
        CoalesceConfig::TRAILING,
    );

    // Act
    tx.send(1)?;
    let notifications = collect_ready(&mut coalesced);

    // Assert
    match &notifications[..] {
        [Notification::Error(error), Notification::Complete] => {
            assert!(error.is_selector_error());
            assert_eq!(error.to_string(), "Duration selector error: no window for 1");
        }
        other => panic!("unexpected notifications: {other:?}"),
    }
    assert!(coalesced.is_terminated());
    assert!(tx.is_closed());
    Ok(())
}

#[test]
fn test_selector_failure_with_leading_emits_value_then_error() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel::<i32>();
    let mut coalesced = source.try_coalesce_with(
        |value: &i32| Err::<stream::Pending<StreamItem<()>>, _>(NoWindow(*value)),
        CoalesceConfig::LEADING,
    );

    // Act
    tx.send(7)?;
    tx.send(8)?;
    let notifications = collect_ready(&mut coalesced);

    // Assert
    assert_eq!(notifications.len(), 3);
    assert_eq!(notifications[0], Notification::Next(7));
    assert!(matches!(&notifications[1], Notification::Error(e) if e.is_selector_error()));
    assert_eq!(notifications[2], Notification::Complete);
    Ok(())
}

#[test]
fn test_selector_failure_on_a_later_window() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel::<i32>();
    let mut coalesced = source.try_coalesce_with(
        |value: &i32| {
            if *value < 3 {
                Ok(signal::immediate())
            } else {
                Err(NoWindow(*value))
            }
        },
        CoalesceConfig::TRAILING,
    );

    // Act
    for value in 1..=4 {
        tx.send(value)?;
    }
    let notifications = collect_ready(&mut coalesced);

    // Assert
    assert_eq!(notifications[..2], [Notification::Next(1), Notification::Next(2)]);
    assert!(matches!(&notifications[2], Notification::Error(e) if e.is_selector_error()));
    assert_eq!(notifications.len(), 4);
    Ok(())
}

#[test]
fn test_source_error_discards_pending_value() -> anyhow::Result<()> {
    // Arrange
    let probe = WindowProbe::new();
    let window_probe = probe.clone();
    let (tx, source) = test_channel_with_errors::<i32>();
    let mut coalesced = source.coalesce_with(
        move |_| window_probe.wrap(signal::never()),
        CoalesceConfig::TRAILING,
    );

    // Act
    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Value(2))?;
    tx.send(StreamItem::Error(CoalesceError::stream_error("source failed")))?;
    let notifications = collect_ready(&mut coalesced);

    // Assert
    assert_eq!(
        notifications,
        vec![
            Notification::Error(CoalesceError::stream_error("source failed")),
            Notification::Complete,
        ]
    );
    assert_eq!(probe.live(), 0);
    assert!(tx.is_closed());
    Ok(())
}

#[test]
fn test_source_error_passes_through_unchanged() -> anyhow::Result<()> {
    let (tx, source) = test_channel_with_errors::<i32>();
    let mut coalesced = source.coalesce_with(|_| signal::immediate(), CoalesceConfig::LEADING);

    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Error(CoalesceError::stream_error("boom")))?;
    tx.send(StreamItem::Value(2))?;

    let notifications = collect_ready(&mut coalesced);

    assert_eq!(notifications[0], Notification::Next(1));
    match &notifications[1] {
        Notification::Error(CoalesceError::StreamProcessingError { context }) => {
            assert_eq!(context, "boom");
        }
        other => panic!("expected the source error, got {other:?}"),
    }
    assert_eq!(notifications.len(), 3);
    Ok(())
}

#[test]
fn test_window_signal_error_ends_the_pipeline() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel::<i32>();
    let mut coalesced = source.coalesce_with(
        |_| {
            stream::iter(vec![StreamItem::<()>::Error(CoalesceError::stream_error(
                "window failed",
            ))])
        },
        CoalesceConfig::LEADING_AND_TRAILING,
    );

    // Act
    tx.send(1)?;
    tx.send(2)?;
    let notifications = collect_ready(&mut coalesced);

    // Assert
    assert_eq!(notifications[0], Notification::Next(1));
    match &notifications[1] {
        Notification::Error(error) => {
            assert!(error.is_window_signal_error());
            assert_eq!(error.to_string(), "Window signal error: Stream processing error: window failed");
        }
        other => panic!("expected a window signal error, got {other:?}"),
    }
    assert_eq!(notifications.len(), 3);
    assert!(tx.is_closed());
    Ok(())
}

#[test]
fn test_failed_deferred_window_surfaces_as_window_signal_error() -> anyhow::Result<()> {
    let (tx, source) = test_channel::<i32>();
    let mut coalesced = source.coalesce_with(
        |value: &i32| {
            let value = *value;
            signal::try_from_future(async move { Err::<(), _>(NoWindow(value)) })
        },
        CoalesceConfig::TRAILING,
    );

    tx.send(5)?;
    let notifications = collect_ready(&mut coalesced);

    assert!(matches!(&notifications[0], Notification::Error(e) if e.is_window_signal_error()));
    assert_eq!(notifications.len(), 2);
    Ok(())
}

#[test]
fn test_nothing_follows_an_error() -> anyhow::Result<()> {
    let (tx, source) = test_channel_with_errors::<i32>();
    let mut coalesced = source.coalesce_with(|_| signal::never(), CoalesceConfig::default());

    tx.send(StreamItem::Error(CoalesceError::stream_error("first")))?;
    assert_eq!(collect_ready(&mut coalesced).len(), 2);

    assert!(tx.send(StreamItem::Value(1)).is_err());
    assert_eq!(collect_ready(&mut coalesced), vec![Notification::Complete]);
    assert!(coalesced.is_terminated());
    Ok(())
}
