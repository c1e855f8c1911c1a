// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use coalesce_core::{Notification, StreamItem};
use coalesce_stream::{signal, Coalesce, CoalesceConfig, CoalesceExt, TickClock};
use coalesce_test_utils::test_data::{state_filtered, state_loaded, state_loading, state_sorted};
use coalesce_test_utils::{collect_ready, test_channel, ManualTickScheduler, ManualTimer};
use futures::stream;

#[derive(Debug, thiserror::Error)]
#[error("rejected")]
struct Rejected;

#[test]
fn test_operator_applications_are_independent() -> anyhow::Result<()> {
    // Arrange
    let operator = Coalesce::new(|_: &u32| signal::never(), CoalesceConfig::LEADING);
    let (tx_a, source_a) = test_channel::<u32>();
    let (tx_b, source_b) = test_channel::<u32>();
    let mut a = operator.apply(source_a);
    let mut b = operator.apply(source_b);

    // Act
    tx_a.send(1)?;
    tx_a.send(2)?;
    tx_b.send(10)?;

    // Assert
    assert_eq!(collect_ready(&mut a), vec![Notification::Next(1)]);
    assert_eq!(collect_ready(&mut b), vec![Notification::Next(10)]);
    assert_eq!(operator.config(), CoalesceConfig::LEADING);
    Ok(())
}

#[test]
fn test_fallible_operator_reports_selector_error() {
    let operator = Coalesce::fallible(
        |_: &u32| Err::<stream::Empty<StreamItem<()>>, _>(Rejected),
        CoalesceConfig::TRAILING,
    );

    let mut coalesced = operator.apply(stream::iter(vec![StreamItem::Value(1u32)]));

    let notifications = collect_ready(&mut coalesced);
    assert!(matches!(&notifications[0], Notification::Error(e) if e.is_selector_error()));
}

#[test]
fn test_coalesce_on_ticks_emits_latest_state_per_tick() -> anyhow::Result<()> {
    // Arrange
    let scheduler = ManualTickScheduler::new();
    let clock = TickClock::new(ManualTimer::new(), scheduler.clone());
    let (tx, source) = test_channel();
    let mut renders = source.coalesce_on_ticks(&clock, CoalesceConfig::default());

    // Act & Assert
    tx.send(state_loading())?;
    tx.send(state_loaded())?;
    assert!(collect_ready(&mut renders).is_empty());
    assert_eq!(scheduler.pending(), 1);

    scheduler.tick();
    assert_eq!(collect_ready(&mut renders), vec![Notification::Next(state_loaded())]);
    assert_eq!(scheduler.pending(), 0);

    tx.send(state_filtered())?;
    tx.send(state_sorted())?;
    assert!(collect_ready(&mut renders).is_empty());
    scheduler.tick();
    assert_eq!(collect_ready(&mut renders), vec![Notification::Next(state_sorted())]);
    Ok(())
}

#[test]
fn test_tick_operator_leading_renders_immediately() -> anyhow::Result<()> {
    let scheduler = ManualTickScheduler::new();
    let clock = TickClock::new(ManualTimer::new(), scheduler.clone());
    let operator = Coalesce::on_ticks_of(&clock, CoalesceConfig::LEADING_AND_TRAILING);
    let (tx, source) = test_channel();
    let mut renders = operator.apply(source);

    tx.send(1)?;
    tx.send(2)?;
    tx.send(3)?;
    assert_eq!(collect_ready(&mut renders), vec![Notification::Next(1)]);

    scheduler.tick();
    assert_eq!(collect_ready(&mut renders), vec![Notification::Next(3)]);
    Ok(())
}

#[test]
fn test_dropping_a_tick_pipeline_withdraws_its_tick() -> anyhow::Result<()> {
    let scheduler = ManualTickScheduler::new();
    let clock = TickClock::new(ManualTimer::new(), scheduler.clone());
    let (tx, source) = test_channel();
    let mut renders = source.coalesce_on_ticks(&clock, CoalesceConfig::default());

    tx.send(1)?;
    assert!(collect_ready(&mut renders).is_empty());
    assert_eq!(scheduler.pending(), 1);

    drop(renders);

    assert_eq!(scheduler.pending(), 0);
    assert_eq!(scheduler.cancelled(), 1);
    Ok(())
}
