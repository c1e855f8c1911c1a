// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use coalesce_runtime::impls::tokio::{TokioRuntime, TokioTimer};
use coalesce_runtime::FrameScheduler;
use coalesce_stream::{Coalesce, CoalesceConfig, CoalesceExt, DefaultTickClock, TickClock};
use coalesce_test_utils::test_data::{state_loaded, state_loading, state_saved, state_sorted};
use coalesce_test_utils::{assert_no_element_emitted, test_channel, unwrap_stream};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{pause, Instant};

const FRAME: Duration = Duration::from_millis(10);

fn frame_clock() -> TickClock<TokioTimer, FrameScheduler<TokioRuntime>> {
    TickClock::new(TokioTimer, FrameScheduler::with_period(FRAME))
}

#[tokio::test]
async fn test_shared_clock_is_reused() {
    let first = DefaultTickClock::shared();
    let second = TickClock::shared();

    assert!(first.ptr_eq(&second));
    assert!(!first.ptr_eq(&frame_clock()));
}

#[tokio::test]
async fn test_default_coalesce_renders_latest_state_on_next_frame() -> anyhow::Result<()> {
    // Arrange
    pause();
    let (tx, source) = test_channel();
    let mut renders = source.coalesce(CoalesceConfig::default());

    // Act
    tx.send(state_loading())?;
    tx.send(state_loaded())?;
    tx.send(state_saved())?;

    // Assert
    assert_eq!(unwrap_stream(&mut renders, 1000).await?, state_saved());
    Ok(())
}

#[tokio::test]
async fn test_frame_windows_follow_the_frame_period() -> anyhow::Result<()> {
    // Arrange
    pause();
    let clock = frame_clock();
    let (tx, source) = test_channel();
    let mut renders = source.coalesce_on_ticks(&clock, CoalesceConfig::LEADING_AND_TRAILING);
    let start = Instant::now();

    // Act & Assert
    tx.send(1)?;
    tx.send(2)?;
    assert_eq!(unwrap_stream(&mut renders, 1000).await?, 1);
    assert_eq!(Instant::now(), start);

    assert_eq!(unwrap_stream(&mut renders, 1000).await?, 2);
    assert!(Instant::now() - start >= FRAME);

    assert_no_element_emitted(&mut renders, 50).await;
    Ok(())
}

#[tokio::test]
async fn test_frame_operator_shared_between_pipelines() -> anyhow::Result<()> {
    // Arrange
    pause();
    let operator = Coalesce::on_ticks_of(&frame_clock(), CoalesceConfig::TRAILING);
    let (tx_a, source_a) = test_channel();
    let (tx_b, source_b) = test_channel();
    let mut a = operator.apply(source_a);
    let mut b = operator.apply(source_b);

    // Act
    tx_a.send(state_loading())?;
    tx_a.send(state_loaded())?;
    tx_b.send(state_sorted())?;

    // Assert
    assert_eq!(unwrap_stream(&mut a, 1000).await?, state_loaded());
    assert_eq!(unwrap_stream(&mut b, 1000).await?, state_sorted());

    drop(tx_a);
    assert!(a.next().await.is_none());
    Ok(())
}

#[test]
fn test_window_survives_the_runtime_that_opened_it() -> anyhow::Result<()> {
    // Arrange
    let clock = frame_clock();
    let (tx, source) = test_channel();
    let mut renders = source.coalesce_on_ticks(&clock, CoalesceConfig::TRAILING);
    let runtime = || tokio::runtime::Builder::new_current_thread().enable_time().build();

    let first = runtime()?;
    first.block_on(async {
        tx.send(state_loading())?;
        let early = tokio::time::timeout(FRAME / 2, renders.next()).await;
        assert!(early.is_err());
        anyhow::Ok(())
    })?;
    drop(first);

    // Act
    let second = runtime()?;
    let flushed = second.block_on(unwrap_stream(&mut renders, 1000))?;

    // Assert
    assert_eq!(flushed, state_loading());
    assert_eq!(clock.scheduler().pending(), 0);
    Ok(())
}
