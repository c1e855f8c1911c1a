// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use coalesce_core::Notification;
use coalesce_stream::{signal, TickClock};
use coalesce_test_utils::{collect_ready, ManualTickScheduler, ManualTimer};
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn manual_clock() -> (TickClock<ManualTimer, ManualTickScheduler>, ManualTimer, ManualTickScheduler) {
    let timer = ManualTimer::new();
    let scheduler = ManualTickScheduler::new();
    let clock = TickClock::new(timer.clone(), scheduler.clone());
    (clock, timer, scheduler)
}

#[test]
fn test_ticks_report_elapsed_time_since_start() {
    // Arrange
    let (clock, timer, scheduler) = manual_clock();
    timer.advance(Duration::from_secs(5));
    let mut ticks = clock.ticks();

    // Act & Assert
    assert!(collect_ready(&mut ticks).is_empty());
    assert_eq!(scheduler.pending(), 1);

    timer.advance(FRAME);
    scheduler.tick();
    assert_eq!(collect_ready(&mut ticks), vec![Notification::Next(FRAME)]);

    timer.advance(FRAME);
    scheduler.tick();
    assert_eq!(collect_ready(&mut ticks), vec![Notification::Next(FRAME * 2)]);
}

#[test]
fn test_one_value_per_tick() {
    let (clock, timer, scheduler) = manual_clock();
    let mut ticks = clock.ticks();
    let _ = collect_ready(&mut ticks);

    timer.advance(FRAME);
    scheduler.tick();
    scheduler.tick();

    assert_eq!(collect_ready(&mut ticks).len(), 1);
    assert_eq!(scheduler.requested(), 2);
}

#[test]
fn test_ticks_never_decrease() {
    let (clock, timer, scheduler) = manual_clock();
    let mut ticks = clock.ticks();
    let mut seen = Vec::new();

    for step in [3u64, 0, 7, 0, 1] {
        let _ = collect_ready(&mut ticks);
        timer.advance(Duration::from_millis(step));
        scheduler.tick();
        seen.extend(collect_ready(&mut ticks).into_iter().filter_map(Notification::value));
    }

    assert_eq!(seen.len(), 5);
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(seen.last(), Some(&Duration::from_millis(11)));
}

#[test]
fn test_each_ticks_call_starts_from_zero() {
    let (clock, timer, scheduler) = manual_clock();
    let mut early = clock.ticks();
    let _ = collect_ready(&mut early);

    timer.advance(FRAME);
    let mut late = clock.ticks();
    let _ = collect_ready(&mut late);

    timer.advance(FRAME);
    assert_eq!(scheduler.tick(), 2);

    assert_eq!(collect_ready(&mut early), vec![Notification::Next(FRAME * 2)]);
    assert_eq!(collect_ready(&mut late), vec![Notification::Next(FRAME)]);
}

#[test]
fn test_dropping_ticks_cancels_the_request() {
    let (clock, _timer, scheduler) = manual_clock();
    let mut ticks = clock.ticks();
    let _ = collect_ready(&mut ticks);
    assert!(ticks.is_scheduled());

    drop(ticks);

    assert_eq!(scheduler.pending(), 0);
    assert_eq!(scheduler.cancelled(), 1);
    assert_eq!(scheduler.tick(), 0);
}

#[test]
fn test_repolled_ticks_resume_instead_of_requesting_again() {
    // Arrange
    let (clock, timer, scheduler) = manual_clock();
    let mut ticks = clock.ticks();
    let _ = collect_ready(&mut ticks);

    // Act
    let _ = collect_ready(&mut ticks);
    let _ = collect_ready(&mut ticks);

    // Assert
    assert_eq!(scheduler.requested(), 1);
    assert_eq!(scheduler.resumed(), 2);
    timer.advance(FRAME);
    scheduler.tick();
    assert_eq!(collect_ready(&mut ticks), vec![Notification::Next(FRAME)]);
}

#[test]
fn test_unpolled_ticks_schedule_nothing() {
    let (clock, _timer, scheduler) = manual_clock();

    let ticks = clock.ticks();

    assert!(!ticks.is_scheduled());
    assert_eq!(scheduler.requested(), 0);
}

#[test]
fn test_next_tick_of_takes_a_single_tick() {
    let (clock, timer, scheduler) = manual_clock();
    let mut next = signal::next_tick_of(&clock);
    let _ = collect_ready(&mut next);

    timer.advance(FRAME);
    scheduler.tick();

    assert_eq!(
        collect_ready(&mut next),
        vec![Notification::Next(FRAME), Notification::Complete]
    );
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn test_clock_identity() {
    let (clock, timer, scheduler) = manual_clock();
    let same = clock.clone();
    let other = TickClock::new(timer, scheduler);

    assert!(clock.ptr_eq(&same));
    assert!(!clock.ptr_eq(&other));
}
