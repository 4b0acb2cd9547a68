use solfege_core::time::{Clock, ManualClock, Stopwatch, SystemClock, Timer};

#[test]
fn test_manual_clock_shares_time_between_clones() {
    let clock = ManualClock::new(100);
    let handle = clock.clone();

    handle.advance(50);
    assert_eq!(clock.now_ms(), 150);

    clock.set(10);
    assert_eq!(handle.now_ms(), 10);
}

#[test]
fn test_system_clock_is_past_2020() {
    // 2020-01-01T00:00:00Z
    assert!(SystemClock.now_ms() > 1_577_836_800_000);
}

#[test]
fn test_timer_fires_once_at_due_time() {
    let mut timer = Timer::new();
    assert!(!timer.is_pending());
    assert!(!timer.fire_if_due(i64::MAX));

    timer.schedule(1000, 250);
    assert_eq!(timer.due_at(), Some(1250));
    assert!(!timer.fire_if_due(1249));
    assert!(timer.fire_if_due(1250));
    assert!(!timer.fire_if_due(1300));
    assert!(!timer.is_pending());
}

#[test]
fn test_timer_cancel_and_reschedule() {
    let mut timer = Timer::new();
    timer.schedule(0, 100);
    timer.cancel();
    assert!(!timer.fire_if_due(500));

    timer.schedule(0, 100);
    timer.schedule(50, 100);
    assert!(!timer.fire_if_due(120));
    assert!(timer.fire_if_due(150));
}

#[test]
fn test_stopwatch_elapsed() {
    let mut watch = Stopwatch::default();
    assert_eq!(watch.elapsed_ms(1000), 0);

    watch.start(1000);
    assert_eq!(watch.elapsed_ms(1000), 0);
    assert_eq!(watch.elapsed_ms(1750), 750);
    // Clock stepped backwards.
    assert_eq!(watch.elapsed_ms(900), 0);
}
