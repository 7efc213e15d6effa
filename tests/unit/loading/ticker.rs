use super::*;

fn run_for(t: &mut LoadingTicker, clock: &mut FrameClock, total: Duration) {
    let step = Duration::from_millis(50);
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        clock.advance_by(step);
        elapsed += step;
        t.pump(clock);
    }
}

#[test]
fn status_rotates_every_400ms() {
    let mut clock = FrameClock::default();
    let mut t = LoadingTicker::new(7);
    t.start(&mut clock);
    assert_eq!(t.status(), "CONNECTING_TO_SERVER...");
    run_for(&mut t, &mut clock, Duration::from_millis(400));
    assert_eq!(t.status(), "BYPASSING_FIREWALL...");
    run_for(&mut t, &mut clock, Duration::from_millis(400 * 7));
    assert_eq!(t.status(), "CONNECTING_TO_SERVER...");
}

#[test]
fn progress_grows_and_saturates() {
    let mut clock = FrameClock::default();
    let mut t = LoadingTicker::new(42);
    t.start(&mut clock);
    run_for(&mut t, &mut clock, Duration::from_millis(200));
    let first = t.progress();
    assert!((0.0..MAX_PROGRESS_STEP).contains(&first));

    run_for(&mut t, &mut clock, Duration::from_secs(120));
    assert_eq!(t.progress(), 100.0);
}

#[test]
fn same_seed_same_progress() {
    let mut ca = FrameClock::default();
    let mut cb = FrameClock::default();
    let mut a = LoadingTicker::new(3);
    let mut b = LoadingTicker::new(3);
    a.start(&mut ca);
    b.start(&mut cb);
    run_for(&mut a, &mut ca, Duration::from_secs(2));
    run_for(&mut b, &mut cb, Duration::from_secs(2));
    assert_eq!(a.progress(), b.progress());
}

#[test]
fn stop_clears_timers() {
    let mut clock = FrameClock::default();
    let mut t = LoadingTicker::new(1);
    t.start(&mut clock);
    assert_eq!(clock.pending_timers(), 2);
    t.stop(&mut clock);
    assert!(!t.is_running());
    assert_eq!(clock.pending_timers(), 0);
    run_for(&mut t, &mut clock, Duration::from_secs(1));
    assert_eq!(t.progress(), 0.0);
}

#[test]
fn empty_lines_yield_empty_status() {
    let mut clock = FrameClock::default();
    let mut t = LoadingTicker::with_lines(1, Vec::new());
    t.start(&mut clock);
    run_for(&mut t, &mut clock, Duration::from_secs(1));
    assert_eq!(t.status(), "");
}
