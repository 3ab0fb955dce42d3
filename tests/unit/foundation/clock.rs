use super::*;

#[test]
fn manual_clock_is_shared_between_clones() {
    let a = ManualClock::new();
    let b = a.clone();
    a.advance(12.5);
    assert_eq!(b.now_ms(), 12.5);
    b.set(3.0);
    assert_eq!(a.now_ms(), 3.0);
}

#[test]
fn stepping_clock_charges_each_read() {
    let c = ManualClock::with_step(30.0);
    let start = c.now_ms();
    let end = c.now_ms();
    assert_eq!(end - start, 30.0);
}

#[test]
fn system_clock_is_monotonic() {
    let c = SystemClock::new();
    let a = c.now_ms();
    let b = c.now_ms();
    assert!(b >= a);
}
