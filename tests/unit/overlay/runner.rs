use super::*;
use crate::foundation::clock::ManualClock;
use crate::overlay::constellation::Constellation;
use crate::overlay::waves::SoftWaves;
use crate::settings::model::{BlendMode, Density};

fn settings(density: Density) -> OverlaySettings {
    OverlaySettings {
        opacity: 0.25,
        speed: 1.0,
        density,
        blend: BlendMode::Normal,
    }
}

fn env(reduced: bool, ratio: f64) -> OverlayEnv {
    OverlayEnv::new(reduced, ratio, Size::new(320.0, 180.0)).with_seed(42)
}

fn constellation(density: Density, clock: &ManualClock) -> Overlay<Constellation> {
    Overlay::new(settings(density), env(false, 2.0), Box::new(clock.clone()))
}

#[test]
fn reduced_motion_never_starts() {
    let clock = ManualClock::new();
    let mut o: Overlay<SoftWaves> =
        Overlay::new(settings(Density::Low), env(true, 1.0), Box::new(clock));
    assert_eq!(o.start(Millis(0)), FrameRequest::None);
    assert!(!o.is_running());
    assert_eq!(o.frame(Millis(16)), FrameRequest::None);
    assert!(o.canvas().display_list().is_empty());
}

#[test]
fn start_is_idempotent_and_stop_clears() {
    let clock = ManualClock::new();
    let mut o = constellation(Density::Low, &clock);
    assert_eq!(o.start(Millis(0)), FrameRequest::NextFrame);
    assert_eq!(o.start(Millis(5)), FrameRequest::None);
    o.frame(Millis(40));
    assert!(!o.canvas().display_list().is_empty());

    o.stop();
    assert!(!o.is_running());
    assert!(o.canvas().display_list().is_empty());
    assert_eq!(o.next_frame_at(), None);
    assert_eq!(o.entity_count(), 40);
    assert_eq!(o.frame(Millis(80)), FrameRequest::None);
}

#[test]
fn capped_frames_defer_to_thirty_fps() {
    let clock = ManualClock::new();
    let mut o = constellation(Density::Low, &clock);
    o.start(Millis(0));
    assert_eq!(o.frame(Millis(10)), FrameRequest::After(23));
    assert_eq!(o.next_frame_at(), Some(Millis(33)));
    assert_eq!(o.frame(Millis(60)), FrameRequest::NextFrame);
    assert_eq!(o.next_frame_at(), Some(Millis(76)));
}

#[test]
fn uncapped_always_asks_for_next_frame() {
    let clock = ManualClock::new();
    let mut e = env(false, 1.0);
    e.cap_fps = false;
    let mut o: Overlay<Constellation> =
        Overlay::new(settings(Density::Low), e, Box::new(clock));
    o.start(Millis(0));
    assert_eq!(o.frame(Millis(5)), FrameRequest::NextFrame);
}

#[test]
fn slow_frames_walk_the_downgrade_ladder() {
    let clock = ManualClock::with_step(30.0);
    let mut o = constellation(Density::High, &clock);
    assert_eq!(o.entity_count(), 140);
    assert_eq!(o.canvas().backing_size(), (640, 360));
    o.start(Millis(0));

    let mut t = 0;
    let mut run = |o: &mut Overlay<Constellation>, frames: u32| {
        for _ in 0..frames {
            t += 40;
            o.frame(Millis(t));
        }
    };

    run(&mut o, 60);
    assert_eq!(o.governor().density(), Density::Medium);
    assert_eq!(o.entity_count(), 80);

    run(&mut o, 60);
    assert_eq!(o.entity_count(), 40);
    assert_eq!(o.canvas().backing_size(), (640, 360));

    run(&mut o, 60);
    assert_eq!(o.governor().pixel_ratio(), 1.0);
    assert_eq!(o.canvas().backing_size(), (320, 180));
    assert!(o.governor().is_terminal());

    run(&mut o, 120);
    assert_eq!(o.entity_count(), 40);
    assert_eq!(o.canvas().backing_size(), (320, 180));
}

#[test]
fn element_resize_is_picked_up_by_the_next_frame() {
    let clock = ManualClock::new();
    let mut o = constellation(Density::Medium, &clock);
    o.start(Millis(0));
    o.set_element_size(Size::new(100.0, 50.0));
    o.frame(Millis(40));
    assert_eq!(o.canvas().backing_size(), (200, 100));
    assert_eq!(o.entity_count(), 80);
    let field = o.field().unwrap();
    assert!(
        field
            .particles()
            .iter()
            .all(|p| p.pos.x <= 200.0 && p.pos.y <= 100.0)
    );
}

#[test]
fn destroy_releases_entities() {
    let clock = ManualClock::new();
    let mut o = constellation(Density::Medium, &clock);
    o.start(Millis(0));
    o.destroy();
    assert!(!o.is_running());
    assert_eq!(o.entity_count(), 0);
    assert!(o.field().is_none());
    assert_eq!(o.start(Millis(10)), FrameRequest::None);
}

#[test]
fn same_seed_same_entities() {
    let a = constellation(Density::Medium, &ManualClock::new());
    let b = constellation(Density::Medium, &ManualClock::new());
    assert_eq!(a.field(), b.field());
}
