use super::*;
use crate::foundation::core::GridDims;
use crate::host::contract::MediaSource;
use crate::sequencer::display::ZoomStage;
use crate::sequencer::tiles::visit_order;
use proptest::prelude::*;

fn layout(n: usize) -> TileLayout {
    let tiles = (0..n)
        .map(|i| {
            let (col, row) = ((i % 3) as f64, (i / 3) as f64);
            Tile {
                index: i,
                rect: Rect::new(
                    col * 100.0,
                    row * 100.0,
                    col * 100.0 + 100.0,
                    row * 100.0 + 100.0,
                ),
                media: MediaSource::image(format!("t{i}.jpg")),
            }
        })
        .collect();
    TileLayout {
        container: Rect::new(0.0, 0.0, 300.0, 200.0),
        grid: GridDims::new(3, 2).unwrap(),
        tiles,
    }
}

fn sequencer(n: usize) -> TileSequencer<ZoomStage> {
    let mut s = TileSequencer::new(
        ZoomStage::new(),
        TimingConfig::new(3000, 900, 700).unwrap(),
        ZoomEffects::default(),
    );
    s.recompute_tiles(&layout(n), TileOrder::Ltr, Millis::ZERO);
    s
}

fn starts(events: &[SequencerEvent]) -> Vec<usize> {
    events
        .iter()
        .filter(|e| e.phase == Phase::Settle)
        .map(|e| e.tile)
        .collect()
}

// Tile cycle with 3000/900/700 timing: 50 + 900 + 3000 + 700 + 100.
const CYCLE: u64 = 4750;

#[test]
fn one_tile_cycle_follows_the_phase_timeline() {
    let mut s = sequencer(3);
    s.start(Millis(0));
    assert_eq!(s.state(), SequencerState::Playing);
    assert_eq!(s.phase(), Some(Phase::Settle));
    assert_eq!(s.next_deadline(), Some(Millis(50)));

    let events = s.tick(Millis(CYCLE));
    let timeline: Vec<(u64, usize, Phase)> =
        events.iter().map(|e| (e.at.0, e.tile, e.phase)).collect();
    assert_eq!(
        timeline,
        vec![
            (50, 0, Phase::ZoomIn),
            (950, 0, Phase::Hold),
            (3950, 0, Phase::ZoomOut),
            (4650, 0, Phase::Gap),
            (4750, 1, Phase::Settle),
        ]
    );
}

#[test]
fn three_tiles_cycle_back_to_the_first() {
    let mut s = sequencer(3);
    s.start(Millis(0));
    let events = s.tick(Millis(CYCLE * 3));
    assert_eq!(starts(&events), vec![1, 2, 0]);
}

#[test]
fn display_follows_the_phases() {
    let mut s = sequencer(3);
    s.start(Millis(0));
    let stage = s.display();
    assert_eq!(stage.highlight(), Some(0));
    let initial = stage.sample(Millis(0)).unwrap();
    assert_eq!(initial.opacity, 0.0);
    assert_eq!(initial.blur_px, 6.0);

    s.tick(Millis(50));
    let tr = s.display().transition().unwrap();
    assert_eq!(tr.duration_ms, 900);
    assert_eq!(s.display().sample(Millis(950)).unwrap(), ZoomStyle::rest(1.0));

    s.tick(Millis(3950));
    assert_eq!(s.display().highlight(), None);
    assert_eq!(s.display().transition().unwrap().duration_ms, 700);

    s.tick(Millis(4650));
    assert!(!s.display().is_active());
    assert_eq!(s.cursor(), 1);
}

#[test]
fn start_needs_tiles_and_idle() {
    let mut empty = sequencer(0);
    empty.start(Millis(0));
    assert_eq!(empty.state(), SequencerState::Idle);
    assert_eq!(empty.next_deadline(), None);

    let mut s = sequencer(3);
    s.start(Millis(0));
    s.tick(Millis(CYCLE));
    s.start(Millis(CYCLE));
    assert_eq!(s.cursor(), 1);

    s.pause(Millis(CYCLE + 10));
    s.start(Millis(CYCLE + 20));
    assert_eq!(s.state(), SequencerState::Paused);
}

#[test]
fn pause_freezes_and_cancels() {
    let mut s = sequencer(3);
    s.start(Millis(0));
    s.tick(Millis(500));
    let frozen = s.display().sample(Millis(500)).unwrap();
    s.pause(Millis(500));
    assert_eq!(s.state(), SequencerState::Paused);
    assert_eq!(s.next_deadline(), None);
    assert_eq!(s.display().sample(Millis(9_000)).unwrap(), frozen);
    assert!(s.tick(Millis(100_000)).is_empty());
    assert_eq!(s.cursor(), 0);
}

#[test]
fn pause_then_resume_mid_tile_moves_to_the_next_tile() {
    let mut s = sequencer(3);
    s.start(Millis(0));
    s.tick(Millis(2000));
    s.pause(Millis(2000));
    s.resume(Millis(2000));
    assert_eq!(s.state(), SequencerState::Playing);
    assert_eq!(s.cursor(), 1);
    assert_eq!(s.display().highlight(), Some(1));

    let events = s.tick(Millis(2000 + CYCLE * 2));
    assert_eq!(starts(&events), vec![2, 0]);
}

#[test]
fn pause_in_gap_resumes_at_the_pending_tile() {
    let mut s = sequencer(3);
    s.start(Millis(0));
    s.tick(Millis(4700));
    assert_eq!(s.phase(), Some(Phase::Gap));
    s.pause(Millis(4700));
    s.resume(Millis(4710));
    assert_eq!(s.cursor(), 1);
    assert_eq!(s.phase(), Some(Phase::Settle));
}

#[test]
fn resume_requires_intersection() {
    let mut s = sequencer(2);
    s.start(Millis(0));
    s.pause(Millis(10));
    s.set_intersecting(false);
    s.resume(Millis(20));
    assert_eq!(s.state(), SequencerState::Paused);
    s.set_intersecting(true);
    s.resume(Millis(30));
    assert_eq!(s.state(), SequencerState::Playing);
}

#[test]
fn stop_resets_everything() {
    let mut s = sequencer(3);
    s.start(Millis(0));
    s.tick(Millis(1000));
    s.stop();
    assert_eq!(s.state(), SequencerState::Idle);
    assert_eq!(s.phase(), None);
    assert!(!s.display().is_active());
    assert_eq!(s.display().highlight(), None);
    assert!(s.tick(Millis(10_000)).is_empty());

    s.start(Millis(20_000));
    assert_eq!(s.cursor(), 0);
}

#[test]
fn reduced_motion_shortens_zoom_and_drops_blur() {
    let mut s = sequencer(1);
    s.set_reduced_motion(true);
    s.start(Millis(0));
    assert_eq!(s.display().sample(Millis(0)).unwrap().blur_px, 0.0);
    let events = s.tick(Millis(50 + 300 + 3000 + 300));
    let at: Vec<u64> = events.iter().map(|e| e.at.0).collect();
    assert_eq!(at, vec![50, 350, 3350, 3650]);
}

#[test]
fn single_tile_repeats() {
    let mut s = sequencer(1);
    s.start(Millis(0));
    let events = s.tick(Millis(CYCLE * 3));
    assert_eq!(starts(&events), vec![0, 0, 0]);
}

#[test]
fn recompute_in_flight_resets_and_restarts_after_a_gap() {
    let mut s = sequencer(6);
    s.start(Millis(0));
    s.tick(Millis(CYCLE * 4 + 1000));
    assert_eq!(s.cursor(), 4);

    s.recompute_tiles(&layout(3), TileOrder::Ltr, Millis(20_000));
    assert!(!s.display().is_active());
    assert_eq!(s.cursor(), 2);
    assert_eq!(s.phase(), Some(Phase::Gap));
    assert_eq!(s.next_deadline(), Some(Millis(20_100)));

    let events = s.tick(Millis(20_100));
    assert_eq!(starts(&events), vec![2]);
}

#[test]
fn recompute_to_no_tiles_stops() {
    let mut s = sequencer(3);
    s.start(Millis(0));
    s.recompute_tiles(&layout(0), TileOrder::Ltr, Millis(10));
    assert_eq!(s.state(), SequencerState::Idle);
    assert!(!s.display().is_active());
}

#[test]
fn rejected_autoplay_does_not_stall() {
    let mut l = layout(2);
    l.tiles[0].media = MediaSource::video("v.mp4", Some("p.jpg".to_owned()));
    let mut s = TileSequencer::new(
        ZoomStage::new(),
        TimingConfig::new(3000, 900, 700).unwrap(),
        ZoomEffects::default(),
    );
    s.display_mut().reject_autoplay = true;
    s.recompute_tiles(&l, TileOrder::Ltr, Millis(0));
    s.start(Millis(0));
    let events = s.tick(Millis(CYCLE));
    assert_eq!(starts(&events), vec![1]);
}

proptest! {
    #[test]
    fn one_full_cycle_visits_every_tile_once(n in 1usize..=6, rtl in any::<bool>()) {
        let order = if rtl { TileOrder::Rtl } else { TileOrder::Ltr };
        let mut s = TileSequencer::new(
            ZoomStage::new(),
            TimingConfig::new(3000, 900, 700).unwrap(),
            ZoomEffects::default(),
        );
        s.recompute_tiles(&layout(n), order, Millis::ZERO);
        s.start(Millis(0));
        let mut seen = vec![s.display().highlight().unwrap()];
        let events = s.tick(Millis(CYCLE * (n as u64 - 1)));
        seen.extend(starts(&events));
        prop_assert_eq!(seen, visit_order(n, order, GridDims::new(3, 2).unwrap()));
    }
}
