use super::*;
use crate::foundation::core::Size;
use crate::render::display_list::DrawOp;
use rand::SeedableRng;

fn cx(w: f64, h: f64) -> FieldContext {
    FieldContext {
        extent: Size::new(w, h),
        pixel_ratio: 1.0,
        opacity: 1.0,
        speed: 2.0,
    }
}

#[test]
fn bands_are_staggered_and_ranged() {
    let mut rng = SmallRng::seed_from_u64(11);
    let field = SoftWaves::populate(4, &cx(400.0, 1000.0), &mut rng);
    let ys: Vec<f64> = field.waves().iter().map(|w| w.baseline).collect();
    for (y, want) in ys.iter().zip([200.0, 450.0, 700.0, 950.0]) {
        assert!((y - want).abs() < 1e-9, "baseline {y} != {want}");
    }
    for w in field.waves() {
        assert!((20.0..50.0).contains(&w.amplitude));
        assert!((0.005..0.015).contains(&w.frequency));
        assert!((1.0..2.0).contains(&w.speed));
        assert!((0.15..0.45).contains(&w.alpha));
        assert!(w.direction == 1.0 || w.direction == -1.0);
    }
}

#[test]
fn crest_samples_every_two_pixels() {
    let w = Wave {
        amplitude: 10.0,
        frequency: 0.01,
        phase: 0.0,
        speed: 1.0,
        baseline: 50.0,
        alpha: 0.3,
        direction: 1.0,
    };
    // move_to plus x = 0, 2, ..., 100
    assert_eq!(w.crest(100.0).elements().len(), 52);
    assert_eq!(w.y_at(0.0), 50.0);
    // three more segments and a close
    assert_eq!(w.band(100.0).elements().len(), 55);
}

#[test]
fn advance_scrolls_in_direction() {
    let mut field = SoftWaves {
        waves: vec![
            Wave {
                amplitude: 10.0,
                frequency: 0.01,
                phase: 1.0,
                speed: 2.0,
                baseline: 0.0,
                alpha: 0.3,
                direction: -1.0,
            };
            1
        ],
    };
    field.advance(500.0, &cx(10.0, 10.0));
    assert!((field.waves()[0].phase - 0.0).abs() < 1e-12);
}

#[test]
fn relayout_recomputes_baselines() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut field = SoftWaves::populate(2, &cx(100.0, 100.0), &mut rng);
    field.relayout(&cx(100.0, 400.0), &mut rng);
    assert_eq!(field.len(), 2);
    assert!((field.waves()[1].baseline - 180.0).abs() < 1e-9);
}

#[test]
fn draw_fills_band_under_stroke() {
    let mut rng = SmallRng::seed_from_u64(4);
    let field = SoftWaves::populate(3, &cx(64.0, 64.0), &mut rng);
    let mut list = DisplayList::new();
    field.draw(&cx(64.0, 64.0), &mut list);
    assert_eq!(list.len(), 6);
    assert!(matches!(list.ops()[0], DrawOp::Fill { paint: Paint::Linear { .. }, .. }));
    assert!(matches!(list.ops()[1], DrawOp::Stroke { .. }));
}
