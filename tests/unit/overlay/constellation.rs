use super::*;
use crate::foundation::core::Size;
use crate::render::display_list::DrawOp;
use rand::SeedableRng;

fn cx(w: f64, h: f64) -> FieldContext {
    FieldContext {
        extent: Size::new(w, h),
        pixel_ratio: 1.0,
        opacity: 0.5,
        speed: 1.0,
    }
}

#[test]
fn populate_stays_in_bounds_with_bounded_velocity() {
    let mut rng = SmallRng::seed_from_u64(7);
    let field = Constellation::populate(80, &cx(300.0, 200.0), &mut rng);
    assert_eq!(field.len(), 80);
    for p in field.particles() {
        assert!((0.0..=300.0).contains(&p.pos.x));
        assert!((0.0..=200.0).contains(&p.pos.y));
        assert!(p.vel.x.abs() <= 0.25 && p.vel.y.abs() <= 0.25);
    }
}

#[test]
fn advance_moves_and_wraps() {
    let c = cx(100.0, 100.0);
    let mut field = Constellation {
        particles: vec![
            Particle {
                pos: Point::new(50.0, 50.0),
                vel: Vec2::new(0.2, 0.0),
            },
            Particle {
                pos: Point::new(99.9, 0.05),
                vel: Vec2::new(0.2, -0.2),
            },
        ],
    };
    field.advance(100.0, &c);
    let ps = field.particles();
    assert!((ps[0].pos.x - 50.2).abs() < 1e-9);
    assert_eq!(ps[1].pos.x, 0.0);
    assert_eq!(ps[1].pos.y, 100.0);
}

#[test]
fn links_fade_linearly_to_threshold() {
    let c = cx(500.0, 500.0);
    let a = Point::new(0.0, 0.0);
    let near = Constellation::link_alpha(a, Point::new(60.0, 0.0), &c).unwrap();
    assert!((near - 0.5 * 0.5 * 0.3).abs() < 1e-12);
    assert!(Constellation::link_alpha(a, Point::new(120.0, 0.0), &c).is_none());
    assert!(Constellation::link_alpha(a, Point::new(200.0, 0.0), &c).is_none());
}

#[test]
fn draw_emits_dots_then_links() {
    let c = cx(500.0, 500.0);
    let field = Constellation {
        particles: vec![
            Particle {
                pos: Point::new(10.0, 10.0),
                vel: Vec2::ZERO,
            },
            Particle {
                pos: Point::new(50.0, 10.0),
                vel: Vec2::ZERO,
            },
            Particle {
                pos: Point::new(400.0, 400.0),
                vel: Vec2::ZERO,
            },
        ],
    };
    let mut list = DisplayList::new();
    field.draw(&c, &mut list);
    assert_eq!(list.len(), 4);
    assert_eq!(list.stroke_count(), 1);
    assert!(matches!(list.ops()[3], DrawOp::Stroke { width, .. } if width == 0.5));
}

#[test]
fn relayout_keeps_count() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut field = Constellation::populate(40, &cx(100.0, 100.0), &mut rng);
    field.relayout(&cx(1000.0, 20.0), &mut rng);
    assert_eq!(field.len(), 40);
    assert!(field.particles().iter().all(|p| p.pos.y <= 20.0));
}
