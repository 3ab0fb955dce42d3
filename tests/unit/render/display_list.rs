use super::*;

fn fade_stops(a: u8) -> Vec<GradientStop> {
    vec![
        GradientStop {
            offset: 0.0,
            color: Rgba8Premul::from_straight_rgba(255, 255, 255, a),
        },
        GradientStop {
            offset: 1.0,
            color: Rgba8Premul::transparent(),
        },
    ]
}

#[test]
fn stop_color_pads_and_interpolates() {
    let stops = fade_stops(200);
    assert_eq!(Paint::stop_color(&stops, -1.0).a, 200);
    assert_eq!(Paint::stop_color(&stops, 0.5).a, 100);
    assert_eq!(Paint::stop_color(&stops, 2.0).a, 0);
    assert_eq!(Paint::stop_color(&[], 0.5), Rgba8Premul::transparent());
}

#[test]
fn radial_fades_with_distance() {
    let paint = Paint::Radial {
        center: Point::new(10.0, 10.0),
        radius: 10.0,
        stops: fade_stops(255),
    };
    assert_eq!(paint.color_at(Point::new(10.0, 10.0)).a, 255);
    assert_eq!(paint.color_at(Point::new(15.0, 10.0)).a, 128);
    assert_eq!(paint.color_at(Point::new(30.0, 10.0)).a, 0);
}

#[test]
fn linear_projects_onto_axis() {
    let paint = Paint::Linear {
        start: Point::new(0.0, 0.0),
        end: Point::new(0.0, 100.0),
        stops: vec![
            GradientStop {
                offset: 0.0,
                color: Rgba8Premul::transparent(),
            },
            GradientStop {
                offset: 0.5,
                color: Rgba8Premul::white(1.0),
            },
            GradientStop {
                offset: 1.0,
                color: Rgba8Premul::transparent(),
            },
        ],
    };
    assert_eq!(paint.color_at(Point::new(37.0, 50.0)).a, 255);
    assert_eq!(paint.color_at(Point::new(0.0, 0.0)).a, 0);
    assert_eq!(paint.color_at(Point::new(0.0, 100.0)).a, 0);
}

#[test]
fn list_records_in_order() {
    let mut list = DisplayList::new();
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((1.0, 1.0));
    list.fill(p.clone(), Paint::Solid(Rgba8Premul::white(0.5)));
    list.stroke(p, 1.0, Rgba8Premul::white(0.5));
    assert_eq!(list.len(), 2);
    assert_eq!(list.stroke_count(), 1);
    assert!(matches!(list.ops()[0], DrawOp::Fill { .. }));
    list.clear();
    assert!(list.is_empty());
}
