use super::*;
use crate::foundation::core::{BezPath, Rgba8Premul};

#[test]
fn backing_store_tracks_element_times_ratio() {
    let mut c = OverlayCanvas::new(Size::new(100.5, 50.0), 2.0, BlendMode::Screen);
    assert_eq!(c.backing_size(), (201, 100));
    assert_eq!(c.extent(), Size::new(201.0, 100.0));
    assert!(!c.needs_resize());

    c.set_element_size(Size::new(80.0, 40.0));
    assert!(c.needs_resize());
    c.resize(1.0);
    assert_eq!(c.backing_size(), (80, 40));
    assert_eq!(c.blend(), BlendMode::Screen);
}

#[test]
fn low_density_displays_get_a_smaller_store() {
    let c = OverlayCanvas::new(Size::new(400.0, 101.0), 0.75, BlendMode::Normal);
    assert_eq!(c.backing_size(), (300, 75));
}

#[test]
fn resize_and_clear_drop_drawing() {
    let mut c = OverlayCanvas::new(Size::new(10.0, 10.0), 1.0, BlendMode::Normal);
    c.display_list_mut()
        .stroke(BezPath::new(), 1.0, Rgba8Premul::white(1.0));
    assert_eq!(c.display_list().len(), 1);
    c.clear();
    assert!(c.display_list().is_empty());

    c.display_list_mut()
        .stroke(BezPath::new(), 1.0, Rgba8Premul::white(1.0));
    c.resize(1.0);
    assert!(c.display_list().is_empty());
}
