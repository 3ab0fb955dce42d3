use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn from_tile_maps_display_onto_tile() {
    let container = Rect::new(0.0, 0.0, 1000.0, 600.0);
    let tile = Rect::new(200.0, 200.0, 400.0, 400.0);
    let s = ZoomStyle::from_tile(tile, container, 6.0);
    // s = max(1000/200, 600/200) = 5
    let c = s.transform.as_coeffs();
    assert!(close(c[0], 0.2));
    assert!(close(c[3], 0.2));
    assert!(close(s.origin().x, 200.0));
    assert!(close(s.origin().y, 200.0));
    assert_eq!(s.opacity, 0.0);
    assert_eq!(s.blur_px, 6.0);
}

#[test]
fn leaving_overscales_about_centre() {
    let s = ZoomStyle::leaving(Size::new(100.0, 50.0), 4.0);
    let centre = s.transform * Point::new(50.0, 25.0);
    assert!(close(centre.x, 50.0));
    assert!(close(centre.y, 25.0));
    assert!(close(s.transform.as_coeffs()[0], 1.1));
}

#[test]
fn css_strings() {
    let s = ZoomStyle::rest(1.0);
    assert_eq!(s.css_transform(), "matrix(1, 0, 0, 1, 0, 0)");
    assert_eq!(s.css_filter(), "none");
    let blurred = ZoomStyle {
        blur_px: 6.0,
        ..s
    };
    assert_eq!(blurred.css_filter(), "blur(6px)");

    let tr = StyleTransition {
        duration_ms: 900,
        ease: Ease::InOutCubic,
        css_easing: "ease-in-out".to_owned(),
    };
    assert_eq!(
        tr.css(),
        "transform 900ms ease-in-out, opacity 900ms ease-in-out, filter 900ms ease-in-out"
    );
}

#[test]
fn stage_freezes_mid_transition() {
    let mut stage = ZoomStage::new();
    let start = ZoomStyle {
        transform: Affine::IDENTITY,
        opacity: 0.0,
        blur_px: 6.0,
    };
    stage.show(
        MediaClone::of(&MediaSource::image("a.jpg")),
        Size::new(100.0, 100.0),
        start,
        Millis(0),
    );
    stage.transition_to(
        ZoomStyle::rest(1.0),
        StyleTransition {
            duration_ms: 100,
            ease: Ease::Linear,
            css_easing: "linear".to_owned(),
        },
        Millis(0),
    );
    stage.freeze(Millis(50));
    let frozen = stage.sample(Millis(1_000)).unwrap();
    assert!(close(frozen.opacity, 0.5));
    assert!(close(frozen.blur_px, 3.0));
    assert!(stage.transition().is_none());
}

#[test]
fn stage_video_playback_and_rejection() {
    let mut stage = ZoomStage::new();
    let clone = MediaClone::of(&MediaSource::video("v.mp4", None));
    assert!(clone.muted && clone.looped && clone.plays_inline);
    stage.show(clone.clone(), Size::ZERO, ZoomStyle::rest(1.0), Millis(0));
    stage.play_video().unwrap();
    assert!(stage.video_playing());
    stage.pause_videos();
    assert!(!stage.video_playing());

    stage.reject_autoplay = true;
    assert!(matches!(stage.play_video(), Err(HeroError::Playback(_))));

    stage.clear();
    assert!(!stage.is_active());
    assert!(stage.sample(Millis(0)).is_none());
}
