use super::*;

const ALL: [Ease; 7] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn css_keywords_map() {
    assert_eq!(Ease::from_css("linear"), Some(Ease::Linear));
    assert_eq!(Ease::from_css(" Ease-In-Out "), Some(Ease::InOutCubic));
    assert_eq!(Ease::from_css("cubic-bezier(0.1, 0.2, 0.3, 0.4)"), None);
}
