use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [255, 255, 255, 0], 1.0), dst);
}

#[test]
fn over_dst_transparent_returns_src() {
    let src = [100, 110, 120, 200];
    assert_eq!(over([0, 0, 0, 0], src, 1.0), src);
}

#[test]
fn over_opacity_scales_src() {
    let out = over([0, 0, 0, 0], [200, 200, 200, 200], 0.5);
    assert_eq!(out, [100, 100, 100, 100]);
}

#[test]
fn multiply_darkens_and_screen_lightens() {
    let grey = [128, 128, 128, 255];
    let mid = [128, 128, 128, 255];
    let m = blend(grey, mid, BlendMode::Multiply, 1.0);
    let s = blend(grey, mid, BlendMode::Screen, 1.0);
    assert!(m[0] < 128, "multiply {m:?}");
    assert!(s[0] > 128, "screen {s:?}");
    assert_eq!(m[3], 255);
    assert_eq!(s[3], 255);
}

#[test]
fn white_multiply_is_identity_on_opaque_dst() {
    let dst = [40, 80, 120, 255];
    assert_eq!(blend(dst, [255, 255, 255, 255], BlendMode::Multiply, 1.0), dst);
}

#[test]
fn overlay_keeps_black_black() {
    let out = blend([0, 0, 0, 255], [255, 255, 255, 255], BlendMode::Overlay, 1.0);
    assert_eq!(out, [0, 0, 0, 255]);
}

#[test]
fn non_normal_over_transparent_is_source() {
    let src = [100, 100, 100, 200];
    assert_eq!(blend([0, 0, 0, 0], src, BlendMode::Screen, 1.0), src);
}

#[test]
fn blend_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(blend_in_place(&mut dst, &[0u8; 4], BlendMode::Normal, 1.0).is_err());
    blend_in_place(&mut dst, &[255u8; 8], BlendMode::Normal, 1.0).unwrap();
    assert_eq!(dst, vec![255u8; 8]);
}
