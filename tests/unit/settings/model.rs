use super::*;

#[test]
fn defaults_match_builtin_configuration() {
    let s = HeroSettings::default();
    assert!(s.media.is_empty());
    assert_eq!(s.order, TileOrder::Ltr);
    assert_eq!(s.timing.display_duration, 3000);
    assert_eq!(s.timing.zoom_in_duration, 900);
    assert_eq!(s.timing.zoom_out_duration, 700);
    assert_eq!(s.effects.blur_px, 6);
    assert_eq!(s.layers.mid.overlay.kind, OverlayType::Constellation);
    assert_eq!(s.layers.mid.overlay.density, Density::Medium);
    assert_eq!(s.grids.pc, "5x3");
}

#[test]
fn partial_payload_fills_defaults() {
    let s: HeroSettings = serde_json::from_value(serde_json::json!({
        "order": "rtl",
        "timing": { "displayDuration": 4000 },
        "layers": { "mid": { "overlay": { "type": "soft-waves", "density": "high" } } }
    }))
    .unwrap();
    assert_eq!(s.order, TileOrder::Rtl);
    assert_eq!(s.timing.display_duration, 4000);
    assert_eq!(s.timing.zoom_in_duration, 900);
    assert_eq!(s.layers.mid.overlay.kind, OverlayType::SoftWaves);
    assert_eq!(s.layers.mid.overlay.density, Density::High);
    assert_eq!(s.layers.mid.overlay.opacity, 0.25);
}

#[test]
fn unknown_enum_strings_fall_back() {
    let s: HeroSettings = serde_json::from_value(serde_json::json!({
        "order": "diagonal",
        "layers": { "mid": { "overlay": { "type": "fireworks", "blendMode": "xor" } } }
    }))
    .unwrap();
    assert_eq!(s.order, TileOrder::Ltr);
    assert_eq!(s.layers.mid.overlay.kind, OverlayType::Constellation);
    assert_eq!(s.layers.mid.overlay.blend_mode, BlendMode::Normal);
}

#[test]
fn grid_strings_resolve_per_breakpoint() {
    assert_eq!(parse_grid("4x2"), Some(GridDims { cols: 4, rows: 2 }));
    assert_eq!(parse_grid("0x2"), None);
    assert_eq!(parse_grid("wide"), None);

    let grids = Grids {
        pc: "5x4".to_owned(),
        tablet: "7x7".to_owned(),
        phone: "bogus".to_owned(),
    };
    assert_eq!(grids.grid(Breakpoint::Pc), GridDims { cols: 5, rows: 4 });
    assert_eq!(grids.grid(Breakpoint::Tablet), GridDims { cols: 4, rows: 2 });
    assert_eq!(grids.grid(Breakpoint::Phone), GridDims { cols: 3, rows: 2 });
}

#[test]
fn density_steps_down_to_low() {
    assert_eq!(Density::High.lower(), Some(Density::Medium));
    assert_eq!(Density::Medium.lower(), Some(Density::Low));
    assert_eq!(Density::Low.lower(), None);
    assert_eq!(Density::parse(" HIGH "), Some(Density::High));
    assert_eq!(BlendMode::parse("screen"), Some(BlendMode::Screen));
}
