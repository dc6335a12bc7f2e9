use super::*;

#[test]
fn empty_json_yields_defaults() {
    let cfg = IntroConfig::from_json("{}").unwrap();
    assert_eq!(cfg, IntroConfig::default());
    assert_eq!(cfg.void.particle_count, 140);
    assert_eq!(cfg.void.refresh_hz, 60);
    assert_eq!(cfg.boot_delay, Duration::from_millis(700));
    assert_eq!(cfg.lore.resolved_lines().len(), 5);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_overrides_nested_fields() {
    let cfg = IntroConfig::from_json(
        r#"{
            "lore": { "lines": ["a", "bc"], "timing": { "type_speed": 5 } },
            "void": { "seed": 9 },
            "viewport": { "width": 320, "height": 200 },
            "boot_delay_ms": 100
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.lore.resolved_lines(), vec!["a", "bc"]);
    assert_eq!(cfg.lore.timing.type_speed, Duration::from_millis(5));
    assert_eq!(cfg.lore.timing.archive_hold, Duration::from_millis(1200));
    assert_eq!(cfg.void.seed, 9);
    assert_eq!(cfg.void.particle_count, 140);
    assert_eq!(cfg.viewport.device_pixel_ratio, 1.0);
    assert_eq!(cfg.boot_delay, Duration::from_millis(100));
    assert_eq!(cfg.fade_ease, Ease::InOutQuad);
}

#[test]
fn fade_ease_is_selected_by_name() {
    let cfg = IntroConfig::from_json(r#"{ "fade_ease": "out_cubic" }"#).unwrap();
    assert_eq!(cfg.fade_ease, Ease::OutCubic);
    assert!(IntroConfig::from_json(r#"{ "fade_ease": "bounce" }"#).is_err());
}

#[test]
fn validate_rejects_bad_values() {
    let mut cfg = IntroConfig::default();
    cfg.lore.lines = Some(Vec::new());
    assert!(cfg.validate().is_err());

    let mut cfg = IntroConfig::default();
    cfg.audio.volume = 1.5;
    assert!(cfg.validate().is_err());

    let mut cfg = IntroConfig::default();
    cfg.viewport.width = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = IntroConfig::default();
    cfg.void.refresh_hz = 0;
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("refresh_hz"));
}

#[test]
fn overrides_ignore_garbage_and_zero() {
    let mut cfg = IntroConfig::default();
    cfg.apply_overrides(Some("42"), Some("144"));
    assert_eq!(cfg.void.seed, 42);
    assert_eq!(cfg.void.refresh_hz, 144);

    cfg.apply_overrides(Some("nope"), Some("0"));
    assert_eq!(cfg.void.seed, 42);
    assert_eq!(cfg.void.refresh_hz, 144);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = IntroConfig::from_json("{").unwrap_err();
    assert!(err.to_string().starts_with("serialization error:"));
}
