use super::*;

#[test]
fn defaults_match_booth_constants() {
    let cfg = CompositorConfig::default();
    assert_eq!(cfg.export_width, 1200);
    assert_eq!(cfg.branding_reserve, 100.0);
    assert_eq!(cfg.base_font_size, 40.0);
    assert_eq!(cfg.branding.color.to_hex(), "#db2777");
    assert_eq!(cfg.branding.weight, 700);
    assert_eq!(cfg.branding.bottom_offset, 40.0);
    assert_eq!(cfg.decoration.color, Rgba8::BLACK);
    assert!(cfg.validate().is_ok());
}

#[test]
fn empty_json_yields_defaults() {
    assert_eq!(
        CompositorConfig::from_json("{}").unwrap(),
        CompositorConfig::default()
    );
}

#[test]
fn partial_json_overrides_only_named_keys() {
    let cfg = CompositorConfig::from_json(
        r##"{"exportWidth": 600, "branding": {"color": "#000000", "sizePx": 12}}"##,
    )
    .unwrap();
    assert_eq!(cfg.export_width, 600);
    assert_eq!(cfg.branding.color, Rgba8::BLACK);
    assert_eq!(cfg.branding.size_px, 12.0);
    assert_eq!(cfg.branding.weight, 700);
    assert_eq!(cfg.branding_reserve, 100.0);
}

#[test]
fn invalid_values_are_configuration_errors() {
    for json in [
        r#"{"exportWidth": 0}"#,
        r#"{"exportWidth": 70000}"#,
        r#"{"brandingReserve": -1}"#,
        r#"{"baseFontSize": 0}"#,
        r#"not json"#,
    ] {
        let err = CompositorConfig::from_json(json).unwrap_err();
        assert!(matches!(err, BoothError::Configuration(_)), "{json}: {err}");
    }
}

#[test]
fn missing_config_file_is_reported() {
    let err = CompositorConfig::from_path("/definitely/not/here/photobooth.json").unwrap_err();
    assert!(err.to_string().contains("open compositor config"));
}
