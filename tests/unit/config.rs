use super::*;

#[test]
fn empty_document_yields_defaults() {
    let cfg = CompositorConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, CompositorConfig::default());
    assert_eq!(cfg.threshold, Threshold::DEFAULT);
    assert_eq!(cfg.fallback_timeout(), Duration::from_millis(1500));
}

#[test]
fn partial_threshold_keeps_other_defaults() {
    let cfg = CompositorConfig::from_json_str(
        r#"{ "threshold": { "green_min": 120 }, "keying": "parallel" }"#,
    )
    .unwrap();
    assert_eq!(cfg.threshold.green_min, 120);
    assert_eq!(cfg.threshold.green_vs_red, 1.4);
    assert_eq!(cfg.keying, KeyingMode::Parallel);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = CompositorConfig::from_json_str(r#"{ "tolerance": 0.3 }"#).unwrap_err();
    assert!(err.to_string().contains("config error:"));
}

#[test]
fn invalid_values_fail_validation() {
    assert!(CompositorConfig::from_json_str(r#"{ "refresh": { "num": 60, "den": 0 } }"#).is_err());
    let mut cfg = CompositorConfig::default();
    cfg.threshold.green_vs_blue = f64::NAN;
    assert!(cfg.validate().is_err());
}

#[test]
fn json_roundtrip_preserves_config() {
    let cfg = CompositorConfig {
        fallback_timeout_ms: 250,
        keying: KeyingMode::Parallel,
        ..CompositorConfig::default()
    };
    let s = serde_json::to_string(&cfg).unwrap();
    assert_eq!(CompositorConfig::from_json_str(&s).unwrap(), cfg);
}

#[test]
fn from_path_reports_missing_file() {
    let err = CompositorConfig::from_path(Path::new("does/not/exist.json")).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}
