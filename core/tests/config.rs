use hamlet_core::{
    accrual::{ProductionTable, Rate},
    config::{TrackerConfig, DEFAULT_ROSTER},
    error::TrackerError,
    player::{BuildingKind, ResourceKind},
};

#[test]
fn shipped_config_matches_defaults() {
    let config = TrackerConfig::from_json_str(include_str!("../../data/tracker.json"))
        .expect("shipped config parses");
    assert_eq!(config, TrackerConfig::default());
}

#[test]
fn defaults_describe_fifteen_minute_blocks() {
    let config = TrackerConfig::default();
    assert_eq!(config.roster.len(), DEFAULT_ROSTER.len());
    assert_eq!(config.block_duration_ms, 900_000);
    assert_eq!(config.tick_interval_ms, 1_000);
    assert_eq!(config.fast_forward_ms(), 900_000);
    assert_eq!(config.production, ProductionTable::default());
}

#[test]
fn partial_config_keeps_other_defaults() {
    let config = TrackerConfig::from_json_str(
        r#"{ "roster": ["a", "b"], "block_duration_ms": 60000 }"#,
    )
    .unwrap();

    assert_eq!(config.roster, vec!["a", "b"]);
    assert_eq!(config.block_duration_ms, 60_000);
    assert_eq!(config.tick_interval_ms, 1_000);
}

#[test]
fn fast_forward_defaults_to_one_block() {
    let config = TrackerConfig::from_json_str(r#"{ "block_duration_ms": 420000 }"#).unwrap();
    assert_eq!(config.fast_forward_ms, None);
    assert_eq!(config.fast_forward_ms(), 420_000);

    let config = TrackerConfig::from_json_str(r#"{ "fast_forward_ms": 1800000 }"#).unwrap();
    assert_eq!(config.fast_forward_ms(), 1_800_000);
}

#[test]
fn fast_forward_must_cover_whole_blocks() {
    for raw in [
        r#"{ "fast_forward_ms": 1000000 }"#,
        r#"{ "block_duration_ms": 60000, "fast_forward_ms": 90000 }"#,
    ] {
        assert!(
            matches!(TrackerConfig::from_json_str(raw), Err(TrackerError::InvalidConfig(_))),
            "{raw} should be rejected"
        );
    }
}

#[test]
fn production_rules_parse() {
    let config = TrackerConfig::from_json_str(
        r#"{ "production": [
            { "resource": "iron", "building": "mine", "rule": "threshold", "min_level": 3, "amount": 2 }
        ] }"#,
    )
    .unwrap();

    let rule = config.production.rules[0];
    assert_eq!(rule.resource, ResourceKind::Iron);
    assert_eq!(rule.building, BuildingKind::Mine);
    assert_eq!(rule.rate, Rate::Threshold { min_level: 3, amount: 2 });
}

#[test]
fn invalid_configs_are_rejected() {
    for raw in [
        r#"{ "roster": [] }"#,
        r#"{ "block_duration_ms": 0 }"#,
        r#"{ "tick_interval_ms": 0 }"#,
        r#"{ "fast_forward_ms": 0 }"#,
    ] {
        assert!(
            matches!(TrackerConfig::from_json_str(raw), Err(TrackerError::InvalidConfig(_))),
            "{raw} should be rejected"
        );
    }
}

#[test]
fn unknown_resource_in_config_fails_to_parse() {
    let err = TrackerConfig::from_json_str(
        r#"{ "production": [ { "resource": "gold", "building": "mine", "rule": "per_level", "multiplier": 1 } ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, TrackerError::Serialization(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = TrackerConfig::load("/nonexistent/hamlet/tracker.json").unwrap_err();
    assert!(matches!(err, TrackerError::Io(_)));
}
