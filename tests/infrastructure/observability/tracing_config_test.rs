use question_relay::infrastructure::observability::TracingConfig;

#[test]
fn given_default_config_when_created_then_has_environment_and_filter() {
    let config = TracingConfig::default();
    assert!(!config.environment.is_empty());
    assert!(config.default_filter.contains("question_relay=debug"));
}

#[test]
fn given_blank_level_when_building_from_settings_then_uses_default_filter() {
    let config = TracingConfig::from_settings("Test", "  ", true);
    assert_eq!(config.environment, "Test");
    assert!(config.json_format);
    assert!(config.default_filter.starts_with("info"));
}

#[test]
fn given_level_when_building_from_settings_then_uses_it_as_filter() {
    let config = TracingConfig::from_settings("Prod", "warn,question_relay=info", false);
    assert_eq!(config.default_filter, "warn,question_relay=info");
}
