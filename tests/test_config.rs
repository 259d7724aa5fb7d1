//! Tests for loading runner configuration from disk and its effect on
//! new realms.

extern crate protoscope;

use protoscope::runner::api::run_script;
use protoscope::runner::ds::error::JErrorType;
use protoscope::runner::ds::value::JsValue;
use protoscope::runner::plugin::config::{ConfigError, RunnerConfig, DEFAULT_MAX_CALL_DEPTH};
use protoscope::runner::plugin::types::EvalContext;
use std::fs;

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = dir.path().join("protoscope.toml");
    fs::write(&path, "fail_fast = true\nfilter = \"Cats\"\n").expect("write config");

    let config = RunnerConfig::load(&path).unwrap();
    assert!(config.fail_fast);
    assert_eq!(config.filter.as_deref(), Some("Cats"));
    assert_eq!(config.max_call_depth, DEFAULT_MAX_CALL_DEPTH);
}

#[test]
fn test_discover_explicit_path() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = dir.path().join("custom.toml");
    fs::write(&path, "max_call_depth = 32\n").expect("write config");

    let config = RunnerConfig::discover(Some(path.as_path())).unwrap();
    assert_eq!(config.max_call_depth, 32);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let result = RunnerConfig::load(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "fail_fast = \"sometimes\"\n").expect("write config");
    assert!(matches!(RunnerConfig::load(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn test_custom_aliases_reach_the_realm() {
    let config = RunnerConfig::parse(r#"global_aliases = ["self"]"#).unwrap();
    let mut ctx = EvalContext::with_config(config);
    let result = run_script("function who() { return this; } who() === self", &mut ctx);
    assert_eq!(result.unwrap(), JsValue::Boolean(true));

    let window = run_script("window", &mut ctx);
    assert_eq!(window, Err(JErrorType::UnboundName("window".to_string())));
}

#[test]
fn test_call_depth_from_config() {
    let config = RunnerConfig::parse("max_call_depth = 3").unwrap();
    let mut ctx = EvalContext::with_config(config);
    let ok = run_script(
        "function a() { return b(); } function b() { return c(); } function c() { return 'deep'; } a()",
        &mut ctx,
    );
    assert_eq!(ok.unwrap(), JsValue::String("deep".to_string()));
    let too_deep = run_script("function d() { return a(); } d()", &mut ctx);
    assert!(matches!(too_deep, Err(JErrorType::RangeError(_))));
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = RunnerConfig {
        filter: Some("scope".to_string()),
        ..RunnerConfig::default()
    };
    let text = toml::to_string(&config).expect("serialize config");
    assert_eq!(RunnerConfig::parse(&text).unwrap(), config);
}
