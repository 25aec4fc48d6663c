//! Tests for loading pipeline configuration files.

use std::path::PathBuf;

use songplay_model::{ConfigError, PipelineConfig, SaveMode};

#[test]
fn loads_minimal_config_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pipeline.json");
    std::fs::write(
        &path,
        r#"{
            "catalog": {"location": "/lake/in", "pattern": "song_data/*/*/*/*.json"},
            "activity": {"location": "/lake/in", "pattern": "log_data/*/*/*.json"},
            "output": "/lake/out"
        }"#,
    )
    .unwrap();

    let config = PipelineConfig::from_json_file(&path).unwrap();

    assert_eq!(config.output, PathBuf::from("/lake/out"));
    assert_eq!(config.play_action, "NextSong");
    assert_eq!(config.save_mode, SaveMode::ErrorIfExists);
    assert!(config.field_overrides.is_empty());
    assert!(!config.dry_run);
    config.validate().unwrap();
}

#[test]
fn loads_overrides_and_save_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pipeline.json");
    std::fs::write(
        &path,
        r#"{
            "catalog": {"location": "songs", "pattern": "*.json"},
            "activity": {"location": "logs", "pattern": "*/*.json"},
            "output": "out",
            "play_action": "PlaySong",
            "save_mode": "overwrite",
            "field_overrides": {"activity": {"ts": "timestamp"}}
        }"#,
    )
    .unwrap();

    let config = PipelineConfig::from_json_file(&path).unwrap();

    assert_eq!(config.play_action, "PlaySong");
    assert_eq!(config.save_mode, SaveMode::Overwrite);
    assert_eq!(
        config.field_overrides.activity.get("ts").map(String::as_str),
        Some("timestamp")
    );
    config.validate().unwrap();
}

#[test]
fn missing_file_is_read_error() {
    let err = PipelineConfig::from_json_file(&PathBuf::from("/no/such/pipeline.json"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn malformed_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pipeline.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = PipelineConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("pipeline.json"));
}
