/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;

use subsafe::app_config::{Config, LogLevel};
use subsafe::SanitizePreset;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.sanitizer.preset, SanitizePreset::Default);
    assert_eq!(config.sanitizer.max_length, None);
    assert_eq!(config.translation.target_language, "zh-TW");
    assert_eq!(config.translation.batch_size, 30);
    assert_eq!(config.translation.max_retries, 3);
    assert_eq!(config.translation.concurrent_requests, 4);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// A missing file is created with the defaults, then read back
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());
    assert_eq!(created, Config::default());

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded, created);
    Ok(())
}

#[test]
fn test_fromFile_withPartialConfig_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{
            "sanitizer": { "preset": "vtt", "max_length": 80 },
            "translation": { "batch_size": 10 }
        }"#,
    )?;

    let config = Config::from_file(&path)?;
    assert_eq!(config.sanitizer.preset, SanitizePreset::Vtt);
    assert_eq!(config.sanitizer.max_length, Some(80));
    assert_eq!(config.translation.batch_size, 10);
    assert_eq!(config.translation.context_size, 2);
    assert!(config.validate().is_ok());
    Ok(())
}

#[test]
fn test_fromFile_withInvalidJson_shouldFailWithPath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    let error = Config::from_file(&path).unwrap_err();
    assert!(error.to_string().contains("conf.json"));
    Ok(())
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.translation.concurrent_requests = 0;
    assert!(config.validate().is_err());
    config.translation.concurrent_requests = 1;

    config.translation.target_language = String::new();
    assert!(config.validate().is_err());
    config.translation.target_language = "ja".to_string();

    config.sanitizer.max_length = Some(1);
    assert!(config.validate().is_ok());
}
