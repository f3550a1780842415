//! Tests for configuration file loading.

use giotto::{BotConfig, ImageProviderKind};
use tempfile::TempDir;

#[test]
fn load_falls_back_to_defaults_when_file_is_missing() {
    let dir = TempDir::new().unwrap();
    let config = BotConfig::load(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.schedule().post_times().len(), 3);
    assert!(!*config.bot().auto_post());
}

#[test]
fn from_file_reads_and_parses() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("giotto.toml");
    std::fs::write(
        &path,
        r#"
[providers]
image = "placeholder"

[schedule]
post_times = ["07:15"]
"#,
    )
    .unwrap();

    let config = BotConfig::from_file(&path).unwrap();
    assert_eq!(*config.providers().image(), ImageProviderKind::Placeholder);
    assert_eq!(config.schedule().post_times(), &vec!["07:15".to_string()]);
}

#[test]
fn from_file_rejects_bad_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("giotto.toml");
    std::fs::write(&path, "[schedule\npost_times = 3").unwrap();

    assert!(BotConfig::from_file(&path).is_err());
}

#[test]
fn repository_sample_config_parses() {
    let config = BotConfig::from_file(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../giotto.toml"
    ))
    .unwrap();
    assert!(config.validate().is_empty());
}
