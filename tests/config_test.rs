// tests/config_test.rs
use nextver::config::{load_config, Config, CONFIG_FILE_NAME};
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.initial_version, "1.0.0");
    assert_eq!(config.changelog.author_url_base, "https://github.com");
    assert!(config
        .exclusions
        .subjects
        .contains(&"^Merge pull request".to_string()));
    assert!(config.paths.non_substantive.contains(&"**/*.md".to_string()));
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
initial_version = "0.1.0"

[exclusions]
authors = ["^release-bot$"]

[paths]
non_substantive = ["docs/**"]

[changelog]
author_url_base = "https://git.example.com"
categorized = true
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.initial_version, "0.1.0");
    assert_eq!(config.exclusions.authors, vec!["^release-bot$"]);
    assert_eq!(config.paths.non_substantive, vec!["docs/**"]);
    assert_eq!(config.changelog.author_url_base, "https://git.example.com");
    assert!(config.changelog.categorized);
    // Unset keys keep their defaults
    assert_eq!(
        config.exclusions.subjects,
        Config::default().exclusions.subjects
    );
    assert_eq!(
        config.changelog.skip_markers,
        vec!["Update VERSION to", "[skip ci]"]
    );
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(load_config(Some(missing.to_str().unwrap())).is_err());
}

#[test]
fn test_invalid_file_is_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[changelog]\ncategorized = \"yes\"\n").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().contains("not valid TOML"));
}

#[test]
#[serial]
fn test_discovers_file_in_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "initial_version = \"2.0.0\"\n",
    )
    .unwrap();

    let original = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let loaded = load_config(None);
    env::set_current_dir(original).unwrap();

    assert_eq!(loaded.unwrap().initial_version, "2.0.0");
}
