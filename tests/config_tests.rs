//! Integration tests for the layered configuration.
//!
//! These tests cover defaults, TOML files, `DUPEREVIEW_*` environment
//! overrides, and how CLI flags are merged on top.

use clap::Parser;
use dupereview::cli::{Cli, Commands};
use dupereview::config::Config;
use dupereview::duplicates::EquivalenceMode;
use dupereview::ScanSettings;
use std::fs;
use std::sync::Mutex;
use tempfile::tempdir;

// =============================================================================
// Helper Functions
// =============================================================================

static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Clear all DUPEREVIEW_* environment variables to avoid interference.
fn clear_env() {
    for (key, _) in std::env::vars() {
        if key.starts_with("DUPEREVIEW_") {
            std::env::remove_var(key);
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_config_missing_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let temp_dir = tempdir().unwrap();

    let config = Config::try_load_from_path(temp_dir.path().join("absent.toml")).unwrap();

    assert_eq!(config, Config::default());
}

#[test]
fn test_config_load_from_toml() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    fs::write(
        &config_path,
        r#"
mode = "name-and-size"
permanent_delete = true
skip_hidden = true
"#,
    )
    .unwrap();

    let config = Config::try_load_from_path(&config_path).unwrap();

    assert_eq!(config.mode, EquivalenceMode::ByNameAndSize);
    assert!(config.permanent_delete);
    assert!(config.skip_hidden);
    assert!(!config.follow_symlinks);
}

#[test]
fn test_env_overrides_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "mode = \"name\"\nfollow_symlinks = false\n").unwrap();

    std::env::set_var("DUPEREVIEW_MODE", "size");
    std::env::set_var("DUPEREVIEW_FOLLOW_SYMLINKS", "true");
    let config = Config::try_load_from_path(&config_path).unwrap();
    clear_env();

    assert_eq!(config.mode, EquivalenceMode::BySize);
    assert!(config.follow_symlinks);
}

#[test]
fn test_malformed_file_reports_error_and_falls_back() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "mode = [not toml").unwrap();

    assert!(Config::try_load_from_path(&config_path).is_err());
    assert_eq!(Config::load_from_path(&config_path), Config::default());
}

#[test]
fn test_wrong_type_falls_back() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "skip_hidden = \"often\"\n").unwrap();

    assert!(Config::try_load_from_path(&config_path).is_err());
    assert_eq!(Config::load_from_path(&config_path), Config::default());
}

// =============================================================================
// CLI Merging
// =============================================================================

fn report_settings(args: &[&str], config: &Config) -> ScanSettings {
    let cli = Cli::try_parse_from(args).unwrap();
    match cli.command {
        Commands::Report(report) => ScanSettings::resolve(&report.compare, config),
        Commands::Review(_) => panic!("expected report command"),
    }
}

#[test]
fn test_cli_selectors_override_config_mode() {
    let config = Config {
        mode: EquivalenceMode::ByName,
        ..Config::default()
    };

    let settings = report_settings(&["dupereview", "report", "/tmp", "--by-size"], &config);

    assert_eq!(settings.mode, Some(EquivalenceMode::BySize));
}

#[test]
fn test_config_mode_used_without_selectors() {
    let config = Config {
        mode: EquivalenceMode::ByNameAndSize,
        skip_hidden: true,
        ..Config::default()
    };

    let settings = report_settings(&["dupereview", "report", "/tmp"], &config);

    assert_eq!(settings.mode, Some(EquivalenceMode::ByNameAndSize));
    assert!(settings.walker.skip_hidden);
    assert!(!settings.walker.follow_symlinks);
}

#[test]
fn test_cli_walker_flags_switch_options_on() {
    let settings = report_settings(
        &["dupereview", "report", "/tmp", "--follow-symlinks", "--skip-hidden"],
        &Config::default(),
    );

    assert!(settings.walker.follow_symlinks);
    assert!(settings.walker.skip_hidden);
}
