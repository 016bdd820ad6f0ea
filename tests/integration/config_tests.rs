use dupereview::config::Config;
use dupereview::duplicates::EquivalenceMode;
use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_load_defaults() {
    // Figment without Env so parallel tests cannot interfere.
    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .extract()
        .unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.mode, EquivalenceMode::ByName);
}

#[test]
fn test_config_mode_names_in_toml() {
    for (text, expected) in [
        ("name", EquivalenceMode::ByName),
        ("size", EquivalenceMode::BySize),
        ("name-and-size", EquivalenceMode::ByNameAndSize),
    ] {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::string(&format!("mode = \"{}\"", text)))
            .extract()
            .unwrap();
        assert_eq!(config.mode, expected);
    }
}

#[test]
fn test_config_rejects_unknown_mode() {
    let result: Result<Config, _> = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::string("mode = \"content\""))
        .extract();
    assert!(result.is_err());
}

#[test]
fn test_config_save_and_reload_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("config.toml");

    let config = Config {
        mode: EquivalenceMode::BySize,
        follow_symlinks: true,
        ..Config::default()
    };
    config.save_to_path(&path).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("mode = \"size\""));

    let loaded: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .extract()
        .unwrap();
    assert_eq!(loaded, config);
}
