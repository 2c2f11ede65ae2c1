use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use osba::config::Config;
use osba::scanner::MatchMode;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_config_load_defaults() {
    // Use figment directly without Env to avoid interference from other tests
    let figment = Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.session.logger_name, "root");
    assert_eq!(config.scanner.source_dir, PathBuf::from("/mnt/nfs/rockyheights"));
}

#[test]
fn test_config_load_from_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
[session]
data_file_name = "session.json"
seed_min = 10
seed_max = 20

[scanner]
name_file = "/etc/osba/name.txt"
match_mode = "containment"
"#;
    fs::write(&config_path, toml_content).unwrap();

    let figment =
        Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&config_path));
    let config: Config = figment.extract().unwrap();

    assert_eq!(config.session.data_file_name, "session.json");
    assert_eq!(config.session.log_file_name, "osba_log_file.txt");
    assert_eq!(config.session.seed_range(), 10..=20);
    assert_eq!(config.scanner.name_file, PathBuf::from("/etc/osba/name.txt"));
    assert_eq!(config.scanner.match_mode, MatchMode::Containment);
    assert_eq!(
        config.scanner.report_file,
        PathBuf::from("BREACH---PII_matched_data.txt")
    );
}

#[test]
fn test_to_toml_round_trip_through_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let mut config = Config::default();
    config.session.logger_name = "osba".to_string();
    config.scanner.match_mode = MatchMode::Containment;
    fs::write(&config_path, config.to_toml().unwrap()).unwrap();

    let loaded: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&config_path))
        .extract()
        .unwrap();
    assert_eq!(loaded, config);
}
