use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(parse_environment("development"), Environment::Development);
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test"), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.reports_dir, PathBuf::from("data/reports"));
    assert_eq!(
        cfg.detailed_report_path(),
        PathBuf::from("data/reports/comentarios_por_pessoa_sentimento.csv")
    );
    assert_eq!(
        cfg.aggregate_report_path(),
        PathBuf::from("data/reports/sentimento_agregado_por_pessoa.csv")
    );
    assert!(cfg.lexicon_path.is_none());
    assert_eq!(cfg.db_max_connections, 4);
    assert_eq!(cfg.db_acquire_timeout_secs, 10);
}

#[test]
fn build_app_config_overrides() {
    let mut map = HashMap::new();
    map.insert("RAPAGEM_DATABASE_URL", "sqlite::memory:");
    map.insert("RAPAGEM_ENV", "production");
    map.insert("RAPAGEM_REPORTS_DIR", "/tmp/out");
    map.insert("RAPAGEM_LEXICON_PATH", "config/lexicon.yaml");
    map.insert("RAPAGEM_DB_MAX_CONNECTIONS", "8");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.database_url, "sqlite::memory:");
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.reports_dir, PathBuf::from("/tmp/out"));
    assert_eq!(cfg.lexicon_path, Some(PathBuf::from("config/lexicon.yaml")));
    assert_eq!(cfg.db_max_connections, 8);
}

#[test]
fn blank_lexicon_path_is_treated_as_unset() {
    let mut map = HashMap::new();
    map.insert("RAPAGEM_LEXICON_PATH", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.lexicon_path.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_max_connections() {
    let mut map = HashMap::new();
    map.insert("RAPAGEM_DB_MAX_CONNECTIONS", "many");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RAPAGEM_DB_MAX_CONNECTIONS"),
        "expected InvalidEnvVar(RAPAGEM_DB_MAX_CONNECTIONS), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_zero_max_connections() {
    let mut map = HashMap::new();
    map.insert("RAPAGEM_DB_MAX_CONNECTIONS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}

#[test]
fn build_app_config_fails_with_invalid_acquire_timeout() {
    let mut map = HashMap::new();
    map.insert("RAPAGEM_DB_ACQUIRE_TIMEOUT_SECS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RAPAGEM_DB_ACQUIRE_TIMEOUT_SECS"),
        "got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_empty_reports_dir() {
    let mut map = HashMap::new();
    map.insert("RAPAGEM_REPORTS_DIR", "");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RAPAGEM_REPORTS_DIR"),
        "got: {result:?}"
    );
}
