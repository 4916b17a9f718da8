use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/rapagem.db";
pub const DEFAULT_REPORTS_DIR: &str = "data/reports";
pub const DEFAULT_DETAILED_REPORT_FILE: &str = "comentarios_por_pessoa_sentimento.csv";
pub const DEFAULT_AGGREGATE_REPORT_FILE: &str = "sentimento_agregado_por_pessoa.csv";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        if raw.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(raw)
    };

    let database_url = non_empty("RAPAGEM_DATABASE_URL", DEFAULT_DATABASE_URL)?;
    let env = parse_environment(&or_default("RAPAGEM_ENV", "development"));
    let log_level = or_default("RAPAGEM_LOG_LEVEL", "info");
    let reports_dir = PathBuf::from(non_empty("RAPAGEM_REPORTS_DIR", DEFAULT_REPORTS_DIR)?);
    let detailed_report_file =
        non_empty("RAPAGEM_DETAILED_REPORT_FILE", DEFAULT_DETAILED_REPORT_FILE)?;
    let aggregate_report_file =
        non_empty("RAPAGEM_AGGREGATE_REPORT_FILE", DEFAULT_AGGREGATE_REPORT_FILE)?;
    let lexicon_path = lookup("RAPAGEM_LEXICON_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let db_max_connections = parse_u32("RAPAGEM_DB_MAX_CONNECTIONS", "4")?;
    if db_max_connections == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "RAPAGEM_DB_MAX_CONNECTIONS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let db_acquire_timeout_secs = parse_u64("RAPAGEM_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        reports_dir,
        detailed_report_file,
        aggregate_report_file,
        lexicon_path,
        db_max_connections,
        db_acquire_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
