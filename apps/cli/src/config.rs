use std::str::FromStr;

use onchain_etl_core::LoadMode;
use onchain_etl_provider::QueryVariant;
use thiserror::Error;

pub const DEFAULT_DB_PATH: &str = "./db/etl.db";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Settings for one run, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub db_path: String,
    pub variant: QueryVariant,
    pub load_mode: LoadMode,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("BITQUERY_API_KEY").ok_or(ConfigError::Missing("BITQUERY_API_KEY"))?;
        let db_path = get("ETL_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        let variant = match get("ETL_QUERY_VARIANT") {
            Some(raw) => raw.parse::<QueryVariant>().map_err(|e| ConfigError::Invalid {
                key: "ETL_QUERY_VARIANT",
                reason: e.to_string(),
            })?,
            None => QueryVariant::default(),
        };
        let load_mode = match get("ETL_LOAD_MODE") {
            Some(raw) => raw.parse::<LoadMode>().map_err(|e| ConfigError::Invalid {
                key: "ETL_LOAD_MODE",
                reason: e.to_string(),
            })?,
            None => LoadMode::default(),
        };
        let log_format = match get("ETL_LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>().map_err(|reason| ConfigError::Invalid {
                key: "ETL_LOG_FORMAT",
                reason,
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            api_key: api_key.trim().to_string(),
            db_path,
            variant,
            load_mode,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = Config::from_lookup(lookup(&[("BITQUERY_API_KEY", "secret")])).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.db_path, DEFAULT_DB_PATH);
        assert_eq!(config.variant, QueryVariant::Transfers);
        assert_eq!(config.load_mode, LoadMode::SkipConflicts);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn missing_or_blank_key_is_rejected() {
        assert_eq!(
            Config::from_lookup(lookup(&[])).unwrap_err(),
            ConfigError::Missing("BITQUERY_API_KEY")
        );
        assert_eq!(
            Config::from_lookup(lookup(&[("BITQUERY_API_KEY", "  ")])).unwrap_err(),
            ConfigError::Missing("BITQUERY_API_KEY")
        );
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("BITQUERY_API_KEY", "secret"),
            ("ETL_DB_PATH", "/tmp/etl.db"),
            ("ETL_QUERY_VARIANT", "dex-trades"),
            ("ETL_LOAD_MODE", "append"),
            ("ETL_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, "/tmp/etl.db");
        assert_eq!(config.variant, QueryVariant::DexTrades);
        assert_eq!(config.load_mode, LoadMode::Append);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_values_name_the_key() {
        let err = Config::from_lookup(lookup(&[
            ("BITQUERY_API_KEY", "secret"),
            ("ETL_LOAD_MODE", "merge"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ETL_LOAD_MODE", .. }));

        let err = Config::from_lookup(lookup(&[
            ("BITQUERY_API_KEY", "secret"),
            ("ETL_QUERY_VARIANT", "swaps"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ETL_QUERY_VARIANT", .. }));
    }
}
