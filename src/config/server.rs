//! Server settings from environment variables.

use crate::error::ConfigError;
use crate::store::is_plain_identifier;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/students";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

/// Where student records live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL table reached through `DATABASE_URL`.
    Postgres,
    /// Process-local store; contents are lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::UnknownStore(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Schema holding the `student` table.
    pub schema: String,
    pub store: StoreBackend,
    pub body_limit: usize,
}

impl ServerConfig {
    /// Read `DATABASE_URL`, `BIND_ADDR`, `DB_MAX_CONNECTIONS`, `STUDENT_SCHEMA`,
    /// `STUDENT_STORE` and `REQUEST_BODY_LIMIT` from the process environment,
    /// after loading `.env` if one is present. Variables already set win over `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let bind_addr = parse_value(
            "BIND_ADDR",
            get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
        )?;
        let max_connections = parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), || {
            DEFAULT_MAX_CONNECTIONS
        })?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DB_MAX_CONNECTIONS",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        let schema = get("STUDENT_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into());
        if !is_plain_identifier(&schema) {
            return Err(ConfigError::InvalidValue {
                key: "STUDENT_SCHEMA",
                value: schema,
                reason: "must be a plain SQL identifier".into(),
            });
        }
        let store = match get("STUDENT_STORE") {
            Some(s) => s.parse()?,
            None => StoreBackend::Postgres,
        };
        let body_limit = parse_or("REQUEST_BODY_LIMIT", get("REQUEST_BODY_LIMIT"), || {
            DEFAULT_BODY_LIMIT
        })?;

        Ok(ServerConfig {
            database_url,
            bind_addr,
            max_connections,
            schema,
            store,
            body_limit,
        })
    }
}

fn parse_or<T, D>(key: &'static str, raw: Option<String>, default: D) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    D: FnOnce() -> T,
{
    match raw {
        None => Ok(default()),
        Some(v) => parse_value(key, v),
    }
}

fn parse_value<T>(key: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = config_from(&[]).unwrap();
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(cfg.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(cfg.schema, "public");
        assert_eq!(cfg.store, StoreBackend::Postgres);
        assert_eq!(cfg.body_limit, DEFAULT_BODY_LIMIT);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = config_from(&[
            ("DATABASE_URL", "postgres://db:5432/school"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("STUDENT_SCHEMA", "school"),
            ("STUDENT_STORE", "Memory"),
            ("REQUEST_BODY_LIMIT", "1024"),
        ])
        .unwrap();
        assert_eq!(cfg.database_url, "postgres://db:5432/school");
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(cfg.max_connections, 12);
        assert_eq!(cfg.schema, "school");
        assert_eq!(cfg.store, StoreBackend::Memory);
        assert_eq!(cfg.body_limit, 1024);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = config_from(&[("BIND_ADDR", "  "), ("STUDENT_STORE", "")]).unwrap();
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(cfg.store, StoreBackend::Postgres);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = config_from(&[("DB_MAX_CONNECTIONS", "many")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "DB_MAX_CONNECTIONS", .. }));

        let err = config_from(&[("DB_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "DB_MAX_CONNECTIONS", .. }));

        let err = config_from(&[("BIND_ADDR", "localhost")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "BIND_ADDR", .. }));

        let err = config_from(&[("STUDENT_SCHEMA", "bad;schema")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "STUDENT_SCHEMA", .. }));
    }

    #[test]
    fn unknown_store_is_rejected() {
        let err = config_from(&[("STUDENT_STORE", "redis")]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownStore(s) if s == "redis"));
    }
}
