use std::{env, net::SocketAddr};

use eth_client::{ClientConfig, ConfigError};

pub const DEFAULT_BIND: &str = "127.0.0.1:8888";

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind: SocketAddr,
    pub log_level: String,
    pub log_json: bool,
    pub client: ClientConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let raw_bind = lookup("DERISK_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr =
            raw_bind.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "DERISK_BIND",
                value: raw_bind.clone(),
                reason: e.to_string(),
            })?;

        let log_json = match lookup("DERISK_LOG_JSON") {
            Some(raw) => parse_boolish(&raw).ok_or(ConfigError::Invalid {
                key: "DERISK_LOG_JSON",
                value: raw,
                reason: "expected a boolean".to_string(),
            })?,
            None => false,
        };

        Ok(Settings {
            bind,
            log_level: lookup("DERISK_LOG").unwrap_or_else(|| "info".to_string()),
            log_json,
            client: ClientConfig::from_lookup(&lookup)?,
        })
    }
}

fn parse_boolish(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
