use std::{env, time::Duration};

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_EXPLORER_URL: &str = "https://api.etherscan.io/api";
pub const DEFAULT_MARKETPLACE_URL: &str = "https://api.opensea.io/api/v1";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub explorer_url: Url,
    pub explorer_api_key: String,
    pub marketplace_url: Url,
    pub marketplace_api_key: Option<String>,
    pub http_timeout: Duration,
}

impl ClientConfig {
    /// Reads `DERISK_*` variables, loading a `.env` file first when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let explorer_url = parse_url(
            "DERISK_EXPLORER_URL",
            lookup("DERISK_EXPLORER_URL").unwrap_or_else(|| DEFAULT_EXPLORER_URL.to_string()),
            false,
        )?;
        let marketplace_url = parse_url(
            "DERISK_MARKETPLACE_URL",
            lookup("DERISK_MARKETPLACE_URL")
                .unwrap_or_else(|| DEFAULT_MARKETPLACE_URL.to_string()),
            true,
        )?;

        let explorer_api_key = lookup("DERISK_EXPLORER_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("DERISK_EXPLORER_API_KEY"))?;
        let marketplace_api_key =
            lookup("DERISK_MARKETPLACE_API_KEY").filter(|key| !key.trim().is_empty());

        let http_timeout = match lookup("DERISK_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    key: "DERISK_HTTP_TIMEOUT_SECS",
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        key: "DERISK_HTTP_TIMEOUT_SECS",
                        value: raw,
                        reason: "timeout must be at least one second".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(ClientConfig {
            explorer_url,
            explorer_api_key,
            marketplace_url,
            marketplace_api_key,
            http_timeout,
        })
    }
}

fn parse_url(key: &'static str, raw: String, as_base: bool) -> Result<Url, ConfigError> {
    // a base url needs its trailing slash or Url::join replaces the last segment
    let normalized = if !as_base || raw.ends_with('/') {
        raw.clone()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&normalized).map_err(|e| ConfigError::Invalid {
        key,
        value: raw,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_the_api_key_is_set() {
        let config =
            ClientConfig::from_lookup(lookup_from(&[("DERISK_EXPLORER_API_KEY", "KEY")])).unwrap();

        assert_eq!(config.explorer_url.as_str(), "https://api.etherscan.io/api");
        assert_eq!(config.marketplace_url.as_str(), "https://api.opensea.io/api/v1/");
        assert_eq!(config.http_timeout, Duration::from_secs(15));
        assert!(config.marketplace_api_key.is_none());
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = ClientConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DERISK_EXPLORER_API_KEY")));
    }

    #[test]
    fn zero_or_garbage_timeout_is_rejected() {
        for raw in ["0", "soon"] {
            let err = ClientConfig::from_lookup(lookup_from(&[
                ("DERISK_EXPLORER_API_KEY", "KEY"),
                ("DERISK_HTTP_TIMEOUT_SECS", raw),
            ]))
            .unwrap_err();
            assert!(matches!(
                err,
                ConfigError::Invalid { key: "DERISK_HTTP_TIMEOUT_SECS", .. }
            ));
        }
    }
}
