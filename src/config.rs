use std::{env, time::Duration};

use crate::errors::ConfigError;

pub const DEFAULT_PORTFOLIO_PATH: &str = ".data/portfolio";
pub const DEFAULT_KIS_BASE_URL: &str = "https://openapi.koreainvestment.com:9443";
const DEFAULT_KIS_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KisConfig {
    pub base_url: String,
    pub app_key: String,
    pub app_secret: String,
    pub access_token: String,
    pub timeout: Duration,
}

/* Runtime settings, read from the environment (after dotenv loaded .env).
KIS quotes are enabled by KIS_APP_KEY, the secret and the token are then required. */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub portfolio_path: String,
    pub kis: Option<KisConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let portfolio_path =
            read("ETF_PORTFOLIO_PATH").unwrap_or_else(|| DEFAULT_PORTFOLIO_PATH.to_string());

        let kis = match read("KIS_APP_KEY") {
            None => None,
            Some(app_key) => {
                let timeout = match read("KIS_TIMEOUT_SECS") {
                    None => DEFAULT_KIS_TIMEOUT_SECS,
                    Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                        key: "KIS_TIMEOUT_SECS",
                        value: raw.clone(),
                    })?,
                };
                Some(KisConfig {
                    base_url: read("KIS_BASE_URL")
                        .unwrap_or_else(|| DEFAULT_KIS_BASE_URL.to_string()),
                    app_key,
                    app_secret: read("KIS_APP_SECRET")
                        .ok_or(ConfigError::Missing("KIS_APP_SECRET"))?,
                    access_token: read("KIS_ACCESS_TOKEN")
                        .ok_or(ConfigError::Missing("KIS_ACCESS_TOKEN"))?,
                    timeout: Duration::from_secs(timeout),
                })
            }
        };

        Ok(Self {
            portfolio_path,
            kis,
        })
    }
}
