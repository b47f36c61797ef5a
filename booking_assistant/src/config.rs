// Settings come from the environment, with a `.env` file in the working
// directory loaded first if there is one.

use std::env;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::route::PtsEncoding;

static DEFAULT_MAPBOX_URL: &str = "https://api.mapbox.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub token_url: String,
    pub order_url: String,
    pub token_ttl: Option<u64>,
    pub mapbox_access_token: String,
    pub mapbox_url: String,
    pub geocode_country: Option<String>,
    pub timeout: Duration,
    pub pts_encoding: PtsEncoding,
}

impl Config {
    /// Loads `.env` (if present) and reads the configuration from the
    /// environment.
    pub fn from_env() -> Result<Config> {
        // A missing .env is fine, everything may already be exported.
        let _ = dotenv::dotenv();
        Config::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| Error::Config(format!("{} not found", name)))
        };
        let optional = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let token_ttl = optional("DISPATCH_TOKEN_TTL")
            .map(|ttl| parse_number("DISPATCH_TOKEN_TTL", &ttl))
            .transpose()?;
        let timeout = optional("HTTP_TIMEOUT_SECS")
            .map(|secs| parse_number("HTTP_TIMEOUT_SECS", &secs))
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let pts_encoding = optional("PTS_ENCODING")
            .map(|encoding| encoding.parse::<PtsEncoding>().map_err(Error::Config))
            .transpose()?
            .unwrap_or_default();

        Ok(Config {
            api_key: required("DISPATCH_API_KEY")?,
            token_url: required("DISPATCH_TOKEN_URL")?,
            order_url: required("DISPATCH_ORDER_URL")?,
            token_ttl,
            mapbox_access_token: required("MAPBOX_ACCESS_TOKEN")?,
            mapbox_url: optional("MAPBOX_URL").unwrap_or_else(|| DEFAULT_MAPBOX_URL.to_string()),
            geocode_country: optional("GEOCODE_COUNTRY"),
            timeout: Duration::from_secs(timeout),
            pts_encoding,
        })
    }
}

fn parse_number(name: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| Error::Config(format!("{} is not a number ({}): {}", name, value, e)))
}
