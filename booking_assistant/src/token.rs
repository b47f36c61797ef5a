// Bearer tokens for the dispatch api.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::info;

use crate::authentication;
use crate::config::Config;
use crate::endpoints::dispatch;
use crate::error::{Error, Result};
use crate::json;
use crate::retrieve::fetch;

/// Requests a bearer token.  Any failure here is fatal, there's no point
/// trying to book without one.
pub fn acquire(client: &Client, config: &Config) -> Result<String> {
    let endpoint = dispatch::token(&config.token_url, config.token_ttl);
    let authentication = authentication::token_key(config);
    let response = fetch::get(client, &endpoint, &authentication)?;
    let status = response.status();
    let body = response.text()?;
    let token = token_from_response(status, &body)?;
    info!("acquired dispatch token");
    Ok(token)
}

pub fn token_from_response(status: StatusCode, body: &str) -> Result<String> {
    if status != StatusCode::OK {
        return Err(Error::Auth {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    let value: Value = serde_json::from_str(body).map_err(|_| Error::MissingToken)?;
    json::attribute_from_value(&value, "token").ok_or(Error::MissingToken)
}
