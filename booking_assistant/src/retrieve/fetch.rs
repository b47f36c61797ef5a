use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::authentication::Authentication;
use super::endpoint::Endpoint;
use crate::error::Result;

// All the lookups for a run share the one client, the timeout applies to
// each request individually.
pub fn client(timeout: Duration) -> Result<Client> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(client)
}

pub fn get<T: Endpoint, U: Authentication>(
    client: &Client,
    endpoint: &T,
    authentication: &U,
) -> Result<Response> {
    let url = endpoint.url();
    debug!("GET {}", url);
    let mut request_builder = client.get(&url);
    request_builder = authentication.apply(request_builder);
    Ok(request_builder.send()?)
}

pub fn get_json<T: Endpoint, U: Authentication, R: DeserializeOwned>(
    client: &Client,
    endpoint: &T,
    authentication: &U,
) -> Result<R> {
    let response = get(client, endpoint, authentication)?.error_for_status()?;
    let text = response.text()?;
    Ok(serde_json::from_str(&text)?)
}

pub fn post_json<T: Endpoint, U: Authentication, B: Serialize>(
    client: &Client,
    endpoint: &T,
    authentication: &U,
    body: &B,
) -> Result<Response> {
    let url = endpoint.url();
    debug!("POST {}", url);
    let mut request_builder = client.post(&url).json(body);
    request_builder = authentication.apply(request_builder);
    Ok(request_builder.send()?)
}
