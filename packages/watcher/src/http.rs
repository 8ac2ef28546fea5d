//! HTTP client construction for the gazette endpoints.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::Result;

/// User agent string identifying this watcher.
const USER_AGENT: &str = concat!("socimi-watcher/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// Every request carries `Accept: application/json`; the summary endpoint
/// keys its response format on it and the document endpoint ignores it.
/// All fetches share the same bounded timeout. There is no retry layer:
/// every resource gets exactly one attempt.
pub fn create_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()?;
    Ok(client)
}
