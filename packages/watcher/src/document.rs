//! Full-text retrieval for one publication item.

use reqwest::blocking::Client;

/// Fetch the HTML for a publication item, best effort.
///
/// Exactly one attempt: a network failure or non-success status is logged
/// at debug level and reported as `None`, and the caller skips the item.
pub fn fetch_document(client: &Client, url: &str) -> Option<String> {
    match client.get(url).send() {
        Ok(response) if response.status().is_success() => match response.text() {
            Ok(body) => Some(body),
            Err(error) => {
                tracing::debug!(url, %error, "failed to read document body");
                None
            }
        },
        Ok(response) => {
            tracing::debug!(url, status = %response.status(), "document unavailable");
            None
        }
        Err(error) => {
            tracing::debug!(url, %error, "document fetch failed");
            None
        }
    }
}
