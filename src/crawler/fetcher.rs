//! HTTP fetcher
//!
//! Fetches one page per call and shapes whatever happens into a
//! [`PageResponse`]. Network failures are not errors at this layer; they
//! become synthetic non-200 responses so the gate records the sighting and
//! rejects them like any other bad status.

use crate::gate::PageResponse;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("page-sieve/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client used by all workers
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns the page response
///
/// Redirects are followed by the client; `effective_url` reports where the
/// content was actually served from. A request that never produced a
/// response at all is reported with status 0 and the error description.
pub async fn fetch_page(client: &Client, url: &str) -> PageResponse {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            return PageResponse {
                status: 0,
                error: Some(e.to_string()),
                effective_url: url.to_string(),
                body: Vec::new(),
            };
        }
    };

    let status = response.status().as_u16();
    let error = if status == 200 {
        None
    } else {
        Some(
            response
                .status()
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
        )
    };
    let effective_url = response.url().to_string();

    match response.bytes().await {
        Ok(body) => PageResponse {
            status,
            error,
            effective_url,
            body: body.to_vec(),
        },
        Err(e) => PageResponse {
            status: 0,
            error: Some(format!("body read failed: {}", e)),
            effective_url,
            body: Vec::new(),
        },
    }
}
