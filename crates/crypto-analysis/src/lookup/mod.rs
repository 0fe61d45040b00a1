//! Lookup Integration
//!
//! Pass-through clients for the three external lookup services. Each takes a
//! query string and returns text, or fails with `AnalysisError::Lookup`.

mod duckduckgo;
mod google_finance;
mod mock;
mod wikipedia;

pub use duckduckgo::DuckDuckGoClient;
pub use google_finance::GoogleFinanceClient;
pub use mock::StaticLookupClient;
pub use wikipedia::WikipediaClient;

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{AnalysisError, Result};
use crate::model::Capability;

/// Lookup client trait (Strategy pattern)
///
/// Implement this for each search backend.
#[async_trait]
pub trait LookupClient: Send + Sync {
    /// Capability this client provides
    fn capability(&self) -> Capability;

    /// Service name for logs and errors
    fn name(&self) -> &str;

    /// Run a query and render the result as text
    async fn lookup(&self, query: &str) -> Result<String>;
}

/// Cut `text` to at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

pub(crate) fn http_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("crypto-analysis/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AnalysisError::Config(format!("HTTP client: {}", e)))
}

/// Send a request and fail on transport errors or a non-success status
async fn send_checked(service: &str, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
    let response = request
        .send()
        .await
        .map_err(|e| AnalysisError::Lookup(format!("{} request failed: {}", service, e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AnalysisError::Lookup(format!(
            "{} returned {}: {}",
            service,
            status,
            truncate_chars(&body, 200)
        )));
    }

    Ok(response)
}

/// Send a GET and decode the JSON body, mapping every failure to a lookup error
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    service: &str,
    request: reqwest::RequestBuilder,
) -> Result<T> {
    send_checked(service, request)
        .await?
        .json::<T>()
        .await
        .map_err(|e| AnalysisError::Lookup(format!("{} response unreadable: {}", service, e)))
}

/// Send a GET and return the raw body text
pub(crate) async fn fetch_text(service: &str, request: reqwest::RequestBuilder) -> Result<String> {
    send_checked(service, request)
        .await?
        .text()
        .await
        .map_err(|e| AnalysisError::Lookup(format!("{} response unreadable: {}", service, e)))
}
