//! Canned lookup client for demos and tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::LookupClient;
use crate::error::{AnalysisError, Result};
use crate::model::Capability;

/// Returns a fixed answer (or a fixed failure) without touching the network
pub struct StaticLookupClient {
    capability: Capability,
    default_response: String,
    responses: HashMap<String, String>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl StaticLookupClient {
    pub fn new(capability: Capability, default_response: impl Into<String>) -> Self {
        Self {
            capability,
            default_response: default_response.into(),
            responses: HashMap::new(),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A client whose every lookup fails with `message`
    pub fn failing(capability: Capability, message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(capability, "")
        }
    }

    pub fn with_response(mut self, query: impl Into<String>, response: impl Into<String>) -> Self {
        self.responses.insert(query.into(), response.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LookupClient for StaticLookupClient {
    fn capability(&self) -> Capability {
        self.capability
    }

    fn name(&self) -> &str {
        "static"
    }

    async fn lookup(&self, query: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.failure {
            return Err(AnalysisError::Lookup(message.clone()));
        }

        Ok(self
            .responses
            .get(query)
            .cloned()
            .unwrap_or_else(|| self.default_response.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_responses() {
        let client = StaticLookupClient::new(Capability::WebSearch, "nothing new")
            .with_response("Bitcoin news", "ETF inflows continue");

        assert_eq!(client.lookup("Bitcoin news").await.unwrap(), "ETF inflows continue");
        assert_eq!(client.lookup("Dogecoin").await.unwrap(), "nothing new");
        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn test_failing_client() {
        let client = StaticLookupClient::failing(Capability::FinancialSearch, "quota exhausted");
        assert!(client.lookup("BTC").await.is_err());
        assert_eq!(client.capability(), Capability::FinancialSearch);
    }
}
