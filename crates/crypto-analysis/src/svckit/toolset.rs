//! Capability → tool binding for one run

use std::collections::BTreeMap;
use std::sync::Arc;

use agent_core::ToolRegistry;

use super::LookupTool;
use crate::config::CrewConfig;
use crate::error::{AnalysisError, Result};
use crate::lookup::{DuckDuckGoClient, GoogleFinanceClient, LookupClient, WikipediaClient};
use crate::model::{Capability, Credentials};

/// Lookup clients available to a run, keyed by capability
#[derive(Clone)]
pub struct CapabilityToolset {
    clients: BTreeMap<Capability, Arc<dyn LookupClient>>,
    max_output_chars: usize,
}

impl CapabilityToolset {
    pub fn new(max_output_chars: usize) -> Self {
        Self {
            clients: BTreeMap::new(),
            max_output_chars,
        }
    }

    /// Bind a client under the capability it reports
    pub fn with_client(mut self, client: Arc<dyn LookupClient>) -> Self {
        self.clients.insert(client.capability(), client);
        self
    }

    /// Real clients for every capability; financial search uses the run's search key
    pub fn from_config(config: &CrewConfig, credentials: &Credentials) -> Result<Self> {
        let lookup = &config.lookup;
        Ok(Self::new(lookup.max_output_chars)
            .with_client(Arc::new(DuckDuckGoClient::new(lookup)?))
            .with_client(Arc::new(GoogleFinanceClient::new(lookup, credentials.search_key())?))
            .with_client(Arc::new(WikipediaClient::new(lookup)?)))
    }

    /// A registry holding exactly the requested capabilities
    pub fn registry_for(&self, capabilities: &[Capability]) -> Result<ToolRegistry> {
        let mut registry = ToolRegistry::new();
        for capability in capabilities {
            let client = self.clients.get(capability).ok_or_else(|| {
                AnalysisError::Config(format!("no lookup client bound for {}", capability))
            })?;
            registry.register(LookupTool::new(Arc::clone(client), self.max_output_chars));
        }
        Ok(registry)
    }
}
