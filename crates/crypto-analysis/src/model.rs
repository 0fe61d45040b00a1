//! Domain Models
//!
//! Caller-supplied inputs for one analysis run and the lookup capabilities
//! agents may be granted.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// External lookup an agent may invoke during its task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// General web search (no credential)
    WebSearch,
    /// Financial-data search (needs the search-service key)
    FinancialSearch,
    /// Encyclopedia search (no credential)
    EncyclopediaSearch,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::WebSearch,
        Capability::FinancialSearch,
        Capability::EncyclopediaSearch,
    ];

    /// Name the tool is registered under
    pub fn tool_name(self) -> &'static str {
        match self {
            Capability::WebSearch => "web_search",
            Capability::FinancialSearch => "financial_search",
            Capability::EncyclopediaSearch => "encyclopedia_search",
        }
    }

    /// Description shown to the model
    pub fn description(self) -> &'static str {
        match self {
            Capability::WebSearch => {
                "Search the web for current news, sentiment and general information."
            }
            Capability::FinancialSearch => {
                "Look up market quotes, price movement and index data from Google Finance."
            }
            Capability::EncyclopediaSearch => {
                "Look up background information on a topic in Wikipedia."
            }
        }
    }

    pub fn requires_search_key(self) -> bool {
        matches!(self, Capability::FinancialSearch)
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tool_name())
    }
}

fn require(label: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AnalysisError::Config(format!("{} is required", label)));
    }
    Ok(())
}

/// Secrets for one run. Never persisted, never printed.
#[derive(Clone)]
pub struct Credentials {
    model_key: String,
    search_key: String,
}

impl Credentials {
    pub fn new(model_key: impl Into<String>, search_key: impl Into<String>) -> Result<Self> {
        let model_key = model_key.into();
        let search_key = search_key.into();
        require("OpenAI API Key", &model_key)?;
        require("SERP API Key", &search_key)?;

        Ok(Self {
            model_key: model_key.trim().to_string(),
            search_key: search_key.trim().to_string(),
        })
    }

    /// Model-service key
    pub fn model_key(&self) -> &str {
        &self.model_key
    }

    /// Search-service key (financial search)
    pub fn search_key(&self) -> &str {
        &self.search_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("model_key", &"<redacted>")
            .field("search_key", &"<redacted>")
            .finish()
    }
}

/// Asset under analysis, used verbatim as task context
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetAsset(String);

impl TargetAsset {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        require("Cryptocurrency", &name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TargetAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated input for one run
#[derive(Clone, Debug)]
pub struct AnalysisRequest {
    asset: TargetAsset,
    credentials: Credentials,
}

impl AnalysisRequest {
    /// Validate the three form values, asset first
    pub fn new(
        cryptocurrency: impl Into<String>,
        model_key: impl Into<String>,
        search_key: impl Into<String>,
    ) -> Result<Self> {
        let asset = TargetAsset::new(cryptocurrency)?;
        let credentials = Credentials::new(model_key, search_key)?;
        Ok(Self { asset, credentials })
    }

    pub fn asset(&self) -> &TargetAsset {
        &self.asset
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_valid_values() {
        let request = AnalysisRequest::new("Bitcoin", "sk-test", "serp-test").unwrap();
        assert_eq!(request.asset().as_str(), "Bitcoin");
        assert_eq!(request.credentials().model_key(), "sk-test");
        assert_eq!(request.credentials().search_key(), "serp-test");
    }

    #[test]
    fn test_each_blank_field_is_config_error() {
        for (asset, model, search, label) in [
            ("", "sk", "serp", "Cryptocurrency"),
            ("Bitcoin", "  ", "serp", "OpenAI API Key"),
            ("Bitcoin", "sk", "", "SERP API Key"),
        ] {
            let err = AnalysisRequest::new(asset, model, search).unwrap_err();
            assert!(matches!(&err, AnalysisError::Config(msg) if msg.contains(label)), "{err}");
        }
    }

    #[test]
    fn test_asset_is_kept_verbatim() {
        let asset = TargetAsset::new("Ethereum (ETH)").unwrap();
        assert_eq!(asset.to_string(), "Ethereum (ETH)");
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = Credentials::new("sk-live-123", "serp-456").unwrap();
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("sk-live-123"));
        assert!(!printed.contains("serp-456"));
    }

    #[test]
    fn test_capability_names() {
        assert_eq!(Capability::WebSearch.tool_name(), "web_search");
        assert!(Capability::FinancialSearch.requires_search_key());
        assert!(!Capability::EncyclopediaSearch.requires_search_key());
    }
}
