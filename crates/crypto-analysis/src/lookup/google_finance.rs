//! Google Finance via SerpAPI
//!
//! The only lookup that needs a credential: the run's search-service key.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{fetch_json, http_client, LookupClient};
use crate::config::LookupConfig;
use crate::error::{AnalysisError, Result};
use crate::model::Capability;

const REGIONS: [&str; 3] = ["us", "europe", "asia"];

#[derive(Debug, Deserialize)]
struct FinanceResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    summary: Option<Quote>,
    #[serde(default)]
    markets: Option<serde_json::Map<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    stock: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    price: Option<Value>,
    #[serde(default)]
    price_movement: Option<Movement>,
}

#[derive(Debug, Default, Deserialize)]
struct Movement {
    #[serde(default)]
    percentage: Option<Value>,
    #[serde(default)]
    movement: Option<String>,
}

/// Prices come back as numbers or preformatted strings
fn scalar(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "n/a".into(),
        Some(other) => other.to_string(),
    }
}

fn render(query: &str, response: &FinanceResponse) -> String {
    let mut out = format!("Query: {}\n", query);

    match &response.summary {
        Some(quote) => {
            let movement = quote.price_movement.as_ref();
            out.push_str(&format!(
                "stock: {}\nprice: {}\npercentage: {}\nmovement: {}\n",
                quote.stock.as_deref().unwrap_or("n/a"),
                scalar(quote.price.as_ref()),
                scalar(movement.and_then(|m| m.percentage.as_ref())),
                movement.and_then(|m| m.movement.as_deref()).unwrap_or("n/a"),
            ));
        }
        None => out.push_str("No summary information\n"),
    }

    if let Some(markets) = &response.markets {
        for region in REGIONS {
            let Some(Value::Array(entries)) = markets.get(region) else {
                continue;
            };
            for entry in entries {
                let Ok(index) = serde_json::from_value::<Quote>(entry.clone()) else {
                    continue;
                };
                let movement = index.price_movement.as_ref();
                out.push_str(&format!(
                    "\n{}: {} price = {}, movement = {} ({})",
                    region,
                    index.name.as_deref().or(index.stock.as_deref()).unwrap_or("index"),
                    scalar(index.price.as_ref()),
                    movement.and_then(|m| m.movement.as_deref()).unwrap_or("n/a"),
                    scalar(movement.and_then(|m| m.percentage.as_ref())),
                ));
            }
        }
    }

    out
}

/// Financial-data search client
pub struct GoogleFinanceClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleFinanceClient {
    pub fn new(config: &LookupConfig, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AnalysisError::Config("SERP API Key is required".into()));
        }

        Ok(Self {
            client: http_client(config.timeout_secs)?,
            base_url: config.serpapi_base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl LookupClient for GoogleFinanceClient {
    fn capability(&self) -> Capability {
        Capability::FinancialSearch
    }

    fn name(&self) -> &str {
        "serpapi"
    }

    async fn lookup(&self, query: &str) -> Result<String> {
        let request = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("engine", "google_finance"),
                ("q", query),
                ("api_key", self.api_key.as_str()),
            ]);

        let response: FinanceResponse = fetch_json(self.name(), request).await?;
        if let Some(error) = &response.error {
            return Err(AnalysisError::Lookup(format!("serpapi: {}", error)));
        }

        Ok(render(query, &response))
    }
}
