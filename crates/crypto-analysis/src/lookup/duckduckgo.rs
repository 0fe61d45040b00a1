//! DuckDuckGo Web Search
//!
//! Scrapes the HTML results page, which needs no credential and returns
//! ordinary web result snippets for news-style queries.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use super::{fetch_text, http_client, LookupClient};
use crate::config::LookupConfig;
use crate::error::{AnalysisError, Result};
use crate::model::Capability;

const NO_RESULT: &str = "No good DuckDuckGo Search Result was found";

/// One organic result from the results page
#[derive(Debug, PartialEq)]
struct SearchHit {
    title: String,
    snippet: String,
    url: String,
}

/// General web search client
pub struct DuckDuckGoClient {
    client: reqwest::Client,
    base_url: String,
    max_results: usize,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| AnalysisError::Lookup(format!("duckduckgo selector {}: {}", css, e)))
}

fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Organic results in page order; sponsored entries are skipped
fn parse_results(body: &str, limit: usize) -> Result<Vec<SearchHit>> {
    let document = Html::parse_document(body);
    let result_sel = selector("div.result")?;
    let title_sel = selector(".result__a")?;
    let snippet_sel = selector(".result__snippet")?;
    let url_sel = selector(".result__url")?;

    let mut hits = Vec::new();
    for result in document.select(&result_sel) {
        if hits.len() >= limit {
            break;
        }
        if result.value().classes().any(|c| c == "result--ad") {
            continue;
        }

        let Some(title) = result.select(&title_sel).next().map(element_text) else {
            continue;
        };
        let snippet = result.select(&snippet_sel).next().map(element_text).unwrap_or_default();
        if title.is_empty() && snippet.is_empty() {
            continue;
        }
        let url = result.select(&url_sel).next().map(element_text).unwrap_or_default();

        hits.push(SearchHit { title, snippet, url });
    }

    Ok(hits)
}

fn render(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return NO_RESULT.to_string();
    }

    hits.iter()
        .map(|hit| {
            let mut line = format!("- {}", hit.title);
            if !hit.snippet.is_empty() {
                line.push_str(": ");
                line.push_str(&hit.snippet);
            }
            if !hit.url.is_empty() {
                line.push_str(&format!(" ({})", hit.url));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl DuckDuckGoClient {
    pub fn new(config: &LookupConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config.timeout_secs)?,
            base_url: config.duckduckgo_base_url.trim_end_matches('/').to_string(),
            max_results: config.web_max_results,
        })
    }
}

#[async_trait]
impl LookupClient for DuckDuckGoClient {
    fn capability(&self) -> Capability {
        Capability::WebSearch
    }

    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn lookup(&self, query: &str) -> Result<String> {
        let request = self
            .client
            .get(format!("{}/html/", self.base_url))
            .query(&[("q", query)]);

        let body = fetch_text(self.name(), request).await?;
        let hits = parse_results(&body, self.max_results)?;
        tracing::debug!(query, hits = hits.len(), "DuckDuckGo results parsed");
        Ok(render(&hits))
    }
}
