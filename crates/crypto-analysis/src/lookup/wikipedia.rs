//! Wikipedia encyclopedia search
//!
//! One MediaWiki request: a search generator with plain-text intro extracts.

use async_trait::async_trait;
use serde::Deserialize;

use super::{fetch_json, http_client, truncate_chars, LookupClient};
use crate::config::LookupConfig;
use crate::error::Result;
use crate::model::Capability;

const NO_RESULT: &str = "No good Wikipedia Search Result was found";

#[derive(Debug, Default, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryPages>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryPages {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    index: usize,
    #[serde(default)]
    extract: String,
}

pub struct WikipediaClient {
    client: reqwest::Client,
    base_url: String,
    top_k: usize,
    max_chars: usize,
}

impl WikipediaClient {
    pub fn new(config: &LookupConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config.timeout_secs)?,
            base_url: config.wikipedia_base_url.trim_end_matches('/').to_string(),
            top_k: config.wikipedia_top_k,
            max_chars: config.max_output_chars,
        })
    }
}

#[async_trait]
impl LookupClient for WikipediaClient {
    fn capability(&self) -> Capability {
        Capability::EncyclopediaSearch
    }

    fn name(&self) -> &str {
        "wikipedia"
    }

    async fn lookup(&self, query: &str) -> Result<String> {
        let limit = self.top_k.to_string();
        let request = self
            .client
            .get(format!("{}/w/api.php", self.base_url))
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("generator", "search"),
                ("gsrsearch", query),
                ("gsrlimit", limit.as_str()),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
            ]);

        let response: QueryResponse = fetch_json(self.name(), request).await?;
        let mut pages = response.query.map(|q| q.pages).unwrap_or_default();
        pages.sort_by_key(|p| p.index);

        let summaries: Vec<String> = pages
            .iter()
            .take(self.top_k)
            .filter(|p| !p.extract.trim().is_empty())
            .map(|p| format!("Page: {}\nSummary: {}", p.title, p.extract.trim()))
            .collect();

        if summaries.is_empty() {
            return Ok(NO_RESULT.to_string());
        }
        Ok(truncate_chars(&summaries.join("\n\n"), self.max_chars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> WikipediaClient {
        WikipediaClient::new(&LookupConfig {
            wikipedia_base_url: server.url(),
            timeout_secs: 5,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_pages_ordered_by_search_rank() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/w/api.php")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("gsrsearch".into(), "Ethereum".into()),
                Matcher::UrlEncoded("gsrlimit".into(), "3".into()),
            ]))
            .with_status(200)
            .with_body(r#"{
                "batchcomplete": true,
                "query": {"pages": [
                    {"pageid": 2, "title": "Ether (cryptocurrency)", "index": 2, "extract": "Ether is the native token."},
                    {"pageid": 1, "title": "Ethereum", "index": 1, "extract": "Ethereum is a blockchain platform."}
                ]}
            }"#)
            .create_async()
            .await;

        let text = client_for(&server).lookup("Ethereum").await.unwrap();

        assert_eq!(
            text,
            "Page: Ethereum\nSummary: Ethereum is a blockchain platform.\n\n\
             Page: Ether (cryptocurrency)\nSummary: Ether is the native token."
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_no_pages() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/w/api.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"batchcomplete": true}"#)
            .create_async()
            .await;

        let text = client_for(&server).lookup("qwxzv").await.unwrap();
        assert_eq!(text, NO_RESULT);
    }
}
