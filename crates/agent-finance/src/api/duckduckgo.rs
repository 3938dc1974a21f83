//! DuckDuckGo instant-answer API client
//!
//! The instant-answer endpoint is keyless. It returns an abstract for
//! well-known entities and a tree of related topics, which is flattened
//! into a plain result list here.

use crate::error::{FinanceError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

const BASE_URL: &str = "https://api.duckduckgo.com/";

/// DuckDuckGo API client
#[derive(Debug, Clone)]
pub struct DuckDuckGoClient {
    client: Client,
    base_url: String,
}

/// One search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub text: String,
    pub url: Option<String>,
}

/// Flattened instant answer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub heading: Option<String>,
    pub answer: Option<String>,
    pub summary: Option<String>,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct InstantAnswer {
    heading: String,
    abstract_text: String,
    abstract_source: String,
    #[serde(rename = "AbstractURL")]
    abstract_url: String,
    answer: serde_json::Value,
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RelatedTopic {
    Entry {
        #[serde(rename = "Text")]
        text: String,
        #[serde(rename = "FirstURL", default)]
        first_url: Option<String>,
    },
    Group {
        #[serde(rename = "Topics")]
        topics: Vec<RelatedTopic>,
    },
}

impl DuckDuckGoClient {
    /// Create a new client
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a client with a request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Search and keep at most `max_results` related topics
    pub async fn search(&self, query: &str, max_results: usize) -> Result<SearchResults> {
        let url = self.search_url(query)?;
        debug!(query = %query, "Querying DuckDuckGo");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FinanceError::Api(format!(
                "DuckDuckGo HTTP error: {}",
                response.status()
            )));
        }

        // The endpoint answers with a javascript content type
        let body = response.text().await?;
        let answer: InstantAnswer = serde_json::from_str(&body)?;
        Ok(flatten(query, answer, max_results))
    }

    fn search_url(&self, query: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.base_url,
            &[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ],
        )
        .map_err(|e| FinanceError::Config(format!("Invalid DuckDuckGo URL: {e}")))
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

fn flatten(query: &str, answer: InstantAnswer, max_results: usize) -> SearchResults {
    let mut results = Vec::new();
    collect_topics(answer.related_topics, &mut results, max_results);

    let answer_text = match answer.answer {
        serde_json::Value::String(text) => non_empty(text),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    };

    SearchResults {
        query: query.to_string(),
        heading: non_empty(answer.heading),
        answer: answer_text,
        summary: non_empty(answer.abstract_text),
        source: non_empty(answer.abstract_source),
        source_url: non_empty(answer.abstract_url),
        results,
    }
}

fn collect_topics(topics: Vec<RelatedTopic>, out: &mut Vec<SearchResult>, max: usize) {
    for topic in topics {
        if out.len() >= max {
            return;
        }
        match topic {
            RelatedTopic::Entry { text, first_url } => {
                if let Some(text) = non_empty(text) {
                    out.push(SearchResult {
                        text,
                        url: first_url,
                    });
                }
            }
            RelatedTopic::Group { topics } => collect_topics(topics, out, max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> InstantAnswer {
        serde_json::from_value(json!({
            "Heading": "Apple Inc.",
            "AbstractText": "Apple Inc. is an American multinational technology company.",
            "AbstractSource": "Wikipedia",
            "AbstractURL": "https://en.wikipedia.org/wiki/Apple_Inc.",
            "Answer": "",
            "RelatedTopics": [
                {"Text": "iPhone - smartphone line", "FirstURL": "https://duckduckgo.com/iPhone"},
                {"Name": "Products", "Topics": [
                    {"Text": "Mac - personal computers", "FirstURL": "https://duckduckgo.com/Mac"},
                    {"Text": "iPad - tablets", "FirstURL": "https://duckduckgo.com/iPad"}
                ]},
                {"Text": "", "FirstURL": "https://duckduckgo.com/empty"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_flatten_nested_topics() {
        let results = flatten("apple", sample(), 10);
        assert_eq!(results.heading.as_deref(), Some("Apple Inc."));
        assert_eq!(results.source.as_deref(), Some("Wikipedia"));
        assert!(results.answer.is_none());

        let texts: Vec<_> = results.results.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(
            texts,
            ["iPhone - smartphone line", "Mac - personal computers", "iPad - tablets"]
        );
    }

    #[test]
    fn test_flatten_caps_results() {
        let results = flatten("apple", sample(), 2);
        assert_eq!(results.results.len(), 2);
        assert_eq!(results.results[1].url.as_deref(), Some("https://duckduckgo.com/Mac"));
    }

    #[test]
    fn test_missing_fields_default() {
        let answer: InstantAnswer = serde_json::from_value(json!({})).unwrap();
        let results = flatten("nothing", answer, 5);
        assert_eq!(results.query, "nothing");
        assert!(results.summary.is_none());
        assert!(results.results.is_empty());
    }

    #[test]
    fn test_search_url_encodes_query() {
        let client = DuckDuckGoClient::new().unwrap();
        let url = client.search_url("AAPL earnings & guidance").unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("q".to_string(), "AAPL earnings & guidance".to_string()));
        assert!(url.as_str().contains("format=json"));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_search_live() {
        let client = DuckDuckGoClient::new().unwrap();
        let results = client.search("Microsoft", 5).await.unwrap();
        assert!(results.heading.is_some() || !results.results.is_empty());
    }
}
