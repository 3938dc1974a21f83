//! Tool for web search through DuckDuckGo

use agent_core::Result as AgentResult;
use agent_llm::tools::schema;
use agent_tools::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::parse_params;
use crate::api::DuckDuckGoClient;

const DEFAULT_MAX_RESULTS: usize = 5;
const MAX_RESULTS_CAP: usize = 10;

/// Search the web for company background and recent context
pub struct WebSearchTool {
    client: DuckDuckGoClient,
}

#[derive(Debug, Deserialize)]
struct WebSearchParams {
    query: String,
    #[serde(default)]
    max_results: Option<usize>,
}

impl WebSearchTool {
    /// Create a new web search tool
    pub fn new(client: DuckDuckGoClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: WebSearchParams = parse_params(params)?;
        let query = params.query.trim();
        if query.is_empty() {
            return Err(agent_core::Error::ProcessingFailed(
                "Invalid parameters: query must not be empty".to_string(),
            ));
        }

        let max_results = params
            .max_results
            .unwrap_or(DEFAULT_MAX_RESULTS)
            .clamp(1, MAX_RESULTS_CAP);
        let results = self.client.search(query, max_results).await?;

        serde_json::to_value(results).map_err(|e| agent_core::Error::ProcessingFailed(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "web_search"
    }

    fn description(&self) -> &'static str {
        "Search the web (DuckDuckGo) for background on a company, product or market topic. \
         Returns a summary and related results."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "query": schema::string("Search query, e.g. 'Tesla company overview'"),
                "max_results": schema::integer("Maximum related results to return (default 5, max 10)"),
            }),
            &["query"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_metadata() {
        let tool = WebSearchTool::new(DuckDuckGoClient::new().unwrap());
        assert_eq!(tool.name(), "web_search");
        assert_eq!(tool.input_schema()["required"][0], "query");
    }

    #[tokio::test]
    async fn test_rejects_blank_query() {
        let tool = WebSearchTool::new(DuckDuckGoClient::new().unwrap());
        let err = tool.execute(json!({"query": "   "})).await.unwrap_err();
        assert!(err.to_string().contains("query must not be empty"));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_execute_live() {
        let tool = WebSearchTool::new(DuckDuckGoClient::new().unwrap());
        let result = tool.execute(json!({"query": "Apple Inc"})).await.unwrap();
        assert_eq!(result["query"], "Apple Inc");
    }
}
