//! Tool for fetching the latest quote

use agent_core::Result as AgentResult;
use agent_llm::tools::schema;
use agent_tools::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::parse_params;
use crate::api::YahooFinanceClient;
use crate::symbol::Symbol;

/// Latest price, currency, exchange, day volume and 52-week range
pub struct StockPriceTool {
    yahoo_client: YahooFinanceClient,
}

#[derive(Debug, Deserialize)]
struct StockPriceParams {
    symbol: Symbol,
}

impl StockPriceTool {
    /// Create a new stock price tool
    pub fn new(yahoo_client: YahooFinanceClient) -> Self {
        Self { yahoo_client }
    }
}

#[async_trait]
impl Tool for StockPriceTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: StockPriceParams = parse_params(params)?;
        let quote = self.yahoo_client.get_quote(&params.symbol).await?;

        let change_pct = match (quote.price, quote.previous_close) {
            (Some(price), Some(prev)) if prev > 0.0 => Some((price - prev) / prev * 100.0),
            _ => None,
        };

        let mut result = serde_json::to_value(&quote)
            .map_err(|e| agent_core::Error::ProcessingFailed(e.to_string()))?;
        result["change_pct"] = json!(change_pct);
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "stock_price"
    }

    fn description(&self) -> &'static str {
        "Get the latest stock quote for a ticker: price, previous close, currency, \
         exchange, day volume and 52-week high/low."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "symbol": schema::string("Stock ticker symbol (e.g., 'AAPL', 'MSFT')"),
            }),
            &["symbol"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_metadata() {
        let tool = StockPriceTool::new(YahooFinanceClient::new().unwrap());

        assert_eq!(tool.name(), "stock_price");
        assert!(!tool.description().is_empty());

        let schema = tool.input_schema();
        assert_eq!(schema["type"], "object");
        assert!(schema["properties"]["symbol"].is_object());
        assert_eq!(tool.definition().name, "stock_price");
    }

    #[tokio::test]
    async fn test_rejects_missing_symbol() {
        let tool = StockPriceTool::new(YahooFinanceClient::new().unwrap());
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(err.to_string().contains("Invalid parameters"));

        let err = tool.execute(json!({"symbol": "  "})).await.unwrap_err();
        assert!(err.to_string().contains("Invalid parameters"));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_execute_live() {
        let tool = StockPriceTool::new(YahooFinanceClient::new().unwrap());
        let result = tool.execute(json!({"symbol": "aapl"})).await.unwrap();
        assert_eq!(result["symbol"], "AAPL");
        assert!(result["price"].is_number());
    }
}
