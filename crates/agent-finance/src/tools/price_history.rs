//! Tool summarizing the trailing price history

use agent_core::Result as AgentResult;
use agent_llm::tools::schema;
use agent_tools::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use super::parse_params;
use crate::api::PriceSeriesFetcher;
use crate::symbol::Symbol;

const DEFAULT_RECENT_DAYS: usize = 5;
const MAX_RECENT_DAYS: usize = 30;

/// Summary statistics of the trailing daily series
///
/// The model gets aggregates plus a few recent closes rather than a year
/// of raw rows.
pub struct PriceHistoryTool {
    fetcher: Arc<dyn PriceSeriesFetcher>,
}

#[derive(Debug, Deserialize)]
struct PriceHistoryParams {
    symbol: Symbol,
    #[serde(default)]
    recent_days: Option<usize>,
}

impl PriceHistoryTool {
    /// Create a new price history tool
    pub fn new(fetcher: Arc<dyn PriceSeriesFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Tool for PriceHistoryTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: PriceHistoryParams = parse_params(params)?;
        let recent_days = params
            .recent_days
            .unwrap_or(DEFAULT_RECENT_DAYS)
            .min(MAX_RECENT_DAYS);

        let series = self.fetcher.fetch(&params.symbol).await?;
        let records = series.records();
        let recent: Vec<Value> = records[records.len().saturating_sub(recent_days)..]
            .iter()
            .map(|r| json!({ "date": r.date, "close": r.close, "volume": r.volume }))
            .collect();

        Ok(json!({
            "summary": series.summary(),
            "recent": recent,
        }))
    }

    fn name(&self) -> &'static str {
        "price_history"
    }

    fn description(&self) -> &'static str {
        "Summarize one year of daily price history for a ticker: first and last close, \
         percent change, highest and lowest close, average volume and the most recent closes."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "symbol": schema::string("Stock ticker symbol (e.g., 'AAPL', 'MSFT')"),
                "recent_days": schema::integer("How many of the latest daily closes to include (default 5, max 30)"),
            }),
            &["symbol"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockPriceSeriesFetcher;
    use crate::error::FinanceError;
    use crate::series::tests::series;

    fn tool(fetcher: MockPriceSeriesFetcher) -> PriceHistoryTool {
        PriceHistoryTool::new(Arc::new(fetcher))
    }

    #[tokio::test]
    async fn test_execute_summarizes() {
        let mut fetcher = MockPriceSeriesFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|s| Ok(series(s.as_str(), &[100.0, 120.0, 90.0, 110.0])));

        let result = tool(fetcher)
            .execute(json!({"symbol": "msft", "recent_days": 2}))
            .await
            .unwrap();

        assert_eq!(result["summary"]["symbol"], "MSFT");
        assert_eq!(result["summary"]["trading_days"], 4);
        assert_eq!(result["summary"]["high_close"], 120.0);
        assert_eq!(result["summary"]["low_close"], 90.0);

        let recent = result["recent"].as_array().unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[1]["close"], 110.0);
    }

    #[tokio::test]
    async fn test_recent_days_capped_by_series() {
        let mut fetcher = MockPriceSeriesFetcher::new();
        fetcher
            .expect_fetch()
            .returning(|s| Ok(series(s.as_str(), &[10.0, 11.0])));

        let result = tool(fetcher).execute(json!({"symbol": "AAPL"})).await.unwrap();
        assert_eq!(result["recent"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_no_data_becomes_tool_error() {
        let mut fetcher = MockPriceSeriesFetcher::new();
        fetcher.expect_fetch().returning(|s| {
            Err(FinanceError::NoData {
                symbol: s.to_string(),
            })
        });

        let err = tool(fetcher)
            .execute(json!({"symbol": "ZZZZINVALID"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No price data for ZZZZINVALID"));
    }
}
