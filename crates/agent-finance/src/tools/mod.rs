//! Tools exposed to the finance agent

pub mod fundamentals;
pub mod price_history;
pub mod stock_price;
pub mod web_search;

pub use fundamentals::FundamentalsTool;
pub use price_history::PriceHistoryTool;
pub use stock_price::StockPriceTool;
pub use web_search::WebSearchTool;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserialize tool input, reporting bad parameters to the model
pub(crate) fn parse_params<T: DeserializeOwned>(params: Value) -> agent_core::Result<T> {
    serde_json::from_value(params)
        .map_err(|e| agent_core::Error::ProcessingFailed(format!("Invalid parameters: {e}")))
}
