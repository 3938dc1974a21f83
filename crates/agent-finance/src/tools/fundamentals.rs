//! Tool for valuation metrics
//!
//! Market cap, P/E, P/B, EPS, dividend yield and beta from Yahoo's
//! quoteSummary modules, with readable interpretations alongside the raw
//! numbers.

use agent_core::Result as AgentResult;
use agent_llm::tools::schema;
use agent_tools::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::parse_params;
use crate::api::{Fundamentals, YahooFinanceClient};
use crate::symbol::Symbol;

/// Fundamental data for one ticker
pub struct FundamentalsTool {
    yahoo_client: YahooFinanceClient,
}

#[derive(Debug, Deserialize)]
struct FundamentalsParams {
    symbol: Symbol,
}

impl FundamentalsTool {
    pub fn new(yahoo_client: YahooFinanceClient) -> Self {
        Self { yahoo_client }
    }
}

/// Tool output: the raw figures plus formatted fields
fn fundamentals_json(fundamentals: &Fundamentals) -> AgentResult<Value> {
    let mut result = serde_json::to_value(fundamentals)
        .map_err(|e| agent_core::Error::ProcessingFailed(e.to_string()))?;

    if let Some(cap) = fundamentals.market_cap {
        result["market_cap_formatted"] = json!(format_market_cap(cap));
    }
    if let Some(pe) = fundamentals.trailing_pe {
        result["pe_interpretation"] = json!(interpret_pe(pe));
    }
    if let Some(yield_val) = fundamentals.dividend_yield {
        result["dividend_yield_percent"] = json!(format!("{:.2}%", yield_val * 100.0));
    }
    result["data_provider"] = json!("Yahoo Finance");
    Ok(result)
}

fn format_market_cap(cap: f64) -> String {
    if cap >= 1_000_000_000_000.0 {
        format!("${:.2}T", cap / 1_000_000_000_000.0)
    } else if cap >= 1_000_000_000.0 {
        format!("${:.2}B", cap / 1_000_000_000.0)
    } else if cap >= 1_000_000.0 {
        format!("${:.2}M", cap / 1_000_000.0)
    } else {
        format!("${cap:.2}")
    }
}

fn interpret_pe(pe: f64) -> &'static str {
    if pe < 0.0 {
        "Negative (company is not profitable)"
    } else if pe < 15.0 {
        "Low (potentially undervalued or slow growth)"
    } else if pe < 25.0 {
        "Moderate (fairly valued)"
    } else if pe < 50.0 {
        "High (potentially overvalued or high growth)"
    } else {
        "Very High (very expensive or very high growth expectations)"
    }
}

#[async_trait]
impl Tool for FundamentalsTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: FundamentalsParams = parse_params(params)?;
        let fundamentals = self.yahoo_client.get_fundamentals(&params.symbol).await?;
        fundamentals_json(&fundamentals)
    }

    fn name(&self) -> &'static str {
        "fundamentals"
    }

    fn description(&self) -> &'static str {
        "Get fundamental data for a ticker: market cap, trailing and forward P/E, \
         EPS, book value, price-to-book, dividend yield, beta and 52-week range."
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
