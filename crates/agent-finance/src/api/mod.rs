//! API clients for market data and web search

pub mod duckduckgo;
pub mod yahoo;

pub use duckduckgo::{DuckDuckGoClient, SearchResult, SearchResults};
pub use yahoo::{Fundamentals, QuoteSnapshot, YahooFinanceClient};

use crate::error::Result;
use crate::series::PriceSeries;
use crate::symbol::Symbol;
use async_trait::async_trait;

/// Source of trailing daily price history
///
/// Every call goes to the provider; nothing is cached between calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSeriesFetcher: Send + Sync {
    /// Fetch the trailing window of daily bars for `symbol`
    ///
    /// Fails with [`FinanceError::NoData`](crate::FinanceError::NoData) when
    /// the provider has no rows for the symbol.
    async fn fetch(&self, symbol: &Symbol) -> Result<PriceSeries>;
}
