//! Finance agent dashboard
//!
//! This crate asks a tool-calling LLM agent to analyze stock tickers and
//! turns one year of daily prices into charts. It includes:
//!
//! - Daily price history from the Yahoo Finance chart API
//! - Normalized comparison, daily returns and trading volume charts (PNG)
//! - Timestamped markdown reports holding the agent's analysis
//! - Agent tools for quotes, fundamentals, price history summaries and web search
//! - A terminal front end and a web form front end
//!
//! # Architecture
//!
//! [`QueryOrchestrator`] owns the pipeline for one input line: parse the
//! tickers, run the agent, save the report, then draw the charts. Both
//! front ends in [`platforms`] are thin adapters over it. Market data is
//! fetched through the [`PriceSeriesFetcher`] trait, so tests swap in a mock.
//!
//! # Example
//!
//! ```rust,ignore
//! use agent_finance::{
//!     ChartRenderer, DashboardConfig, FinanceAgent, QueryOrchestrator, ReportWriter,
//!     YahooFinanceClient,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DashboardConfig::from_env()?;
//!     let fetcher = Arc::new(YahooFinanceClient::new()?);
//!
//!     let agent = FinanceAgent::from_config(&config, fetcher.clone())?;
//!     let orchestrator = QueryOrchestrator::new(
//!         Arc::new(agent),
//!         ChartRenderer::new(fetcher, &config.output_dir, 1000, 600),
//!         ReportWriter::new(&config.output_dir),
//!     );
//!
//!     let outcome = orchestrator.run("TSLA,MSFT").await?;
//!     println!("{}", outcome.analysis);
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod api;
pub mod charts;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod platforms;
pub mod prompts;
pub mod report;
pub mod series;
pub mod symbol;
pub mod tools;

// Re-export main types for convenience
pub use agent::FinanceAgent;
pub use api::{DuckDuckGoClient, Fundamentals, PriceSeriesFetcher, YahooFinanceClient};
pub use charts::{ChartArtifact, ChartKind, ChartRenderer};
pub use config::DashboardConfig;
pub use error::{FinanceError, Result};
pub use orchestrator::{QueryOrchestrator, QueryOutcome, SkippedStep};
pub use report::ReportWriter;
pub use series::{PriceRecord, PriceSeries, SeriesSummary};
pub use symbol::{Symbol, parse_symbols};
pub use tools::{FundamentalsTool, PriceHistoryTool, StockPriceTool, WebSearchTool};
