//! Error types for the finance dashboard

use thiserror::Error;

/// Finance dashboard specific errors
#[derive(Debug, Error)]
pub enum FinanceError {
    /// The market data provider returned no usable rows
    #[error("No price data for {symbol}")]
    NoData { symbol: String },

    /// Drawing or PNG encoding failed
    #[error("Failed to render {chart} chart: {reason}")]
    Render { chart: String, reason: String },

    /// The analysis agent failed
    #[error("Agent error: {0}")]
    Agent(String),

    /// Writing the markdown report failed
    #[error("Report error: {0}")]
    Report(#[from] std::io::Error),

    /// Terminal input or output failed
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    /// Provider answered with an unexpected status or payload
    #[error("API error: {0}")]
    Api(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Prompt or page template failed to render
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Ticker text that cannot be a symbol
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    /// Price series violating its invariants
    #[error("Invalid price series for {symbol}: {reason}")]
    InvalidSeries { symbol: String, reason: String },
}

impl FinanceError {
    /// Shorthand for a render failure
    pub fn render(chart: impl Into<String>, reason: impl ToString) -> Self {
        Self::Render {
            chart: chart.into(),
            reason: reason.to_string(),
        }
    }

    /// True when the provider had nothing for the symbol
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }
}

/// Result type alias for finance operations
pub type Result<T> = std::result::Result<T, FinanceError>;

/// Convert FinanceError to agent_core::Error
impl From<FinanceError> for agent_core::Error {
    fn from(err: FinanceError) -> Self {
        agent_core::Error::ProcessingFailed(err.to_string())
    }
}

/// Convert agent_core::Error to FinanceError
impl From<agent_core::Error> for FinanceError {
    fn from(err: agent_core::Error) -> Self {
        FinanceError::Agent(err.to_string())
    }
}
