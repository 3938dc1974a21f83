//! Ticker symbols and ticker-list parsing

use crate::error::{FinanceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An uppercase, trimmed ticker symbol
///
/// Non-emptiness is the only validation; unknown tickers surface later as
/// an empty fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol from raw ticker text
    pub fn new(raw: &str) -> Result<Self> {
        let ticker = raw.trim();
        if ticker.is_empty() {
            return Err(FinanceError::InvalidSymbol(raw.to_string()));
        }
        Ok(Self(ticker.to_uppercase()))
    }

    /// The ticker text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = FinanceError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

/// Parse a free-form ticker list such as `"AAPL,MSFT"` or `"aapl vs msft"`
///
/// The literal `vs` (case-sensitive, anywhere in the text) acts as a
/// separator, as does `,`. Tokens are trimmed and uppercased; empty tokens
/// are dropped. Order and duplicates are preserved.
pub fn parse_symbols(input: &str) -> Vec<Symbol> {
    input
        .replace("vs", ",")
        .split(',')
        .filter_map(|token| Symbol::new(token).ok())
        .collect()
}
