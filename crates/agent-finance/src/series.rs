//! Daily price series and the transformations charted from them

use crate::error::{FinanceError, Result};
use crate::symbol::Symbol;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Exchange-local trading date
    pub date: NaiveDate,
    /// Closing price
    pub close: f64,
    /// Shares traded
    pub volume: u64,
}

impl PriceRecord {
    /// Create a record
    pub fn new(date: NaiveDate, close: f64, volume: u64) -> Self {
        Self {
            date,
            close,
            volume,
        }
    }
}

/// Ascending, non-empty daily history for one symbol
///
/// Every close is finite and positive, so the first close is always a valid
/// normalization base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: Symbol,
    records: Vec<PriceRecord>,
}

impl PriceSeries {
    /// Build a series, checking its invariants
    pub fn new(symbol: Symbol, records: Vec<PriceRecord>) -> Result<Self> {
        let invalid = |reason: String| FinanceError::InvalidSeries {
            symbol: symbol.to_string(),
            reason,
        };

        if records.is_empty() {
            return Err(FinanceError::NoData {
                symbol: symbol.to_string(),
            });
        }

        if let Some(bad) = records
            .iter()
            .find(|r| !r.close.is_finite() || r.close <= 0.0)
        {
            return Err(invalid(format!("close {} on {}", bad.close, bad.date)));
        }

        if let Some(pair) = records.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(invalid(format!(
                "dates not ascending: {} then {}",
                pair[0].date, pair[1].date
            )));
        }

        Ok(Self { symbol, records })
    }

    /// The ticker
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// All records, oldest first
    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    /// Number of trading days
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record
    pub fn first(&self) -> &PriceRecord {
        &self.records[0]
    }

    /// Most recent record
    pub fn last(&self) -> &PriceRecord {
        &self.records[self.records.len() - 1]
    }

    /// Date span covered, inclusive
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        (self.first().date, self.last().date)
    }

    /// Closes rescaled so the first value is exactly 100
    pub fn normalized(&self) -> Vec<(NaiveDate, f64)> {
        let base = self.first().close;
        self.records
            .iter()
            .map(|r| (r.date, r.close / base * 100.0))
            .collect()
    }

    /// Day-over-day fractional change; the first entry has no predecessor
    pub fn daily_returns(&self) -> Vec<(NaiveDate, Option<f64>)> {
        let mut returns = Vec::with_capacity(self.records.len());
        returns.push((self.first().date, None));
        returns.extend(
            self.records
                .windows(2)
                .map(|w| (w[1].date, Some((w[1].close - w[0].close) / w[0].close))),
        );
        returns
    }

    /// Volume per day
    pub fn volumes(&self) -> Vec<(NaiveDate, u64)> {
        self.records.iter().map(|r| (r.date, r.volume)).collect()
    }

    /// Summary statistics over the whole window
    pub fn summary(&self) -> SeriesSummary {
        let first = self.first();
        let last = self.last();
        let (high, low) = self
            .records
            .iter()
            .fold((f64::MIN, f64::MAX), |(hi, lo), r| (hi.max(r.close), lo.min(r.close)));
        let total_volume: u64 = self.records.iter().map(|r| r.volume).sum();

        SeriesSummary {
            symbol: self.symbol.clone(),
            start: first.date,
            end: last.date,
            trading_days: self.records.len(),
            first_close: first.close,
            last_close: last.close,
            change_pct: (last.close - first.close) / first.close * 100.0,
            high_close: high,
            low_close: low,
            average_volume: total_volume as f64 / self.records.len() as f64,
        }
    }
}

/// Aggregates handed to the agent instead of the raw series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub symbol: Symbol,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub trading_days: usize,
    pub first_close: f64,
    pub last_close: f64,
    pub change_pct: f64,
    pub high_close: f64,
    pub low_close: f64,
    pub average_volume: f64,
}
