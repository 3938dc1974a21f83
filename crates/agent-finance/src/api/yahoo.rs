//! Yahoo Finance chart API client
//!
//! Uses the public v8 chart endpoint, which needs no API key. The same
//! response carries the daily bars and a `meta` block with the latest quote.
//! Valuation figures come from the v10 quoteSummary modules.

use crate::api::PriceSeriesFetcher;
use crate::error::{FinanceError, Result};
use crate::series::{PriceRecord, PriceSeries};
use crate::symbol::Symbol;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";
const SUMMARY_MODULES: &str = "price,summaryDetail,defaultKeyStatistics";

// Yahoo rejects requests without a browser-like agent
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

const SECONDS_PER_DAY: i64 = 86_400;

/// Yahoo Finance API client
#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
    summary_url: String,
    history_days: i64,
}

/// Latest quote taken from the chart metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub symbol: String,
    pub name: Option<String>,
    pub currency: Option<String>,
    pub exchange: Option<String>,
    pub price: Option<f64>,
    pub previous_close: Option<f64>,
    pub day_volume: Option<u64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
}

/// Valuation and per-share figures from quoteSummary
///
/// Ratios are plain numbers; `dividend_yield` is a fraction (0.005 = 0.5%).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    pub symbol: String,
    pub name: Option<String>,
    pub currency: Option<String>,
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub forward_pe: Option<f64>,
    pub trailing_eps: Option<f64>,
    pub book_value: Option<f64>,
    pub price_to_book: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub beta: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    symbol: Option<String>,
    currency: Option<String>,
    exchange_name: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
    regular_market_price: Option<f64>,
    chart_previous_close: Option<f64>,
    regular_market_volume: Option<f64>,
    fifty_two_week_high: Option<f64>,
    fifty_two_week_low: Option<f64>,
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryEnvelope {
    quote_summary: SummaryBody,
}

#[derive(Debug, Deserialize)]
struct SummaryBody {
    result: Option<Vec<SummaryResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SummaryResult {
    price: SummaryPrice,
    summary_detail: SummaryDetail,
    default_key_statistics: KeyStatistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SummaryPrice {
    symbol: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
    currency: Option<String>,
    regular_market_price: RawNumber,
    market_cap: RawNumber,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SummaryDetail {
    market_cap: RawNumber,
    #[serde(rename = "trailingPE")]
    trailing_pe: RawNumber,
    #[serde(rename = "forwardPE")]
    forward_pe: RawNumber,
    dividend_yield: RawNumber,
    beta: RawNumber,
    fifty_two_week_high: RawNumber,
    fifty_two_week_low: RawNumber,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct KeyStatistics {
    trailing_eps: RawNumber,
    book_value: RawNumber,
    price_to_book: RawNumber,
    beta: RawNumber,
}

/// `{"raw": 1.5, "fmt": "1.50"}`; empty objects and `"Infinity"` read as absent
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawNumber {
    raw: Option<Value>,
}

impl RawNumber {
    fn get(&self) -> Option<f64> {
        self.raw.as_ref().and_then(Value::as_f64).filter(|v| v.is_finite())
    }
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteIndicator>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteIndicator {
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

impl YahooFinanceClient {
    /// Create a client fetching the default 365-day window
    pub fn new() -> Result<Self> {
        Self::with_settings(365, Duration::from_secs(30))
    }

    /// Create a client with a custom window and request timeout
    pub fn with_settings(history_days: i64, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
            summary_url: SUMMARY_URL.to_string(),
            history_days,
        })
    }

    /// Point the client at another chart endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Point the client at another quoteSummary endpoint
    pub fn with_summary_url(mut self, summary_url: impl Into<String>) -> Self {
        self.summary_url = summary_url.into();
        self
    }

    /// Trailing window in calendar days
    pub fn history_days(&self) -> i64 {
        self.history_days
    }

    /// Fetch the trailing daily history for a symbol
    pub async fn get_history(&self, symbol: &Symbol) -> Result<PriceSeries> {
        let end = Utc::now().timestamp();
        let start = end - self.history_days * SECONDS_PER_DAY;
        let result = self
            .fetch_chart(
                symbol,
                &[
                    ("period1", start.to_string()),
                    ("period2", end.to_string()),
                    ("interval", "1d".to_string()),
                ],
            )
            .await?;

        let records = records_from(symbol, &result)?;
        info!(symbol = %symbol, rows = records.len(), "Fetched price history");
        PriceSeries::new(symbol.clone(), records)
    }

    /// Fetch the latest quote for a symbol
    pub async fn get_quote(&self, symbol: &Symbol) -> Result<QuoteSnapshot> {
        let result = self
            .fetch_chart(
                symbol,
                &[("range", "5d".to_string()), ("interval", "1d".to_string())],
            )
            .await?;

        Ok(snapshot_from(symbol, result.meta))
    }

    /// Fetch valuation figures for a symbol
    pub async fn get_fundamentals(&self, symbol: &Symbol) -> Result<Fundamentals> {
        let url = symbol_url(&self.summary_url, symbol)?;
        debug!(symbol = %symbol, url = %url, "Requesting Yahoo quoteSummary");

        let envelope: SummaryEnvelope = self
            .fetch_json(symbol, url, &[("modules", SUMMARY_MODULES.to_string())])
            .await?;
        let result = first_summary(symbol, envelope)?;

        info!(symbol = %symbol, "Fetched fundamentals");
        Ok(fundamentals_from(symbol, result))
    }

    async fn fetch_chart(&self, symbol: &Symbol, query: &[(&str, String)]) -> Result<ChartResult> {
        let url = self.chart_url(symbol)?;
        debug!(symbol = %symbol, url = %url, "Requesting Yahoo chart");

        let envelope: ChartEnvelope = self.fetch_json(symbol, url, query).await?;
        first_result(symbol, envelope)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        symbol: &Symbol,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            warn!(symbol = %symbol, "Yahoo returned Not Found");
            return Err(FinanceError::NoData {
                symbol: symbol.to_string(),
            });
        }

        if !status.is_success() {
            return Err(FinanceError::Api(format!("Yahoo Finance HTTP error: {status}")));
        }

        Ok(response.json().await?)
    }

    fn chart_url(&self, symbol: &Symbol) -> Result<Url> {
        symbol_url(&self.base_url, symbol)
    }
}

fn symbol_url(base: &str, symbol: &Symbol) -> Result<Url> {
    let mut url =
        Url::parse(base).map_err(|e| FinanceError::Config(format!("Invalid Yahoo base URL: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| FinanceError::Config("Yahoo base URL cannot be a base".to_string()))?
        .pop_if_empty()
        .push(symbol.as_str());
    Ok(url)
}

#[async_trait]
impl PriceSeriesFetcher for YahooFinanceClient {
    async fn fetch(&self, symbol: &Symbol) -> Result<PriceSeries> {
        self.get_history(symbol).await
    }
}

fn first_result(symbol: &Symbol, envelope: ChartEnvelope) -> Result<ChartResult> {
    if let Some(error) = envelope.chart.error {
        debug!(
            symbol = %symbol,
            code = %error.code,
            description = error.description.as_deref().unwrap_or_default(),
            "Yahoo chart error"
        );
        return Err(FinanceError::NoData {
            symbol: symbol.to_string(),
        });
    }

    envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| FinanceError::NoData {
            symbol: symbol.to_string(),
        })
}

fn first_summary(symbol: &Symbol, envelope: SummaryEnvelope) -> Result<SummaryResult> {
    if let Some(error) = envelope.quote_summary.error {
        debug!(
            symbol = %symbol,
            code = %error.code,
            description = error.description.as_deref().unwrap_or_default(),
            "Yahoo quoteSummary error"
        );
        return Err(FinanceError::NoData {
            symbol: symbol.to_string(),
        });
    }

    envelope
        .quote_summary
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| FinanceError::NoData {
            symbol: symbol.to_string(),
        })
}

fn fundamentals_from(symbol: &Symbol, result: SummaryResult) -> Fundamentals {
    let SummaryResult {
        price,
        summary_detail: detail,
        default_key_statistics: stats,
    } = result;

    let last = price.regular_market_price.get();
    let book_value = stats.book_value.get();
    let price_to_book = stats.price_to_book.get().or_else(|| match (last, book_value) {
        (Some(p), Some(bv)) if bv > 0.0 => Some(p / bv),
        _ => None,
    });

    Fundamentals {
        symbol: price.symbol.unwrap_or_else(|| symbol.to_string()),
        name: price.long_name.or(price.short_name),
        currency: price.currency,
        price: last,
        market_cap: price.market_cap.get().or_else(|| detail.market_cap.get()),
        trailing_pe: detail.trailing_pe.get(),
        forward_pe: detail.forward_pe.get(),
        trailing_eps: stats.trailing_eps.get(),
        book_value,
        price_to_book,
        dividend_yield: detail.dividend_yield.get(),
        beta: detail.beta.get().or_else(|| stats.beta.get()),
        fifty_two_week_high: detail.fifty_two_week_high.get(),
        fifty_two_week_low: detail.fifty_two_week_low.get(),
    }
}

/// Project chart rows to records, dropping bars without a close
fn records_from(symbol: &Symbol, result: &ChartResult) -> Result<Vec<PriceRecord>> {
    let Some(quote) = result.indicators.quote.first() else {
        return Err(FinanceError::NoData {
            symbol: symbol.to_string(),
        });
    };

    let offset = result.meta.gmtoffset;
    let mut records: Vec<PriceRecord> = Vec::with_capacity(result.timestamp.len());

    for (i, ts) in result.timestamp.iter().enumerate() {
        let Some(close) = quote.close.get(i).copied().flatten() else {
            continue;
        };
        let volume = quote.volume.get(i).copied().flatten().unwrap_or(0.0).max(0.0) as u64;
        let Some(date) = local_date(*ts, offset) else {
            warn!(symbol = %symbol, timestamp = ts, "Skipping bar with invalid timestamp");
            continue;
        };

        let record = PriceRecord::new(date, close, volume);
        match records.last_mut() {
            // The live bar can repeat the last session's date
            Some(last) if last.date == date => *last = record,
            _ => records.push(record),
        }
    }

    if records.is_empty() {
        return Err(FinanceError::NoData {
            symbol: symbol.to_string(),
        });
    }

    Ok(records)
}

fn local_date(timestamp: i64, gmtoffset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp + gmtoffset, 0).map(|dt| dt.date_naive())
}

fn snapshot_from(symbol: &Symbol, meta: ChartMeta) -> QuoteSnapshot {
    QuoteSnapshot {
        symbol: meta.symbol.unwrap_or_else(|| symbol.to_string()),
        name: meta.long_name.or(meta.short_name),
        currency: meta.currency,
        exchange: meta.exchange_name,
        price: meta.regular_market_price,
        previous_close: meta.chart_previous_close,
        day_volume: meta.regular_market_volume.map(|v| v.max(0.0) as u64),
        fifty_two_week_high: meta.fifty_two_week_high,
        fifty_two_week_low: meta.fifty_two_week_low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> ChartEnvelope {
        serde_json::from_value(value).unwrap()
    }

    fn symbol(ticker: &str) -> Symbol {
        Symbol::new(ticker).unwrap()
    }

    fn sample() -> serde_json::Value {
        json!({
            "chart": {
                "result": [{
                    "meta": {
                        "symbol": "AAPL",
                        "currency": "USD",
                        "exchangeName": "NMS",
                        "longName": "Apple Inc.",
                        "regularMarketPrice": 190.5,
                        "chartPreviousClose": 188.0,
                        "regularMarketVolume": 51234567,
                        "fiftyTwoWeekHigh": 199.6,
                        "fiftyTwoWeekLow": 164.1,
                        "gmtoffset": -18000
                    },
                    // 2024-01-02 14:30 UTC, 2024-01-03 14:30 UTC, 2024-01-04 14:30 UTC
                    "timestamp": [1704205800, 1704292200, 1704378600],
                    "indicators": {
                        "quote": [{
                            "close": [185.6, null, 181.9],
                            "volume": [82488700, 58414500, null]
                        }]
                    }
                }],
                "error": null
            }
        })
    }

    #[test]
    fn test_records_drop_missing_closes() {
        let result = first_result(&symbol("AAPL"), envelope(sample())).unwrap();
        let records = records_from(&symbol("AAPL"), &result).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(records[0].close, 185.6);
        assert_eq!(records[0].volume, 82_488_700);
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
        assert_eq!(records[1].volume, 0);
    }

    #[test]
    fn test_dates_use_exchange_offset() {
        // 2024-01-03 03:00 UTC is still 2024-01-02 in New York
        assert_eq!(
            local_date(1_704_250_800, -18_000),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );
        assert_eq!(
            local_date(1_704_250_800, 0),
            NaiveDate::from_ymd_opt(2024, 1, 3)
        );
    }

    #[test]
    fn test_duplicate_date_keeps_latest_bar() {
        let mut value = sample();
        value["chart"]["result"][0]["timestamp"] = json!([1704205800, 1704207600]);
        value["chart"]["result"][0]["indicators"]["quote"][0] =
            json!({"close": [185.6, 186.1], "volume": [1, 2]});

        let result = first_result(&symbol("AAPL"), envelope(value)).unwrap();
        let records = records_from(&symbol("AAPL"), &result).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].close, 186.1);
    }

    #[test]
    fn test_not_found_envelope_is_no_data() {
        let value = json!({
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
            }
        });
        let err = first_result(&symbol("ZZZZINVALID"), envelope(value)).unwrap_err();
        assert!(matches!(err, FinanceError::NoData { symbol } if symbol == "ZZZZINVALID"));
    }

    #[test]
    fn test_empty_rows_are_no_data() {
        let mut value = sample();
        value["chart"]["result"][0]["timestamp"] = json!([]);
        let result = first_result(&symbol("AAPL"), envelope(value)).unwrap();
        assert!(records_from(&symbol("AAPL"), &result).unwrap_err().is_no_data());

        let mut value = sample();
        value["chart"]["result"][0]["indicators"]["quote"][0]["close"] = json!([null, null, null]);
        let result = first_result(&symbol("AAPL"), envelope(value)).unwrap();
        assert!(records_from(&symbol("AAPL"), &result).unwrap_err().is_no_data());
    }

    #[test]
    fn test_snapshot_from_meta() {
        let result = first_result(&symbol("AAPL"), envelope(sample())).unwrap();
        let quote = snapshot_from(&symbol("AAPL"), result.meta);

        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.name.as_deref(), Some("Apple Inc."));
        assert_eq!(quote.price, Some(190.5));
        assert_eq!(quote.day_volume, Some(51_234_567));
        assert_eq!(quote.fifty_two_week_low, Some(164.1));
    }

    #[test]
    fn test_chart_url_keeps_symbol_in_one_segment() {
        let client = YahooFinanceClient::new().unwrap();
        let url = client.chart_url(&symbol("brk.b")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://query1.finance.yahoo.com/v8/finance/chart/BRK.B"
        );

        let url = client.chart_url(&symbol("a/b")).unwrap();
        assert_eq!(url.path(), "/v8/finance/chart/A%2FB");
    }

    fn summary() -> serde_json::Value {
        json!({
            "quoteSummary": {
                "result": [{
                    "price": {
                        "symbol": "AAPL",
                        "longName": "Apple Inc.",
                        "currency": "USD",
                        "regularMarketPrice": {"raw": 190.5, "fmt": "190.50"},
                        "marketCap": {"raw": 2_950_000_000_000_i64, "fmt": "2.95T"}
                    },
                    "summaryDetail": {
                        "trailingPE": {"raw": 29.6, "fmt": "29.60"},
                        "forwardPE": {"raw": 27.1, "fmt": "27.10"},
                        "dividendYield": {"raw": 0.0051, "fmt": "0.51%"},
                        "beta": {"raw": 1.29, "fmt": "1.29"},
                        "fiftyTwoWeekHigh": {"raw": 199.6, "fmt": "199.60"},
                        "fiftyTwoWeekLow": {"raw": 164.1, "fmt": "164.10"}
                    },
                    "defaultKeyStatistics": {
                        "trailingEps": {"raw": 6.43, "fmt": "6.43"},
                        "bookValue": {"raw": 4.79, "fmt": "4.79"},
                        "priceToBook": {"raw": 39.77, "fmt": "39.77"}
                    }
                }],
                "error": null
            }
        })
    }

    fn summary_result(value: serde_json::Value) -> Result<SummaryResult> {
        first_summary(&symbol("AAPL"), serde_json::from_value(value).unwrap())
    }

    #[test]
    fn test_fundamentals_from_summary() {
        let f = fundamentals_from(&symbol("AAPL"), summary_result(summary()).unwrap());

        assert_eq!(f.symbol, "AAPL");
        assert_eq!(f.name.as_deref(), Some("Apple Inc."));
        assert_eq!(f.price, Some(190.5));
        assert_eq!(f.market_cap, Some(2.95e12));
        assert_eq!(f.trailing_pe, Some(29.6));
        assert_eq!(f.forward_pe, Some(27.1));
        assert_eq!(f.trailing_eps, Some(6.43));
        assert_eq!(f.price_to_book, Some(39.77));
        assert_eq!(f.dividend_yield, Some(0.0051));
        assert_eq!(f.beta, Some(1.29));
        assert_eq!(f.fifty_two_week_high, Some(199.6));
    }

    #[test]
    fn test_fundamentals_fill_gaps_from_other_modules() {
        let mut value = summary();
        let result = &mut value["quoteSummary"]["result"][0];
        result["price"]["marketCap"] = json!({});
        result["summaryDetail"]["marketCap"] = json!({"raw": 3.0e12});
        result["summaryDetail"]["beta"] = json!({});
        result["summaryDetail"]["trailingPE"] = json!({"raw": "Infinity", "fmt": "∞"});
        result["summaryDetail"]
            .as_object_mut()
            .unwrap()
            .remove("dividendYield");
        result["defaultKeyStatistics"]["beta"] = json!({"raw": 1.1});
        result["defaultKeyStatistics"]["priceToBook"] = json!({});
        result["defaultKeyStatistics"]["bookValue"] = json!({"raw": 5.0});

        let f = fundamentals_from(&symbol("AAPL"), summary_result(value).unwrap());

        assert_eq!(f.market_cap, Some(3.0e12));
        assert_eq!(f.beta, Some(1.1));
        assert_eq!(f.trailing_pe, None);
        assert_eq!(f.dividend_yield, None);
        assert_eq!(f.price_to_book, Some(190.5 / 5.0));
    }

    #[test]
    fn test_summary_missing_modules_are_absent() {
        let value = json!({"quoteSummary": {"result": [{"price": {"regularMarketPrice": {"raw": 10.0}}}], "error": null}});
        let f = fundamentals_from(&symbol("XYZ"), summary_result(value).unwrap());

        assert_eq!(f.symbol, "XYZ");
        assert_eq!(f.price, Some(10.0));
        assert_eq!(f.market_cap, None);
        assert_eq!(f.trailing_eps, None);
    }

    #[test]
    fn test_summary_not_found_is_no_data() {
        let value = json!({
            "quoteSummary": {
                "result": null,
                "error": {"code": "Not Found", "description": "Quote not found for symbol: ZZZZINVALID"}
            }
        });
        assert!(summary_result(value).unwrap_err().is_no_data());

        let value = json!({"quoteSummary": {"result": [], "error": null}});
        assert!(summary_result(value).unwrap_err().is_no_data());
    }

    #[test]
    fn test_summary_url_uses_symbol_segment() {
        let client = YahooFinanceClient::new()
            .unwrap()
            .with_summary_url("http://localhost:9/v10/finance/quoteSummary/");
        let url = symbol_url(&client.summary_url, &symbol("msft")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9/v10/finance/quoteSummary/MSFT");
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_get_fundamentals_live() {
        let client = YahooFinanceClient::new().unwrap();
        let f = client.get_fundamentals(&symbol("AAPL")).await.unwrap();
        assert!(f.market_cap.is_some());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_get_history_live() {
        let client = YahooFinanceClient::new().unwrap();
        let series = client.get_history(&symbol("AAPL")).await.unwrap();
        assert!(series.len() > 200);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_unknown_symbol_live() {
        let client = YahooFinanceClient::new().unwrap();
        let err = client.get_history(&symbol("ZZZZINVALID")).await.unwrap_err();
        assert!(err.is_no_data());
    }
}
