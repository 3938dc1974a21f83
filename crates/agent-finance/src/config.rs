//! Configuration for the finance dashboard

use crate::error::{FinanceError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default LLM served by Nebius AI Studio
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct";

/// Default directory for charts and reports
pub const DEFAULT_OUTPUT_DIR: &str = "reports";

/// Configuration shared by the terminal and web front ends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Directory receiving charts and markdown reports
    pub output_dir: PathBuf,

    /// Model identifier sent to the LLM endpoint
    pub model: String,

    /// API key for the LLM endpoint (not validated up front)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Override for the LLM endpoint base URL
    pub api_base: Option<String>,

    /// Chart canvas width in pixels
    pub chart_width: u32,

    /// Chart canvas height in pixels
    pub chart_height: u32,

    /// Trailing window of daily history, in calendar days
    pub history_days: i64,

    /// Maximum tool-calling rounds per agent run
    pub max_iterations: usize,

    /// Maximum tokens per completion
    pub max_tokens: usize,

    /// Request timeout for outbound HTTP calls
    pub request_timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            api_base: None,
            chart_width: 1000,
            chart_height: 600,
            history_days: 365,
            max_iterations: 10,
            max_tokens: 4096,
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration builder
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// Load configuration from environment variables
    ///
    /// Reads `NEBIUS_API_KEY`, `NEBIUS_API_BASE`, `FINANCE_MODEL` and
    /// `FINANCE_OUTPUT_DIR`; anything unset keeps its default.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut builder = Self::builder();
        if let Some(key) = non_empty("NEBIUS_API_KEY") {
            builder = builder.api_key(key);
        }
        if let Some(base) = non_empty("NEBIUS_API_BASE") {
            builder = builder.api_base(base);
        }
        if let Some(model) = non_empty("FINANCE_MODEL") {
            builder = builder.model(model);
        }
        if let Some(dir) = non_empty("FINANCE_OUTPUT_DIR") {
            builder = builder.output_dir(dir);
        }
        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(FinanceError::Config("output_dir must not be empty".to_string()));
        }

        if self.model.trim().is_empty() {
            return Err(FinanceError::Config("model must not be empty".to_string()));
        }

        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(FinanceError::Config(format!(
                "chart size must be non-zero, got {}x{}",
                self.chart_width, self.chart_height
            )));
        }

        if self.history_days <= 0 {
            return Err(FinanceError::Config(
                "history_days must be greater than 0".to_string(),
            ));
        }

        if self.max_iterations == 0 {
            return Err(FinanceError::Config(
                "max_iterations must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for DashboardConfig
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    output_dir: Option<PathBuf>,
    model: Option<String>,
    api_key: Option<String>,
    api_base: Option<String>,
    chart_width: Option<u32>,
    chart_height: Option<u32>,
    history_days: Option<i64>,
    max_iterations: Option<usize>,
    max_tokens: Option<usize>,
    request_timeout: Option<Duration>,
}

impl DashboardConfigBuilder {
    /// Set the output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the LLM API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the LLM API base URL
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Set the chart canvas size
    pub fn chart_size(mut self, width: u32, height: u32) -> Self {
        self.chart_width = Some(width);
        self.chart_height = Some(height);
        self
    }

    /// Set the history window in calendar days
    pub fn history_days(mut self, days: i64) -> Self {
        self.history_days = Some(days);
        self
    }

    /// Set maximum tool-calling rounds
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = Some(max);
        self
    }

    /// Set max tokens per completion
    pub fn max_tokens(mut self, max: usize) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<DashboardConfig> {
        let defaults = DashboardConfig::default();

        let config = DashboardConfig {
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            model: self.model.unwrap_or(defaults.model),
            api_key: self.api_key,
            api_base: self.api_base,
            chart_width: self.chart_width.unwrap_or(defaults.chart_width),
            chart_height: self.chart_height.unwrap_or(defaults.chart_height),
            history_days: self.history_days.unwrap_or(defaults.history_days),
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("reports"));
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!((config.chart_width, config.chart_height), (1000, 600));
        assert_eq!(config.history_days, 365);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = DashboardConfig::builder()
            .output_dir("out")
            .model("test-model")
            .chart_size(640, 480)
            .max_iterations(3)
            .build()
            .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.model, "test-model");
        assert_eq!(config.chart_width, 640);
        assert_eq!(config.max_iterations, 3);
    }

    #[test]
    fn test_validation() {
        assert!(DashboardConfig::builder().chart_size(0, 600).build().is_err());
        assert!(DashboardConfig::builder().model("  ").build().is_err());
        assert!(DashboardConfig::builder().history_days(0).build().is_err());
        assert!(DashboardConfig::builder().max_iterations(0).build().is_err());
        assert!(DashboardConfig::builder().output_dir("").build().is_err());
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("NEBIUS_API_KEY", "secret"),
            ("FINANCE_MODEL", "other-model"),
            ("FINANCE_OUTPUT_DIR", "/tmp/finance"),
            ("NEBIUS_API_BASE", ""),
        ]);

        let config =
            DashboardConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_string())).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "other-model");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/finance"));
        assert!(config.api_base.is_none());
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = DashboardConfig::builder().api_key("secret").build().unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
