//! The finance analysis agent

use agent_core::{Agent, AgentResponse, Result};
use agent_llm::LLMProvider;
use agent_llm::providers::{OpenAIConfig, OpenAIProvider};
use agent_runtime::{AgentExecutor, ExecutorConfig, ToolAgent};
use agent_tools::{Tool, ToolRegistry};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::api::{DuckDuckGoClient, PriceSeriesFetcher, YahooFinanceClient};
use crate::config::DashboardConfig;
use crate::prompts;
use crate::tools::{FundamentalsTool, PriceHistoryTool, StockPriceTool, WebSearchTool};

/// Tool-calling agent with market data and web search tools
pub struct FinanceAgent {
    agent: ToolAgent,
}

impl FinanceAgent {
    /// Create the agent against the Nebius endpoint described by `config`
    ///
    /// A missing API key is not an error here; the first request fails with
    /// an authentication error instead.
    pub fn from_config(config: &DashboardConfig, fetcher: Arc<dyn PriceSeriesFetcher>) -> Result<Self> {
        let mut llm_config = OpenAIConfig::nebius(config.api_key.clone().unwrap_or_default())
            .with_timeout(config.request_timeout.as_secs());
        if let Some(base) = &config.api_base {
            llm_config = llm_config.with_api_base(base.clone());
        }
        if config.api_key.is_none() {
            tracing::warn!("NEBIUS_API_KEY is not set; agent requests will be rejected");
        }

        let provider = OpenAIProvider::with_config(llm_config)
            .map_err(|e| agent_core::Error::InitializationFailed(e.to_string()))?;

        Self::new(Arc::new(provider), config, fetcher)
    }

    /// Create the agent with an explicit provider
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        config: &DashboardConfig,
        fetcher: Arc<dyn PriceSeriesFetcher>,
    ) -> Result<Self> {
        let yahoo = YahooFinanceClient::with_settings(config.history_days, config.request_timeout)?;
        let search = DuckDuckGoClient::with_timeout(config.request_timeout)?;

        let tools: Vec<Arc<dyn Tool>> = vec![
            Arc::new(StockPriceTool::new(yahoo.clone())),
            Arc::new(FundamentalsTool::new(yahoo)),
            Arc::new(PriceHistoryTool::new(fetcher)),
            Arc::new(WebSearchTool::new(search)),
        ];
        Self::with_tools(provider, config, tools)
    }

    /// Create the agent with an explicit tool set
    pub fn with_tools(
        provider: Arc<dyn LLMProvider>,
        config: &DashboardConfig,
        tools: Vec<Arc<dyn Tool>>,
    ) -> Result<Self> {
        let registry = Arc::new(ToolRegistry::new());
        for tool in tools {
            registry.register(tool);
        }

        let tool_names: Vec<String> = registry
            .list_tools()
            .iter()
            .map(|tool| tool.name().to_string())
            .collect();
        let name_refs: Vec<&str> = tool_names.iter().map(String::as_str).collect();
        let system_prompt = prompts::system_prompt(&name_refs)?;

        let executor_config = ExecutorConfig {
            model: config.model.clone(),
            system_prompt: Some(system_prompt),
            max_tokens: config.max_tokens,
            max_iterations: config.max_iterations,
            ..ExecutorConfig::default()
        };

        let executor = AgentExecutor::new(provider, registry, executor_config);
        info!(model = %config.model, tools = ?tool_names, "Finance agent ready");

        Ok(Self {
            agent: ToolAgent::from_parts(executor, prompts::AGENT_NAME),
        })
    }
}

#[async_trait]
impl Agent for FinanceAgent {
    async fn run(&self, prompt: String) -> Result<AgentResponse> {
        self.agent.run(prompt).await
    }

    fn name(&self) -> &str {
        self.agent.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockPriceSeriesFetcher;
    use agent_llm::{CompletionRequest, CompletionResponse, Message, StopReason, TokenUsage};

    struct ScriptedProvider;

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(&self, request: CompletionRequest) -> agent_llm::Result<CompletionResponse> {
            let system = request.system.unwrap_or_default();
            let tools = request
                .tools
                .map(|tools| tools.iter().map(|t| t.name.clone()).collect::<Vec<_>>().join(","))
                .unwrap_or_default();
            Ok(CompletionResponse {
                message: Message::assistant(format!("tools={tools} rules={}", system.contains("markdown tables"))),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage::default(),
            })
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn test_agent_sends_tools_and_instructions() {
        let config = DashboardConfig::default();
        let agent = FinanceAgent::new(
            Arc::new(ScriptedProvider),
            &config,
            Arc::new(MockPriceSeriesFetcher::new()),
        )
        .unwrap();

        assert_eq!(agent.name(), "xAI Finance Agent");
        let response = agent.run("AAPL".to_string()).await.unwrap();
        assert_eq!(
            response.text(),
            "tools=fundamentals,price_history,stock_price,web_search rules=true"
        );
    }

    #[test]
    fn test_from_config_without_key() {
        let config = DashboardConfig::default();
        assert!(FinanceAgent::from_config(&config, Arc::new(MockPriceSeriesFetcher::new())).is_ok());
    }
}
