//! Tool agent implementation (wraps AgentExecutor)

use crate::executor::AgentExecutor;
use agent_core::{Agent, AgentResponse, Result};
use async_trait::async_trait;

/// An agent that uses the LLM loop with tool execution
///
/// ToolAgent wraps the AgentExecutor to provide the Agent trait interface.
/// The executor outcome is turned into an [`AgentResponse`] so callers keep
/// the stop status and token usage next to the text.
///
/// # Example
///
/// ```no_run
/// use agent_core::Agent;
/// use agent_llm::providers::{OpenAIConfig, OpenAIProvider};
/// use agent_runtime::{AgentExecutor, ToolAgent};
/// use std::sync::Arc;
///
/// # async fn example() -> agent_core::Result<()> {
/// let provider = OpenAIProvider::with_config(OpenAIConfig::nebius_from_env())
///     .map_err(|e| agent_core::Error::InitializationFailed(e.to_string()))?;
/// let executor = AgentExecutor::builder()
///     .provider(Arc::new(provider))
///     .system_prompt("You are a finance assistant")
///     .build()?;
///
/// let agent = ToolAgent::from_parts(executor, "finance");
/// let response = agent.run("Analyze AAPL".to_string()).await?;
/// println!("{response}");
/// # Ok(())
/// # }
/// ```
pub struct ToolAgent {
    executor: AgentExecutor,
    name: String,
}

impl ToolAgent {
    /// Create a new tool agent
    pub fn new(executor: AgentExecutor, name: String) -> Self {
        Self { executor, name }
    }

    /// Create a tool agent from parts
    pub fn from_parts(executor: AgentExecutor, name: impl Into<String>) -> Self {
        Self {
            executor,
            name: name.into(),
        }
    }

    /// Get a reference to the underlying executor
    pub fn executor(&self) -> &AgentExecutor {
        &self.executor
    }
}

#[async_trait]
impl Agent for ToolAgent {
    async fn run(&self, prompt: String) -> Result<AgentResponse> {
        let outcome = self.executor.run(prompt).await?;
        Ok(AgentResponse {
            agent: self.name.clone(),
            content: outcome.content,
            status: outcome.status,
            iterations: outcome.iterations,
            usage: outcome.usage,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::tests::{MockProvider, text_response};
    use agent_core::CompletionStatus;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_tool_agent_wraps_outcome() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .times(1)
            .returning(|_| Ok(text_response("## TSLA vs MSFT")));

        let executor = AgentExecutor::builder()
            .provider(Arc::new(provider))
            .build()
            .unwrap();
        let agent = ToolAgent::from_parts(executor, "finance");
        assert_eq!(agent.name(), "finance");

        let response = agent.run("TSLA,MSFT".to_string()).await.unwrap();
        assert_eq!(response.agent, "finance");
        assert_eq!(response.status, CompletionStatus::Completed);
        assert_eq!(response.text(), "## TSLA vs MSFT");
        assert_eq!(response.usage.total(), 15);
    }
}
