//! Core Agent trait definition

use crate::{AgentResponse, Result};
use async_trait::async_trait;

/// Core trait that all agents must implement
///
/// An agent turns a natural-language prompt into an [`AgentResponse`].
/// Callers usually only need [`AgentResponse::text`], but the full envelope
/// is kept so front ends can log usage and stop status.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Run the agent on a single prompt
    async fn run(&self, prompt: String) -> Result<AgentResponse>;

    /// Get the agent's name
    fn name(&self) -> &str;
}
