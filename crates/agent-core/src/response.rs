//! Response envelope returned by agents
//!
//! The envelope carries the generated text when there is one, plus enough
//! bookkeeping (iterations, token usage, stop status) for callers to explain
//! a run that ended without text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How an agent run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    /// The model finished its turn
    Completed,
    /// The model hit its token limit
    Truncated,
    /// The tool loop ran out of iterations
    IterationLimit,
}

/// Token usage accumulated over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSummary {
    /// Prompt tokens across all completions
    pub input_tokens: usize,
    /// Generated tokens across all completions
    pub output_tokens: usize,
}

impl UsageSummary {
    /// Add another completion's usage
    pub fn add(&mut self, input_tokens: usize, output_tokens: usize) {
        self.input_tokens += input_tokens;
        self.output_tokens += output_tokens;
    }

    /// Total tokens used
    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }
}

/// The result of an agent run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResponse {
    /// Name of the agent that produced the response
    pub agent: String,

    /// Generated text, if the run produced any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// How the run ended
    pub status: CompletionStatus,

    /// Number of model round-trips
    pub iterations: usize,

    /// Token usage
    pub usage: UsageSummary,
}

impl AgentResponse {
    /// Create a completed response with text content
    pub fn completed(agent: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            content: Some(content.into()),
            status: CompletionStatus::Completed,
            iterations: 1,
            usage: UsageSummary::default(),
        }
    }

    /// Textual content of the response
    ///
    /// Returns `content` when present, otherwise the whole envelope
    /// serialized as JSON.
    pub fn text(&self) -> String {
        match &self.content {
            Some(content) => content.clone(),
            None => serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}")),
        }
    }

    /// Consume the response and return its text
    pub fn into_text(self) -> String {
        match self.content {
            Some(content) => content,
            None => {
                let envelope = Self {
                    content: None,
                    ..self
                };
                envelope.text()
            }
        }
    }
}

impl fmt::Display for AgentResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
