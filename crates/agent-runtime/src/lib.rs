//! Agent runtime for executing tool-using agents
//!
//! [`AgentExecutor`] runs the LLM loop (complete, execute requested tools,
//! feed results back) and [`ToolAgent`] exposes it through the
//! [`agent_core::Agent`] trait.

pub mod agents;
pub mod executor;

pub use agents::ToolAgent;
pub use executor::{AgentExecutor, AgentExecutorBuilder, ExecutionOutcome, ExecutorConfig};
