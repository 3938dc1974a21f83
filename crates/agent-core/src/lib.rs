//! Core abstractions for agent-rs
//!
//! This crate defines the `Agent` trait, the response envelope agents hand
//! back to their callers, and the shared error type.

pub mod agent;
pub mod error;
pub mod response;

pub use agent::Agent;
pub use error::{Error, Result};
pub use response::{AgentResponse, CompletionStatus, UsageSummary};
