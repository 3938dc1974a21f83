//! Tool management for agent-rs
//!
//! Tools are async functions with a JSON Schema that an LLM can ask the
//! agent runtime to call.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::Tool;
