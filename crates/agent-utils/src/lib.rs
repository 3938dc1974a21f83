//! Shared utilities for agent-rs
//!
//! Logging setup and `.env` loading used by the binaries in this workspace.

pub mod env;
pub mod logging;

pub use env::{load_dotenv, load_dotenv_from};
pub use logging::{LogFormat, init_tracing, init_tracing_with};
