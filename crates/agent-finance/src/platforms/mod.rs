//! Front ends over the shared query orchestrator

pub mod terminal;
pub mod web;

pub use terminal::TerminalApp;
pub use web::{WebState, router, serve};
