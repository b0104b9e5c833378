//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer.

pub mod cases;
pub mod draft;
pub mod flow;

pub use cases::{handle_cases_command, CasesCommands};
pub use draft::{handle_draft_command, DraftCommands};
pub use flow::{handle_flow_command, FlowCommands};
