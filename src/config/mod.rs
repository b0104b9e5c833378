//! Configuration module for SINI intake
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SiniPaths;
pub use settings::{OutputFormat, Settings};
