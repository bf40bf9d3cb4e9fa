//! CLI interface
//!
//! This module handles task selection from the command line and help output.

pub mod app;

// Re-export main types
pub use app::*;
