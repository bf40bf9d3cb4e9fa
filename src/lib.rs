//! mkgo - a fixed-recipe build orchestrator for Go applications
//!
//! mkgo maps a single task name (`test`, `build`, `linux`, `run`, `lint`,
//! `check`, `help`) to a fixed sequence of toolchain invocations, each with
//! its own working directory, argument vector and environment overlay.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;

// Re-export commonly used types
pub use error::{MkgoError, Result};

/// Current version of mkgo
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
