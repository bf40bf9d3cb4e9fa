//! Execution context for task running
//!
//! The context is built once per process and only read afterwards: the
//! base environment snapshot, the loaded project file and the console
//! verbosity. Handlers derive their invocations from it and nothing else.

use crate::config::Config;
use crate::runner::BaseEnv;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Variable of the base environment that overrides the configured verbosity
pub const VERBOSITY_VAR: &str = "MKGO_VERBOSITY";

/// Execution context shared read-only by every handler
#[derive(Debug, Clone)]
pub struct Context {
    /// Inherited environment, captured at startup
    pub base_env: BaseEnv,

    /// Project settings
    pub config: Config,

    /// Project root, `None` for the current directory
    pub root: Option<PathBuf>,

    /// Verbosity level
    pub verbosity: Verbosity,
}

/// Verbosity levels for output
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    #[default]
    Normal = 2,
    Verbose = 3,
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "silent" => Ok(Verbosity::Silent),
            "quiet" => Ok(Verbosity::Quiet),
            "normal" => Ok(Verbosity::Normal),
            "verbose" => Ok(Verbosity::Verbose),
            other => Err(format!("unknown verbosity '{}'", other)),
        }
    }
}

impl Context {
    /// Create a context; `MKGO_VERBOSITY` in `base_env` beats `config.verbosity`
    pub fn new(base_env: BaseEnv, config: Config) -> Self {
        let verbosity = base_env
            .var(VERBOSITY_VAR)
            .and_then(|v| v.parse().ok())
            .unwrap_or(config.verbosity);

        Context {
            base_env,
            config,
            root: None,
            verbosity,
        }
    }

    /// Set the project root
    pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
        self.root = root;
        self
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Resolve a project-relative path against the root
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        match &self.root {
            Some(root) => root.join(relative),
            None => relative.as_ref().to_path_buf(),
        }
    }

    /// Print the one-line status shown before a handler spawns anything.
    ///
    /// Every handler prints exactly one, so verbosity does not gate it.
    pub fn print_status(&self, message: &str) {
        println!("{} {}", "==>".green().bold(), message.bold());
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        if self.verbosity >= Verbosity::Quiet {
            eprintln!("{} {}", "[ERROR]".red(), message);
        }
    }

    /// Print debug message (only in verbose mode)
    pub fn print_debug(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            eprintln!("{} {}", "[DEBUG]".dimmed(), message);
        }
    }
}
