//! Invocation specs
//!
//! An [`Invocation`] is everything needed to launch one child process:
//! working directory, program, argument vector and environment overlay.
//! Handlers build a fresh one per call; nothing is cached between tasks.

use crate::runner::EnvOverlay;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Working directory, `None` for the current directory
    pub working_dir: Option<PathBuf>,

    /// Executable name or path
    pub program: String,

    /// Arguments, in order
    pub args: Vec<String>,

    /// Variables layered over the base environment
    pub overlay: EnvOverlay,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Invocation {
            working_dir: None,
            program: program.into(),
            args: Vec::new(),
            overlay: EnvOverlay::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.working_dir = dir;
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overlay.set(key, value);
        self
    }

    pub fn with_overlay(mut self, overlay: EnvOverlay) -> Self {
        self.overlay = overlay;
        self
    }
}

/// Shell-like rendering for debug output, e.g. `CGO_ENABLED=0 go build`
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.overlay.iter() {
            write!(f, "{}={} ", key, quote(value))?;
        }
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(s: &str) -> String {
    if s.is_empty() || s.contains(char::is_whitespace) {
        format!("\"{}\"", s)
    } else {
        s.to_string()
    }
}
