//! Project file types
//!
//! This module defines the data structures that represent an mkgo.yml file.
//! Every field is optional; the defaults reproduce the stock recipe.

use crate::runner::Verbosity;
use serde::{Deserialize, Serialize};

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Application name, used for `cmd/<app>` and `<dist>/<app>`
    pub app: String,

    /// Console verbosity (overridden by `MKGO_VERBOSITY`)
    pub verbosity: Verbosity,

    /// Executables to launch
    pub toolchain: Toolchain,

    /// Settings for the `test` task
    pub test: TestConfig,

    /// Settings for the `build` and `linux` tasks
    pub build: BuildConfig,

    /// Target pair for the `linux` task
    pub cross: CrossConfig,

    /// Settings for the `run` task
    pub run: RunConfig,

    /// Settings for the `check` task
    pub check: CheckConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: "go-gis".to_string(),
            verbosity: Verbosity::Normal,
            toolchain: Toolchain::default(),
            test: TestConfig::default(),
            build: BuildConfig::default(),
            cross: CrossConfig::default(),
            run: RunConfig::default(),
            check: CheckConfig::default(),
        }
    }
}

/// Toolchain executables
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Toolchain {
    /// Compiler and test runner
    pub go: String,

    /// Linter
    pub linter: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Toolchain {
            go: "go".to_string(),
            linter: "golangci-lint".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestConfig {
    /// Deadline handed to the test runner (`-timeout=<value>`)
    pub timeout: String,

    /// Run count (`-count=<value>`), 1 disables the test cache
    pub count: u32,

    /// Enable the race detector
    pub race: bool,

    /// Package selectors
    pub packages: Vec<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        TestConfig {
            timeout: "60s".to_string(),
            count: 1,
            race: false,
            packages: vec!["./...".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Output directory, relative to `cmd/<app>`
    pub output: String,

    /// Linker flags
    pub ldflags: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            output: "../../dist/".to_string(),
            ldflags: "-s -w".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrossConfig {
    /// Value for `GOOS`
    pub os: String,

    /// Value for `GOARCH`
    pub arch: String,
}

impl Default for CrossConfig {
    fn default() -> Self {
        CrossConfig {
            os: "linux".to_string(),
            arch: "amd64".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Directory holding the produced binary, relative to the project root
    pub dist: String,

    /// Value passed to the binary's `-config` flag
    pub config: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            dist: "dist".to_string(),
            config: "./../configs".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Run every step even after one fails
    pub keep_going: bool,
}
