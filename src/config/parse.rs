//! Project file parsing and discovery

use crate::config::schema::validate_config;
use crate::config::types::Config;
use crate::error::{ConfigError, MkgoError};
use serde::Deserialize;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Project file names to search for
pub const CONFIG_FILE_NAMES: &[&str] = &["mkgo.yml", "mkgo.yaml"];

/// Find the project file by searching `start_dir` and its parents.
///
/// Returns `None` when no directory up to the filesystem root holds one.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    start_dir.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

/// Parse a project file from a path
pub fn parse_config_file(path: &Path) -> Result<Config, MkgoError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    parse_config(&contents)
}

/// Parse and validate a project file from a string.
///
/// An empty or comment-only document yields the defaults.
pub fn parse_config(yaml: &str) -> Result<Config, MkgoError> {
    let blank = yaml.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    });
    if blank {
        return Ok(Config::default());
    }

    let value: Value = serde_yaml::from_str(yaml)?;
    let config = match value {
        Value::Null => Config::default(),
        Value::Mapping(_) => Config::deserialize(value)?,
        _ => {
            return Err(ConfigError::Invalid("top level must be a mapping".to_string()).into());
        }
    };

    validate_config(&config)?;
    Ok(config)
}

/// A loaded project file together with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: Config,

    /// Path of the file, `None` when running on defaults
    pub path: Option<PathBuf>,
}

impl LoadedConfig {
    /// Directory that task working directories are resolved against.
    ///
    /// `None` means the current directory.
    pub fn root(&self) -> Option<PathBuf> {
        self.path
            .as_ref()
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf())
    }
}

/// Load the project file visible from `start_dir`, falling back to defaults
pub fn load_config_from(start_dir: &Path) -> Result<LoadedConfig, MkgoError> {
    load_config_at(find_config_file_from(start_dir))
}

/// Load a specific project file, or the defaults when `path` is `None`
pub fn load_config_at(path: Option<PathBuf>) -> Result<LoadedConfig, MkgoError> {
    let config = match &path {
        Some(path) => parse_config_file(path)?,
        None => Config::default(),
    };
    Ok(LoadedConfig { config, path })
}
