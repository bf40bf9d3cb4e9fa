//! Project file validation

use crate::config::types::Config;
use crate::error::{ConfigError, ConfigResult};

/// Validate a complete configuration
pub fn validate_config(config: &Config) -> ConfigResult<()> {
    validate_app_name(&config.app)?;

    require_non_empty("toolchain.go", &config.toolchain.go)?;
    require_non_empty("toolchain.linter", &config.toolchain.linter)?;

    require_non_empty("test.timeout", &config.test.timeout)?;
    if config.test.count == 0 {
        return Err(ConfigError::InvalidField {
            field: "test.count",
            reason: "must be at least 1".to_string(),
        });
    }
    if config.test.packages.is_empty() {
        return Err(ConfigError::InvalidField {
            field: "test.packages",
            reason: "at least one package selector is required".to_string(),
        });
    }

    require_non_empty("build.output", &config.build.output)?;
    require_non_empty("cross.os", &config.cross.os)?;
    require_non_empty("cross.arch", &config.cross.arch)?;
    require_non_empty("run.dist", &config.run.dist)?;

    Ok(())
}

/// The app name becomes a single path component under `cmd/` and `dist/`
fn validate_app_name(app: &str) -> ConfigResult<()> {
    require_non_empty("app", app)?;
    if app.contains(['/', '\\']) || app == "." || app == ".." {
        return Err(ConfigError::InvalidField {
            field: "app",
            reason: format!("'{}' must be a plain directory name", app),
        });
    }
    Ok(())
}

fn require_non_empty(field: &'static str, value: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}
