//! Integration tests for project file loading

mod common;

use mkgo::config::{load_config_from, parse_config_file, Config};
use mkgo::error::{ConfigError, MkgoError};
use mkgo::runner::{BaseEnv, Context, Task};
use std::fs;
use std::path::PathBuf;

#[test]
fn test_full_config_file() {
    let project = common::create_project(
        r#"
app: tiles
verbosity: quiet
toolchain:
  go: go1.22
  linter: revive
test:
  timeout: 2m
  count: 3
build:
  output: ../../bin/
  ldflags: "-s -w -X main.version=1.0"
cross:
  os: windows
  arch: arm64
run:
  dist: bin
  config: ./configs/dev
check:
  keep_going: true
"#,
    );

    let loaded = load_config_from(project.path()).unwrap();
    let config = &loaded.config;

    assert_eq!(loaded.path, Some(project.path().join("mkgo.yml")));
    assert_eq!(config.app, "tiles");
    assert_eq!(config.toolchain.linter, "revive");
    assert_eq!(config.test.count, 3);
    assert_eq!(config.build.ldflags, "-s -w -X main.version=1.0");
    assert_eq!(config.cross.os, "windows");
    assert_eq!(config.run.dist, "bin");
    assert!(config.check.keep_going);
}

#[test]
fn test_loaded_root_anchors_working_dirs() {
    let project = common::create_project("app: tiles\n");
    let loaded = load_config_from(project.path()).unwrap();
    let root = loaded.root();

    let ctx = Context::new(BaseEnv::default(), loaded.config).with_root(root);
    let build = Task::Build.invocation(&ctx).unwrap();
    let lint = Task::Lint.invocation(&ctx).unwrap();

    assert_eq!(
        build.working_dir,
        Some(project.path().join("cmd").join("tiles"))
    );
    assert_eq!(lint.working_dir, Some(project.path().to_path_buf()));
}

#[test]
fn test_yaml_error_is_reported() {
    let project = common::create_project("app: [unterminated\n");
    let result = load_config_from(project.path());
    assert!(matches!(result, Err(MkgoError::Yaml(_))));
}

#[test]
fn test_unknown_key_is_reported() {
    let project = common::create_project("aap: typo\n");
    assert!(load_config_from(project.path()).is_err());
}

#[test]
fn test_missing_file_is_read_error() {
    let result = parse_config_file(&PathBuf::from("/nonexistent/mkgo.yml"));
    assert!(matches!(
        result,
        Err(MkgoError::Config(ConfigError::Read { .. }))
    ));
}

#[test]
fn test_yaml_extension_is_discovered() {
    let project = tempfile::TempDir::new().unwrap();
    fs::write(project.path().join("mkgo.yaml"), "app: maps\n").unwrap();

    let loaded = load_config_from(project.path()).unwrap();
    assert_eq!(loaded.config.app, "maps");
    assert_ne!(loaded.config, Config::default());
}
