//! Common test utilities

#![allow(dead_code)]

use mkgo::config::Config;
use mkgo::error::ExecutionResult;
use mkgo::runner::{BaseEnv, Context, Environment, Invocation, Spawner, Status, Verbosity};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Spawner double: records each call in order and replays queued exit codes
#[derive(Default)]
pub struct RecordingSpawner {
    pub calls: Vec<(Invocation, Environment)>,
    pub codes: VecDeque<i32>,
}

impl RecordingSpawner {
    pub fn with_codes(codes: &[i32]) -> Self {
        RecordingSpawner {
            calls: Vec::new(),
            codes: codes.iter().copied().collect(),
        }
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls.iter().map(|(inv, _)| inv.program.clone()).collect()
    }
}

impl Spawner for RecordingSpawner {
    fn spawn(&mut self, invocation: &Invocation, env: &Environment) -> ExecutionResult<Status> {
        self.calls.push((invocation.clone(), env.clone()));
        Ok(Status::from_code(self.codes.pop_front().unwrap_or(0)))
    }
}

/// Base environment shared by the dispatch tests
pub fn base_env() -> BaseEnv {
    BaseEnv::from_vars([
        ("PATH", "/usr/local/go/bin:/usr/bin"),
        ("HOME", "/home/dev"),
        ("GOPROXY", "https://proxy.golang.org"),
    ])
}

/// Quiet context over defaults
pub fn quiet_context(config: Config) -> Context {
    Context::new(base_env(), config).with_verbosity(Verbosity::Silent)
}

/// Create a temporary project with an mkgo.yml file
pub fn create_project(config_yaml: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("mkgo.yml"), config_yaml).unwrap();
    temp_dir
}

/// Write an executable shell script
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
