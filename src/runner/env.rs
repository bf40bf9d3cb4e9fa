//! Environment overlays
//!
//! The inherited environment is captured once into a [`BaseEnv`] and never
//! written to again. Each invocation carries its own [`EnvOverlay`]; applying
//! it to the base yields a fresh [`Environment`] for that child alone, so two
//! tasks run from the same process cannot see each other's keys.

use std::collections::BTreeMap;
use std::env;
use std::ffi::{OsStr, OsString};
use std::sync::Arc;

type EnvMap = BTreeMap<OsString, OsString>;

/// Read-only snapshot of the inherited environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseEnv {
    vars: Arc<EnvMap>,
}

impl BaseEnv {
    /// Snapshot the current process environment
    pub fn capture() -> Self {
        Self::from_vars(env::vars_os())
    }

    /// Build a snapshot from explicit pairs
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        BaseEnv {
            vars: Arc::new(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(key.as_ref()).map(OsString::as_os_str)
    }

    /// Get a variable as UTF-8, `None` if unset or not valid Unicode
    pub fn var(&self, key: impl AsRef<OsStr>) -> Option<&str> {
        self.get(key).and_then(OsStr::to_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Derive a child environment: every base variable plus the overlay,
    /// with overlay values winning on conflicts.
    pub fn apply(&self, overlay: &EnvOverlay) -> Environment {
        let mut vars = (*self.vars).clone();
        for (key, value) in &overlay.vars {
            vars.retain(|existing, _| !same_key(existing, OsStr::new(key)));
            vars.insert(OsString::from(key), OsString::from(value));
        }
        Environment { vars }
    }
}

/// Variable names are case-insensitive on Windows
#[cfg(windows)]
fn same_key(a: &OsStr, b: &OsStr) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[cfg(not(windows))]
fn same_key(a: &OsStr, b: &OsStr) -> bool {
    a == b
}

/// Task-specific variable overrides, keys unique
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverlay {
    vars: BTreeMap<String, String>,
}

impl EnvOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a key
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// True if every key of `other` is present here with the same value
    pub fn is_superset_of(&self, other: &EnvOverlay) -> bool {
        other.iter().all(|(k, v)| self.get(k) == Some(v))
    }
}

/// Fully resolved environment for one child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    vars: EnvMap,
}

impl Environment {
    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(key.as_ref()).map(OsString::as_os_str)
    }

    pub fn contains_key(&self, key: impl AsRef<OsStr>) -> bool {
        self.vars.contains_key(key.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BaseEnv {
        BaseEnv::from_vars([
            ("PATH", "/usr/bin"),
            ("HOME", "/home/dev"),
            ("CGO_ENABLED", "1"),
        ])
    }

    #[test]
    fn test_apply_keeps_unrelated_vars() {
        let overlay = EnvOverlay::new().with("GO111MODULE", "on");
        let env = base().apply(&overlay);

        assert_eq!(env.get("PATH"), Some(OsStr::new("/usr/bin")));
        assert_eq!(env.get("HOME"), Some(OsStr::new("/home/dev")));
        assert_eq!(env.get("GO111MODULE"), Some(OsStr::new("on")));
        assert_eq!(env.len(), 4);
    }

    #[test]
    fn test_overlay_wins_on_conflict() {
        let overlay = EnvOverlay::new().with("CGO_ENABLED", "0");
        let env = base().apply(&overlay);
        assert_eq!(env.get("CGO_ENABLED"), Some(OsStr::new("0")));
    }

    #[cfg(windows)]
    #[test]
    fn test_overlay_replaces_key_in_any_case() {
        let base = BaseEnv::from_vars([("cgo_enabled", "1"), ("Path", "C:\\Go\\bin")]);
        let env = base.apply(&EnvOverlay::new().with("CGO_ENABLED", "0"));

        assert!(!env.iter().any(|(k, _)| k == OsStr::new("cgo_enabled")));
        assert_eq!(env.get("CGO_ENABLED"), Some(OsStr::new("0")));
        assert_eq!(env.len(), 2);
    }

    #[cfg(not(windows))]
    #[test]
    fn test_keys_differing_in_case_are_distinct() {
        let base = BaseEnv::from_vars([("cgo_enabled", "1")]);
        let env = base.apply(&EnvOverlay::new().with("CGO_ENABLED", "0"));

        assert_eq!(env.get("cgo_enabled"), Some(OsStr::new("1")));
        assert_eq!(env.get("CGO_ENABLED"), Some(OsStr::new("0")));
    }

    #[test]
    fn test_apply_does_not_touch_base() {
        let base = base();
        let before = base.clone();
        let _ = base.apply(&EnvOverlay::new().with("GOOS", "linux"));

        assert_eq!(base, before);
        assert!(base.get("GOOS").is_none());
    }

    #[test]
    fn test_overlays_are_independent() {
        let base = base();
        let first = base.apply(&EnvOverlay::new().with("GOOS", "linux"));
        let second = base.apply(&EnvOverlay::new());

        assert!(first.contains_key("GOOS"));
        assert!(!second.contains_key("GOOS"));
    }

    #[test]
    fn test_overlay_keys_are_unique() {
        let mut overlay = EnvOverlay::new().with("GOARCH", "386");
        overlay.set("GOARCH", "amd64");

        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay.get("GOARCH"), Some("amd64"));
    }

    #[test]
    fn test_is_superset_of() {
        let small = EnvOverlay::new().with("CGO_ENABLED", "0");
        let big = small.clone().with("GOOS", "linux");

        assert!(big.is_superset_of(&small));
        assert!(!small.is_superset_of(&big));
        assert!(small.is_superset_of(&EnvOverlay::new()));
    }

    #[test]
    fn test_capture_sees_process_environment() {
        let base = BaseEnv::capture();
        assert_eq!(base.len(), env::vars_os().count());
    }
}
