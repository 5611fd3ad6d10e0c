//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use whispernet_feed::{CachePolicy, DEFAULT_DEBOUNCE};
use whispernet_remote::DEFAULT_LATENCY;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the local store file
    pub database_path: PathBuf,
    /// Simulated round trip of the remote source
    pub remote_latency_ms: u64,
    /// Quiet period before a search runs
    pub debounce_ms: u64,
    /// Whether loads are copied into the local store
    pub cache_policy: CachePolicy,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("whispernet.db"),
            remote_latency_ms: DEFAULT_LATENCY.as_millis() as u64,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            cache_policy: CachePolicy::default(),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("WhisperNet"))
            .unwrap_or_else(|| PathBuf::from(".whispernet"))
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(CoreError::Config("database_path must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn remote_latency(&self) -> Duration {
        Duration::from_millis(self.remote_latency_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new(PathBuf::from("/tmp/wn"));
        assert_eq!(config.database_path, PathBuf::from("/tmp/wn/whispernet.db"));
        assert_eq!(config.remote_latency(), Duration::from_millis(500));
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.cache_policy, CachePolicy::RemoteOnly);
    }

    #[test]
    fn test_data_dir_is_named_for_the_app() {
        let dir = Config::data_dir();
        match dirs::data_local_dir() {
            Some(base) => assert_eq!(dir, base.join("WhisperNet")),
            None => assert_eq!(dir, PathBuf::from(".whispernet")),
        }
        assert_eq!(
            Config::default().database_path,
            dir.join("whispernet.db")
        );
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "database_path": "/var/lib/wn.db", "cache_policy": "write_through" }"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/var/lib/wn.db"));
        assert_eq!(config.cache_policy, CachePolicy::WriteThrough);
        assert_eq!(config.debounce_ms, 300);
    }

    #[test]
    fn test_load_rejects_empty_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "database_path": "" }"#).unwrap();

        assert!(matches!(Config::load(&path), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
