//! Record store configuration.
//!
//! Hosts build a [`StoreConfig`] in code or deserialize it from their own
//! settings; the core never reads files or environment variables itself.

use crate::db::DEFAULT_BUSY_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name used by [`StoreConfig::in_data_dir`].
pub const DEFAULT_DB_FILE_NAME: &str = "tailorbook.sqlite3";

/// Where records live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "path")]
pub enum StoreLocation {
    /// SQLite file, reopened for every transaction.
    File(PathBuf),
    /// Private in-memory database that lives as long as the store.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub location: StoreLocation,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl StoreConfig {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: StoreLocation::File(path.into()),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }

    /// `<dir>/tailorbook.sqlite3`.
    pub fn in_data_dir(dir: impl AsRef<Path>) -> Self {
        Self::file(dir.as_ref().join(DEFAULT_DB_FILE_NAME))
    }

    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::Memory,
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

fn default_busy_timeout_ms() -> u64 {
    u64::try_from(DEFAULT_BUSY_TIMEOUT.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::{StoreConfig, StoreLocation, DEFAULT_DB_FILE_NAME};
    use std::path::Path;
    use std::time::Duration;

    #[test]
    fn data_dir_config_points_at_default_file() {
        let config = StoreConfig::in_data_dir("/var/lib/shop");
        assert_eq!(
            config.location,
            StoreLocation::File(Path::new("/var/lib/shop").join(DEFAULT_DB_FILE_NAME))
        );
        assert_eq!(config.busy_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn deserializes_with_default_busy_timeout() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"location":{"kind":"file","path":"/tmp/shop.db"}}"#).unwrap();
        assert_eq!(config, StoreConfig::file("/tmp/shop.db"));

        let memory: StoreConfig =
            serde_json::from_str(r#"{"location":{"kind":"memory"},"busy_timeout_ms":250}"#)
                .unwrap();
        assert_eq!(memory.location, StoreLocation::Memory);
        assert_eq!(memory.busy_timeout(), Duration::from_millis(250));
    }
}
