//! Centralized directory structure and durable storage for the campus client
//!
//! Directory layout:
//! ```text
//! campus_data/
//! ├── local/           # Durable key-value store (storage.json)
//! └── logs/            # Rolling client logs
//! ```
//!
//! The optional client config file lives outside the data root, under the
//! platform config directory (`<config_dir>/campus/config.json`).

pub mod storage;

pub use storage::{DurableStorage, FileStorage, MemoryStorage};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Get the global configuration path
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("campus").join("config.json"))
}

/// Load a JSON config file, returning `None` when absent or unreadable
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        return None;
    }

    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<T>(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Failed to parse config file at {:?}: {}", path, e);
                None
            }
        },
        Err(e) => {
            warn!("Failed to read config file at {:?}: {}", path, e);
            None
        }
    }
}

/// Write a value as pretty JSON, creating parent directories
pub fn save_json_file<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Get the data root from `CAMPUS_ROOT`, the platform data dir, or a local default
pub fn campus_root() -> PathBuf {
    if let Ok(val) = std::env::var("CAMPUS_ROOT") {
        return PathBuf::from(val);
    }

    dirs::data_dir()
        .map(|d| d.join("campus"))
        .unwrap_or_else(|| PathBuf::from("campus_data"))
}

/// Local data directory (durable storage)
pub fn local_dir() -> PathBuf {
    campus_root().join("local")
}

/// Default durable storage file
pub fn storage_path() -> PathBuf {
    local_dir().join("storage.json")
}

pub fn logs_dir() -> PathBuf {
    campus_root().join("logs")
}

/// Ensure a single directory exists
pub fn ensure_dir(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
        info!("Created directory: {:?}", path);
    }
    Ok(())
}

/// Ensure a file's parent directory exists
pub fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    Ok(())
}

/// Initialize the directory structure; call once at startup
pub fn init_structure() -> anyhow::Result<PathBuf> {
    let root = campus_root();
    ensure_dir(&root)?;
    ensure_dir(&local_dir())?;
    ensure_dir(&logs_dir())?;

    let canonical = fs::canonicalize(&root).unwrap_or_else(|_| root.clone());
    info!("Campus directory structure initialized at: {:?}", canonical);
    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        base_url: String,
    }

    #[test]
    fn test_layout_paths_hang_off_root() {
        let root = campus_root();
        assert!(local_dir().starts_with(&root));
        assert!(storage_path().ends_with("local/storage.json"));
        assert!(logs_dir().starts_with(&root));
    }

    #[test]
    fn test_json_file_round_trip_and_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        assert!(load_json_file::<Sample>(&path).is_none());

        let sample = Sample {
            base_url: "http://campus.local/api".to_string(),
        };
        save_json_file(&path, &sample).unwrap();
        assert_eq!(load_json_file::<Sample>(&path), Some(sample));

        fs::write(&path, "{ not json").unwrap();
        assert!(load_json_file::<Sample>(&path).is_none());
    }
}
