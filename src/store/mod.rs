use anyhow::Result;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::get_config_dir;

/// Minimal persistence seam for user preferences.
///
/// Collaborating components receive a store instead of reaching for
/// process-global state, so tests can inject an in-memory one.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Key-value store backed by a single JSON object on disk.
///
/// Writes land immediately; the file is small enough that rewriting it per
/// `set` is simpler than buffering.
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Open (or create) the store at an explicit path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let values = if path.exists() {
            let text = fs::read_to_string(&path)?;
            match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(map)) => map,
                // Unreadable state file starts fresh rather than failing startup
                _ => Map::new(),
            }
        } else {
            Map::new()
        };

        Ok(Self { path, values })
    }

    /// Open the default preferences store under the config directory
    pub fn open_default() -> Result<Self> {
        Self::open(get_config_dir()?.join("state.json"))
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&Value::Object(self.values.clone()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values
            .insert(key.to_string(), Value::String(value.to_string()));
        self.flush()
    }
}
