//! JSON settings file holding the preference under one key

use super::{PreferenceStore, SettingsError};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// A JSON object on disk; the preference is one string entry of it
#[derive(Debug, Clone)]
pub struct JsonSettingsFile {
    path: PathBuf,
    key: String,
}

impl JsonSettingsFile {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current file contents; anything unreadable counts as empty settings
    fn load(&self) -> Map<String, Value> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return Map::new();
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                tracing::debug!(path = %self.path.display(), "ignoring malformed settings file");
                Map::new()
            }
        }
    }
}

impl PreferenceStore for JsonSettingsFile {
    fn get(&self) -> Option<String> {
        self.load()
            .get(&self.key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn set(&mut self, value: &str) -> Result<(), SettingsError> {
        let mut settings = self.load();
        settings.insert(self.key.clone(), Value::String(value.to_string()));

        let content = serde_json::to_string_pretty(&settings)?;
        let io_error = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&self.path, content).map_err(io_error)?;

        tracing::debug!(path = %self.path.display(), key = %self.key, %value, "saved preference");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_absent() {
        let dir = TempDir::new().unwrap();
        let store = JsonSettingsFile::new(dir.path().join("settings.json"), "clion_version");
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_set_then_get() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let mut store = JsonSettingsFile::new(&path, "clion_version");

        store.set("2024.3").unwrap();
        assert_eq!(store.get().as_deref(), Some("2024.3"));

        let reopened = JsonSettingsFile::new(&path, "clion_version");
        assert_eq!(reopened.get().as_deref(), Some("2024.3"));
    }

    #[test]
    fn test_set_preserves_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"theme": "dark", "clion_version": "2023.1"}"#).unwrap();

        let mut store = JsonSettingsFile::new(&path, "clion_version");
        store.set("2025.1").unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["theme"], "dark");
        assert_eq!(written["clion_version"], "2025.1");
    }

    #[test]
    fn test_malformed_file_reads_as_absent_and_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json at all").unwrap();

        let mut store = JsonSettingsFile::new(&path, "clion_version");
        assert_eq!(store.get(), None);

        store.set("2024.2").unwrap();
        assert_eq!(store.get().as_deref(), Some("2024.2"));
    }

    #[test]
    fn test_non_string_value_is_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"clion_version": 2024}"#).unwrap();

        let store = JsonSettingsFile::new(&path, "clion_version");
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_set_fails_when_parent_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let mut store = JsonSettingsFile::new(blocker.join("settings.json"), "clion_version");
        assert!(matches!(store.set("2024.1"), Err(SettingsError::Io { .. })));
    }
}
