//! Persistence of the last chosen installation version
//!
//! The resolver only needs get/set on a single string. Write failures are
//! reported to the caller, which treats them as warnings.

mod file;

pub use file::JsonSettingsFile;

use std::path::PathBuf;
use thiserror::Error;

/// Errors from writing the preference (never fatal to a run)
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to write settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage for the single "selected version" preference
pub trait PreferenceStore {
    fn get(&self) -> Option<String>;

    fn set(&mut self, value: &str) -> Result<(), SettingsError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &mut S {
    fn get(&self) -> Option<String> {
        (**self).get()
    }

    fn set(&mut self, value: &str) -> Result<(), SettingsError> {
        (**self).set(value)
    }
}

/// In-memory preference, for tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemoryPreference {
    value: Option<String>,
    writes: usize,
}

impl MemoryPreference {
    pub fn new(value: Option<&str>) -> Self {
        Self {
            value: value.map(str::to_string),
            writes: 0,
        }
    }

    /// How many times `set` has been called
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PreferenceStore for MemoryPreference {
    fn get(&self) -> Option<String> {
        self.value.clone()
    }

    fn set(&mut self, value: &str) -> Result<(), SettingsError> {
        self.value = Some(value.to_string());
        self.writes += 1;
        Ok(())
    }
}
