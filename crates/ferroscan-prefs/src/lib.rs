//! Read-only scanner preferences shared by the Ferroscan crates.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

/// Location reported in diagnostics when no explicit config path is known.
pub const DEFAULT_CONFIG_FILE: &str = "/etc/ferroscan/ferroscan.conf";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to read preferences file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse preferences file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("preferences file must contain a single JSON object of scalar values")]
    NotAnObject,
}

/// Scanner configuration. Owned by the caller; the plugin loading subsystem
/// only ever reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    values: BTreeMap<String, String>,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads preferences from a JSON object. Scalar values are stored in
    /// their string form; nested objects and arrays are rejected.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PrefsError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let parsed: serde_json::Value = serde_json::from_str(&raw)?;
        let object = parsed.as_object().ok_or(PrefsError::NotAnObject)?;
        let mut prefs = Self::new();
        for (key, value) in object {
            let value = match value {
                serde_json::Value::String(text) => text.clone(),
                serde_json::Value::Bool(flag) => flag.to_string(),
                serde_json::Value::Number(number) => number.to_string(),
                _ => return Err(PrefsError::NotAnObject),
            };
            prefs.set(key, value);
        }
        if prefs.get("config_file").is_none() {
            prefs.set("config_file", path.display().to_string());
        }
        Ok(prefs)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Directory scanned for plugin files, when configured.
    pub fn plugins_folder(&self) -> Option<&str> {
        self.get("plugins_folder")
    }

    /// Configuration file path referenced by scan diagnostics.
    pub fn config_file(&self) -> &str {
        self.get("config_file").unwrap_or(DEFAULT_CONFIG_FILE)
    }

    /// Whether each plugin file is logged before classification.
    pub fn log_plugins_at_load(&self) -> bool {
        matches!(
            self.get("log_plugins_at_load"),
            Some("yes") | Some("true") | Some("1")
        )
    }
}
