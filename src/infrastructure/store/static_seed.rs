//! Built-in fallback table of short links.

use std::collections::HashMap;
use std::path::Path;

/// Entries available with no store configured at all.
const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    ("demo", "https://example.com"),
    ("source", "https://github.com/bobrynya/url-shortener"),
];

/// Errors raised while loading a seed file.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Seed file {path} is not a JSON object of strings: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Read-only key to URL table consulted after the memory tier.
#[derive(Debug, Clone, Default)]
pub struct StaticSeed {
    entries: HashMap<String, String>,
}

impl StaticSeed {
    /// Creates an empty table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates the built-in table.
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_ENTRIES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Extends the table with entries from a JSON object file.
    ///
    /// File entries override built-in ones with the same key.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] if the file cannot be read or parsed.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
            path: display.clone(),
            source,
        })?;

        let entries: HashMap<String, String> =
            serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
                path: display,
                source,
            })?;

        self.entries.extend(entries);
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
