//! Short key model.

use std::fmt;

/// Separator between the bare token and the password token of a secure key.
pub const SECURE_SEPARATOR: char = '$';

/// Returns the portion of a stored key before the first [`SECURE_SEPARATOR`].
///
/// Keys without a separator are returned unchanged.
pub fn bare_token(key: &str) -> &str {
    key.split(SECURE_SEPARATOR).next().unwrap_or(key)
}

/// A short key, optionally gated by a plaintext password token.
///
/// The storage key is `bare` for open links and `bare$password` for secure
/// links. Uniqueness is only ever checked against the bare token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortKey {
    bare: String,
    password: Option<String>,
}

impl ShortKey {
    /// Creates a key from a bare token and an optional password token.
    ///
    /// An empty password is the same as no password.
    pub fn new(bare: impl Into<String>, password: Option<&str>) -> Self {
        let password = match password {
            Some(p) if !p.is_empty() => Some(p.to_string()),
            _ => None,
        };

        Self {
            bare: bare.into(),
            password,
        }
    }

    /// Parses a full storage key into its bare and password parts.
    pub fn parse(storage_key: &str) -> Self {
        match storage_key.split_once(SECURE_SEPARATOR) {
            Some((bare, password)) => Self::new(bare, Some(password)),
            None => Self::new(storage_key, None),
        }
    }

    pub fn bare(&self) -> &str {
        &self.bare
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Returns true if the key carries a password suffix.
    pub fn is_secure(&self) -> bool {
        self.password.is_some()
    }

    /// The key actually written to the store.
    pub fn storage_key(&self) -> String {
        match &self.password {
            Some(password) => format!("{}{}{}", self.bare, SECURE_SEPARATOR, password),
            None => self.bare.clone(),
        }
    }
}

impl fmt::Display for ShortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}
