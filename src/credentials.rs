use std::collections::HashMap;

use crate::{FetchError, Result};

/// Source of secrets such as API tokens.
///
/// Blank values are treated as missing.
pub trait CredentialProvider: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Returns the value or [`FetchError::MissingCredential`].
    fn require(&self, key: &str) -> Result<String> {
        self.get(key)
            .ok_or_else(|| FetchError::MissingCredential(key.to_owned()))
    }
}

/// Reads credentials from process environment variables.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvCredentials;

impl CredentialProvider for EnvCredentials {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .filter(|value| !value.trim().is_empty())
    }
}

/// Fixed in-memory credentials.
#[derive(Clone, Default)]
pub struct StaticCredentials {
    values: HashMap<String, String>,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&String> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("StaticCredentials")
            .field("keys", &keys)
            .finish()
    }
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for StaticCredentials
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl CredentialProvider for StaticCredentials {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .filter(|value| !value.trim().is_empty())
            .cloned()
    }
}
