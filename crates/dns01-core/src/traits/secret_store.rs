// # Secret Store Trait
//
// Defines the interface for namespaced credential lookup.
//
// ## Purpose
//
// Solvers need an API token to talk to their DNS provider. The token lives
// in a secret owned by someone else; the solver only knows the secret's name
// and the key inside it (see `SecretKeySelector`). A `SecretStore` resolves
// that reference on demand.
//
// ## Implementations
//
// - `MemorySecretStore`: in-process map, for tests and embedding
// - `FileSecretStore`: directory tree, as projected by a secret volume
//
// ## Usage
//
// ```rust,ignore
// use dns01_core::SecretStore;
//
// let secret = store.get("cert-manager", "do-credentials").await?;
// let token = secret.string_value("token")?;
// ```

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::Error;

/// A fetched secret: string keys mapping to raw byte values
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret {
    /// Secret data
    pub data: BTreeMap<String, Vec<u8>>,
}

impl Secret {
    /// Create an empty secret
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Raw bytes stored at `key`
    pub fn value(&self, key: &str) -> Option<&[u8]> {
        self.data.get(key).map(Vec::as_slice)
    }

    /// Value at `key` decoded as UTF-8
    ///
    /// # Returns
    ///
    /// - `Ok(Some(String))`: the decoded value
    /// - `Ok(None)`: no such key
    /// - `Err(Error::InvalidSecretValue)`: the bytes are not UTF-8
    pub fn string_value(&self, key: &str) -> Result<Option<String>, Error> {
        match self.data.get(key) {
            None => Ok(None),
            Some(bytes) => String::from_utf8(bytes.clone())
                .map(Some)
                .map_err(|_| Error::InvalidSecretValue {
                    key: key.to_string(),
                }),
        }
    }
}

// Secret values must never reach logs, only the key names.
impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret")
            .field("keys", &self.data.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Trait for secret store implementations
///
/// # Thread Safety
///
/// A single store handle is shared by every concurrent `present`/`cleanup`
/// call of a solver, so all methods must be safe to call concurrently.
///
/// # Caching
///
/// Implementations must not cache lookups on behalf of the solver: a rotated
/// token has to be picked up by the very next challenge.
#[async_trait]
pub trait SecretStore: Send + Sync + std::fmt::Debug {
    /// Fetch a secret by name within a namespace
    ///
    /// # Parameters
    ///
    /// - `namespace`: Scope of the lookup (the challenge's resource namespace)
    /// - `name`: Secret name
    ///
    /// # Returns
    ///
    /// - `Ok(Secret)`: The secret's full data mapping
    /// - `Err(Error::NotFound)`: No secret with that name in that namespace
    /// - `Err(Error)`: Any other backend failure
    async fn get(&self, namespace: &str, name: &str) -> Result<Secret, Error>;

    /// Get the store name (for logging/debugging)
    fn store_name(&self) -> &'static str;
}
